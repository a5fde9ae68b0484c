//! Divs and their cosmetic attributes.

use crate::geometry::{Bounds, Point};
use crate::id::DivId;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Color ───────────────────────────────────────────────────────────────

/// RGBA color. Channels are 0..=255, alpha is 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    Some(hex_val(hi)? << 4 | hex_val(lo)?)
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color, clamping alpha into `[0, 1]`.
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::rgba(r, g, b, a.clamp(0.0, 1.0))
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`. The `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgba(r * 17, g * 17, b * 17, 1.0))
            }
            6 => Some(Self::rgba(
                hex_pair(bytes[0], bytes[1])?,
                hex_pair(bytes[2], bytes[3])?,
                hex_pair(bytes[4], bytes[5])?,
                1.0,
            )),
            8 => {
                let a = hex_pair(bytes[6], bytes[7])?;
                Some(Self::rgba(
                    hex_pair(bytes[0], bytes[1])?,
                    hex_pair(bytes[2], bytes[3])?,
                    hex_pair(bytes[4], bytes[5])?,
                    a as f32 / 255.0,
                ))
            }
            _ => None,
        }
    }
}

/// CSS `rgba(r, g, b, a)` form.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::TRANSPARENT
    }
}

// ─── Div ─────────────────────────────────────────────────────────────────

/// A rectangle on the stage with its visual properties.
///
/// Divs are only mutated through [`Document`](crate::Document) so every
/// change goes out on the same notification channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Div {
    id: DivId,
    #[serde(flatten)]
    bounds: Bounds,
    pub(crate) border_width: f32,
    pub(crate) border_radius: f32,
    pub(crate) background_color: Color,
    pub(crate) padding: f32,
    pub(crate) text: String,
}

impl Div {
    pub(crate) fn new(id: DivId, bounds: Bounds) -> Self {
        Self {
            id,
            bounds,
            border_width: 1.0,
            border_radius: 0.0,
            background_color: Color::TRANSPARENT,
            padding: 0.0,
            text: String::new(),
        }
    }

    pub fn id(&self) -> DivId {
        self.id
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn left(&self) -> f32 {
        self.bounds.left
    }

    pub fn top(&self) -> f32 {
        self.bounds.top
    }

    pub fn width(&self) -> f32 {
        self.bounds.width
    }

    pub fn height(&self) -> f32 {
        self.bounds.height
    }

    pub fn origin(&self) -> Point {
        self.bounds.origin()
    }

    pub fn border_width(&self) -> f32 {
        self.border_width
    }

    pub fn border_radius(&self) -> f32 {
        self.border_radius
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub(crate) fn move_to(&mut self, origin: Point) {
        self.bounds.left = origin.x;
        self.bounds.top = origin.y;
    }
}
