//! Axis-aligned geometry: points, bounds, and corner normalization.

use serde::{Deserialize, Serialize};

/// A position on the stage, in stage pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    pub fn delta(self, other: Point) -> (f32, f32) {
        (self.x - other.x, self.y - other.y)
    }

    pub fn offset(self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle. `width` and `height` are never negative when
/// built through [`bounds_of`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Half-open containment test with the edges pushed out by `margin`
    /// on every side.
    pub fn contains_fuzzy(&self, p: Point, margin: f32) -> bool {
        p.x >= self.left - margin
            && p.y >= self.top - margin
            && p.x < self.right() + margin
            && p.y < self.bottom() + margin
    }

    pub fn contains(&self, p: Point) -> bool {
        self.contains_fuzzy(p, 0.0)
    }
}

/// The min/max envelope of two corner points.
///
/// Dragging in any direction yields the same rectangle as dragging the
/// opposite way, so `bounds_of(a, b) == bounds_of(b, a)`.
pub fn bounds_of(a: Point, b: Point) -> Bounds {
    let left = a.x.min(b.x);
    let top = a.y.min(b.y);
    let right = a.x.max(b.x);
    let bottom = a.y.max(b.y);
    Bounds::new(left, top, right - left, bottom - top)
}
