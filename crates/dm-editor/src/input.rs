//! Input events.
//!
//! Raw pointer and keyboard events from the presentation layer, plus the
//! drag events synthesized by [`DragDetector`](crate::drag::DragDetector).
//! The serde form is the name-tagged object the browser glue produces:
//!
//! ```json
//! {"name": "mouseDown", "x": 32, "y": 32, "button": 0}
//! ```

use crate::error::InputError;
use dm_core::Point;
use serde::{Deserialize, Serialize};

/// Mouse button number as reported by the browser (`MouseEvent.button`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MouseButton(pub u16);

impl MouseButton {
    pub const PRIMARY: MouseButton = MouseButton(0);
    pub const MIDDLE: MouseButton = MouseButton(1);
    pub const SECONDARY: MouseButton = MouseButton(2);
}

/// Start and current point of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drag {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum Event {
    MouseDown {
        x: f32,
        y: f32,
        button: MouseButton,
        #[serde(default, rename = "ctrlKey")]
        ctrl_key: bool,
    },
    MouseUp {
        x: f32,
        y: f32,
        button: MouseButton,
        #[serde(default, rename = "ctrlKey")]
        ctrl_key: bool,
    },
    MouseMove {
        x: f32,
        y: f32,
    },
    MouseClick {
        x: f32,
        y: f32,
        #[serde(default)]
        button: MouseButton,
        #[serde(default, rename = "ctrlKey")]
        ctrl_key: bool,
    },
    KeyDown {
        key: String,
        #[serde(default, rename = "ctrlKey")]
        ctrl_key: bool,
    },
    KeyPress {
        key: String,
    },
    DragStart(Drag),
    Dragging(Drag),
    DragEnd(Drag),
}

impl Event {
    pub fn mouse_down(x: f32, y: f32, button: MouseButton) -> Self {
        Self::MouseDown {
            x,
            y,
            button,
            ctrl_key: false,
        }
    }

    pub fn mouse_up(x: f32, y: f32, button: MouseButton) -> Self {
        Self::MouseUp {
            x,
            y,
            button,
            ctrl_key: false,
        }
    }

    pub fn mouse_move(x: f32, y: f32) -> Self {
        Self::MouseMove { x, y }
    }

    pub fn click(x: f32, y: f32) -> Self {
        Self::MouseClick {
            x,
            y,
            button: MouseButton::PRIMARY,
            ctrl_key: false,
        }
    }

    pub fn ctrl_click(x: f32, y: f32) -> Self {
        Self::MouseClick {
            x,
            y,
            button: MouseButton::PRIMARY,
            ctrl_key: true,
        }
    }

    pub fn key_press(key: impl Into<String>) -> Self {
        Self::KeyPress { key: key.into() }
    }

    pub fn key_down(key: impl Into<String>) -> Self {
        Self::KeyDown {
            key: key.into(),
            ctrl_key: false,
        }
    }

    /// The wire name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MouseDown { .. } => "mouseDown",
            Self::MouseUp { .. } => "mouseUp",
            Self::MouseMove { .. } => "mouseMove",
            Self::MouseClick { .. } => "mouseClick",
            Self::KeyDown { .. } => "keyDown",
            Self::KeyPress { .. } => "keyPress",
            Self::DragStart(_) => "dragStart",
            Self::Dragging(_) => "dragging",
            Self::DragEnd(_) => "dragEnd",
        }
    }

    /// Pointer position, for raw mouse events.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::MouseDown { x, y, .. }
            | Self::MouseUp { x, y, .. }
            | Self::MouseMove { x, y }
            | Self::MouseClick { x, y, .. } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }

    /// Apply `f` to every point the event carries. Keyboard events pass
    /// through untouched.
    pub fn map_points(self, f: impl Fn(Point) -> Point) -> Self {
        let at = |x: f32, y: f32| f(Point::new(x, y));
        match self {
            Self::MouseDown {
                x,
                y,
                button,
                ctrl_key,
            } => {
                let p = at(x, y);
                Self::MouseDown {
                    x: p.x,
                    y: p.y,
                    button,
                    ctrl_key,
                }
            }
            Self::MouseUp {
                x,
                y,
                button,
                ctrl_key,
            } => {
                let p = at(x, y);
                Self::MouseUp {
                    x: p.x,
                    y: p.y,
                    button,
                    ctrl_key,
                }
            }
            Self::MouseMove { x, y } => {
                let p = at(x, y);
                Self::MouseMove { x: p.x, y: p.y }
            }
            Self::MouseClick {
                x,
                y,
                button,
                ctrl_key,
            } => {
                let p = at(x, y);
                Self::MouseClick {
                    x: p.x,
                    y: p.y,
                    button,
                    ctrl_key,
                }
            }
            Self::DragStart(d) => Self::DragStart(map_drag(d, &f)),
            Self::Dragging(d) => Self::Dragging(map_drag(d, &f)),
            Self::DragEnd(d) => Self::DragEnd(map_drag(d, &f)),
            key @ (Self::KeyDown { .. } | Self::KeyPress { .. }) => key,
        }
    }
}

fn map_drag(d: Drag, f: &impl Fn(Point) -> Point) -> Drag {
    Drag {
        start: f(d.start),
        end: f(d.end),
    }
}

/// Events decoded from a JSON script, plus how many entries were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedScript {
    pub events: Vec<Event>,
    pub skipped: usize,
}

/// Decode one event object or an array of them.
///
/// Array entries that are not a recognised event (unknown `name`, missing
/// fields) are skipped and counted; only a document that is not JSON, or is
/// neither an object nor an array, is an error.
pub fn decode_script(json: &str) -> Result<DecodedScript, InputError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        obj @ serde_json::Value::Object(_) => vec![obj],
        other => return Err(InputError::NotAnEvent(json_kind(&other))),
    };

    let mut decoded = DecodedScript::default();
    for item in items {
        match serde_json::from_value::<Event>(item) {
            Ok(event) => decoded.events.push(event),
            Err(err) => {
                log::debug!("ignoring malformed event: {err}");
                decoded.skipped += 1;
            }
        }
    }
    Ok(decoded)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
