//! Keyboard shortcut mapping.
//!
//! Tool and grid shortcuts match on `keyPress`; delete and undo match on
//! `keyDown`, since browsers do not fire `keypress` for those keys.

use crate::input::Event;
use serde::{Deserialize, Serialize};

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ToolSelect,
    ToolCreate,
    IncreaseGrid,
    DecreaseGrid,
    DeleteSelection,
    Undo,
}

/// Literal key values for each shortcut (`KeyboardEvent.key`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub select_tool: String,
    pub create_tool: String,
    pub increase_grid: String,
    pub decrease_grid: String,
    pub delete_selection: String,
    /// Pressed together with ctrl.
    pub undo: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            select_tool: "q".into(),
            create_tool: "c".into(),
            increase_grid: "]".into(),
            decrease_grid: "[".into(),
            delete_selection: "Delete".into(),
            undo: "z".into(),
        }
    }
}

/// Resolves key events into shortcut actions.
#[derive(Debug, Clone, Default)]
pub struct ShortcutMap {
    keys: KeyBindings,
}

impl ShortcutMap {
    pub fn new(keys: KeyBindings) -> Self {
        Self { keys }
    }

    /// Returns `None` for pointer events and unbound keys.
    pub fn resolve(&self, event: &Event) -> Option<ShortcutAction> {
        let k = &self.keys;
        match event {
            Event::KeyPress { key } => {
                let key = key.as_str();
                if key == k.select_tool {
                    Some(ShortcutAction::ToolSelect)
                } else if key == k.create_tool {
                    Some(ShortcutAction::ToolCreate)
                } else if key == k.increase_grid {
                    Some(ShortcutAction::IncreaseGrid)
                } else if key == k.decrease_grid {
                    Some(ShortcutAction::DecreaseGrid)
                } else {
                    None
                }
            }
            Event::KeyDown { key, ctrl_key } => {
                if *ctrl_key {
                    key.eq_ignore_ascii_case(&k.undo)
                        .then_some(ShortcutAction::Undo)
                } else {
                    (*key == k.delete_selection).then_some(ShortcutAction::DeleteSelection)
                }
            }
            _ => None,
        }
    }
}
