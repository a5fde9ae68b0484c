//! The editor: the document, the tools, and the undo stack behind one
//! `user_input` entry point.
//!
//! ```text
//! raw input → translate (stage origin) → shortcut? ─yes→ document / router
//!                                             └─no──→ active tool
//! ```
//!
//! Keyboard shortcuts are handled here and never reach the tools. Every
//! other event goes to the active tool, which snaps and detects drags as it
//! needs.

use crate::commands::{Command, UndoStack};
use crate::config::EditorConfig;
use crate::error::InputError;
use crate::input::{Event, decode_script};
use crate::pipeline::{Log, Transform, TransformExt, Translate};
use crate::router::ToolRouter;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{CreateTool, SelectTool, ToolContext, ToolKind};
use dm_core::{Div, DivId, Document, SubscriptionId};

/// Summary of a JSON script run through [`Editor::user_input_json`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputReport {
    pub processed: usize,
    pub skipped: usize,
}

pub struct Editor {
    doc: Document,
    router: ToolRouter,
    undo: UndoStack,
    shortcuts: ShortcutMap,
    origin: Translate,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let mut doc = Document::new(config.grid);
        doc.set_hit_margin(config.hit_margin);
        let mut editor = Self {
            doc,
            router: ToolRouter::new(CreateTool::new(config.min_drag_moves), SelectTool::new()),
            undo: UndoStack::new(config.undo_depth),
            shortcuts: ShortcutMap::new(config.keys),
            origin: Translate::new(-config.stage_origin.x, -config.stage_origin.y),
        };
        let mut ctx = ToolContext {
            doc: &mut editor.doc,
            undo: &mut editor.undo,
        };
        editor.router.activate(&mut ctx);
        editor
    }

    // ─── Input ───────────────────────────────────────────────────────────

    pub fn user_input(&mut self, event: Event) {
        let events = (&mut self.origin).then(Log::new("input")).transform(event);
        for event in events {
            match self.shortcuts.resolve(&event) {
                Some(action) => self.run_shortcut(action),
                None => {
                    let mut ctx = ToolContext {
                        doc: &mut self.doc,
                        undo: &mut self.undo,
                    };
                    self.router.user_input(event, &mut ctx);
                }
            }
        }
    }

    /// Process events in receipt order.
    pub fn user_input_batch(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.user_input(event);
        }
    }

    /// Decode a JSON event object or array and process it. Entries that do
    /// not decode are skipped.
    pub fn user_input_json(&mut self, json: &str) -> Result<InputReport, InputError> {
        let decoded = decode_script(json)?;
        let report = InputReport {
            processed: decoded.events.len(),
            skipped: decoded.skipped,
        };
        self.user_input_batch(decoded.events);
        Ok(report)
    }

    fn run_shortcut(&mut self, action: ShortcutAction) {
        log::trace!("shortcut {action:?}");
        match action {
            ShortcutAction::ToolSelect => self.set_tool(ToolKind::Select),
            ShortcutAction::ToolCreate => self.set_tool(ToolKind::Create),
            ShortcutAction::IncreaseGrid => self.doc.increase_grid(),
            ShortcutAction::DecreaseGrid => self.doc.decrease_grid(),
            ShortcutAction::DeleteSelection => self.delete_selection(),
            ShortcutAction::Undo => {
                self.undo();
            }
        }
    }

    // ─── Commands ────────────────────────────────────────────────────────

    pub fn set_tool(&mut self, kind: ToolKind) {
        let mut ctx = ToolContext {
            doc: &mut self.doc,
            undo: &mut self.undo,
        };
        self.router.set_tool(kind, &mut ctx);
    }

    /// Delete the selected divs, recording the deletion for undo.
    pub fn delete_selection(&mut self) {
        let removed = self.doc.delete_selection();
        if !removed.is_empty() {
            self.undo.push(Command::RestoreDivs(removed));
        }
    }

    pub fn undo(&mut self) -> Option<&'static str> {
        self.undo.undo(&mut self.doc)
    }

    // ─── Reads ───────────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Direct access for property editors (border, color, padding, text).
    /// Every setter goes out on the document's change channel.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn divs(&self) -> &[Div] {
        self.doc.divs()
    }

    pub fn selection(&self) -> Vec<&Div> {
        self.doc.selection()
    }

    pub fn is_selected(&self, id: DivId) -> bool {
        self.doc.is_selected(id)
    }

    pub fn tool(&self) -> ToolKind {
        self.router.active()
    }

    pub fn tool_name(&self) -> &'static str {
        self.router.tool_name()
    }

    pub fn grid_size(&self) -> u32 {
        self.doc.grid_size()
    }

    /// Divs the select tool is highlighting. Empty while another tool is
    /// active.
    pub fn highlighted(&self) -> &[DivId] {
        self.router.select_tool().highlighted(&self.doc)
    }

    pub fn router(&self) -> &ToolRouter {
        &self.router
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    // ─── Subscriptions ───────────────────────────────────────────────────

    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) -> SubscriptionId {
        self.doc.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.doc.unsubscribe(id)
    }

    pub fn on_tool_changed(&mut self, observer: impl FnMut(ToolKind) + 'static) {
        self.router.on_tool_changed(observer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;
    use dm_core::{GridSize, Point};
    use pretty_assertions::assert_eq;

    #[test]
    fn shortcuts_do_not_reach_tools() {
        let mut editor = Editor::default();
        editor.user_input(Event::key_press("q"));
        assert_eq!(editor.tool_name(), "Select");
        editor.user_input(Event::key_press("c"));
        assert_eq!(editor.tool(), ToolKind::Create);
    }

    #[test]
    fn grid_shortcuts_double_and_halve() {
        let mut editor = Editor::default();
        editor.user_input_batch([Event::key_press("]"), Event::key_press("]")]);
        assert_eq!(editor.grid_size(), 64);
        editor.user_input_batch((0..10).map(|_| Event::key_press("[")));
        assert_eq!(editor.grid_size(), 1);
    }

    #[test]
    fn stage_origin_is_subtracted() {
        let mut editor = Editor::new(EditorConfig {
            stage_origin: Point::new(100.0, 50.0),
            ..EditorConfig::default()
        });
        editor.user_input_batch([
            Event::mouse_down(132.0, 82.0, MouseButton::PRIMARY),
            Event::mouse_move(228.0, 114.0),
            Event::mouse_up(228.0, 114.0, MouseButton::PRIMARY),
        ]);
        let div = &editor.divs()[0];
        assert_eq!(
            (div.left(), div.top(), div.width(), div.height()),
            (32.0, 32.0, 96.0, 32.0)
        );
    }

    #[test]
    fn delete_then_undo_restores() {
        let mut editor = Editor::default();
        let id = editor.document_mut().create_div(10.0, 10.0, 50.0, 50.0);
        editor.document_mut().select_only(id);
        editor.user_input(Event::key_down("Delete"));
        assert!(editor.divs().is_empty());
        assert!(editor.selection().is_empty());

        editor.user_input(Event::KeyDown {
            key: "z".into(),
            ctrl_key: true,
        });
        assert_eq!(editor.divs().len(), 1);
        assert_eq!(editor.divs()[0].id(), id);
        assert!(!editor.is_selected(id));
    }

    #[test]
    fn json_report_counts_skipped() {
        let mut editor = Editor::default();
        let report = editor
            .user_input_json(
                r#"[{"name": "keyPress", "key": "q"}, {"name": "bogus"}, {"name": "mouseMove"}]"#,
            )
            .unwrap();
        assert_eq!(
            report,
            InputReport {
                processed: 1,
                skipped: 2
            }
        );
        assert_eq!(editor.tool_name(), "Select");
    }

    #[test]
    fn zero_grid_still_discards_bare_click() {
        let config = EditorConfig {
            grid: GridSize {
                size: 0,
                min: 0,
                max: 0,
            },
            ..EditorConfig::default()
        };
        let mut editor = Editor::new(config);
        assert_eq!(editor.grid_size(), 1);
        editor.user_input_batch([
            Event::mouse_down(100.0, 100.0, MouseButton::PRIMARY),
            Event::mouse_up(100.0, 100.0, MouseButton::PRIMARY),
        ]);
        assert!(editor.divs().is_empty());
    }

    #[test]
    fn config_reaches_document() {
        let editor = Editor::new(EditorConfig {
            hit_margin: 2.0,
            ..EditorConfig::default()
        });
        assert_eq!(editor.document().hit_margin(), 2.0);
    }
}
