//! Undo stack.
//!
//! Tools push the inverse of each committed action as a typed [`Command`].
//! Undo pops the most recent one and applies it to the document. There is
//! no redo.

use dm_core::{Div, DivId, Document, Point};

/// An inverse action, ready to be applied on undo.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Undo a creation.
    RemoveDiv(DivId),
    /// Undo a deletion: put divs back at their paint indices.
    RestoreDivs(Vec<(usize, Div)>),
    /// Undo a move: put each div's origin back.
    MoveDivs(Vec<(DivId, Point)>),
}

impl Command {
    pub fn description(&self) -> &'static str {
        match self {
            Command::RemoveDiv(_) => "create div",
            Command::RestoreDivs(_) => "delete selection",
            Command::MoveDivs(_) => "move selection",
        }
    }

    pub fn apply(self, doc: &mut Document) {
        match self {
            Command::RemoveDiv(id) => {
                doc.delete_div(id);
            }
            Command::RestoreDivs(entries) => doc.restore_divs(entries),
            Command::MoveDivs(origins) => {
                for (id, origin) in origins {
                    doc.move_div(id, origin);
                }
            }
        }
    }
}

pub struct UndoStack {
    stack: Vec<Command>,
    /// Maximum undo depth; the oldest command is dropped past it.
    max_depth: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(100)
    }
}

impl UndoStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn push(&mut self, command: Command) {
        log::debug!("undo: push {}", command.description());
        self.stack.push(command);
        if self.stack.len() > self.max_depth {
            self.stack.remove(0);
        }
    }

    /// Apply the most recent inverse. Returns its description.
    pub fn undo(&mut self, doc: &mut Document) -> Option<&'static str> {
        let command = self.stack.pop()?;
        let desc = command.description();
        log::debug!("undo: {desc}");
        command.apply(doc);
        Some(desc)
    }

    pub fn can_undo(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn peek(&self) -> Option<&Command> {
        self.stack.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn undo_is_lifo() {
        let mut doc = Document::default();
        let mut stack = UndoStack::new(10);
        let a = doc.create_div(0.0, 0.0, 10.0, 10.0);
        stack.push(Command::RemoveDiv(a));
        let b = doc.create_div(20.0, 20.0, 10.0, 10.0);
        stack.push(Command::RemoveDiv(b));

        assert_eq!(stack.undo(&mut doc), Some("create div"));
        assert!(doc.contains(a));
        assert!(!doc.contains(b));
        stack.undo(&mut doc);
        assert!(doc.is_empty());
        assert_eq!(stack.undo(&mut doc), None);
    }

    #[test]
    fn restore_and_move_inverses() {
        let mut doc = Document::default();
        let mut stack = UndoStack::default();
        let a = doc.create_div(0.0, 0.0, 10.0, 10.0);
        let b = doc.create_div(20.0, 20.0, 10.0, 10.0);

        doc.move_div(b, Point::new(50.0, 60.0));
        stack.push(Command::MoveDivs(vec![(b, Point::new(20.0, 20.0))]));

        doc.select_only(a);
        let removed = doc.delete_selection();
        stack.push(Command::RestoreDivs(removed));

        stack.undo(&mut doc);
        assert_eq!(doc.index_of(a), Some(0));

        assert_eq!(stack.undo(&mut doc), Some("move selection"));
        assert_eq!(doc.get(b).unwrap().origin(), Point::new(20.0, 20.0));
    }

    #[test]
    fn depth_limit_drops_oldest() {
        let mut doc = Document::default();
        let mut stack = UndoStack::new(2);
        let ids: Vec<DivId> = (0..3)
            .map(|i| doc.create_div(i as f32, 0.0, 1.0, 1.0))
            .collect();
        for id in &ids {
            stack.push(Command::RemoveDiv(*id));
        }
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek(), Some(&Command::RemoveDiv(ids[2])));
        stack.undo(&mut doc);
        stack.undo(&mut doc);
        assert!(!stack.can_undo());
        assert_eq!(doc.len(), 1);
        assert!(doc.contains(ids[0]));
    }
}
