//! Drag detection: raw press/move/release into drag gestures.

use crate::input::{Drag, Event, MouseButton};
use crate::pipeline::{Events, Transform};
use dm_core::Point;
use smallvec::smallvec;

/// Turns `mouseDown → mouseMove* → mouseUp` on one button into
/// `dragStart → dragging* → dragEnd`.
///
/// Consumes every event: raw mouse events are not forwarded, and anything
/// that is not part of a gesture on `button` produces no output. A second
/// press on `button` while a drag is open is ignored; the open drag keeps
/// its start point until the release arrives.
#[derive(Debug, Clone)]
pub struct DragDetector {
    button: MouseButton,
    dragging: bool,
    start: Point,
    last: Point,
}

impl Default for DragDetector {
    fn default() -> Self {
        Self::new(MouseButton::PRIMARY)
    }
}

impl DragDetector {
    pub fn new(button: MouseButton) -> Self {
        Self {
            button,
            dragging: false,
            start: Point::ORIGIN,
            last: Point::ORIGIN,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Close an open drag at the last seen point, as if the button had been
    /// released there.
    pub fn finish(&mut self) -> Option<Event> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        Some(Event::DragEnd(Drag {
            start: self.start,
            end: self.last,
        }))
    }
}

impl Transform for DragDetector {
    fn transform(&mut self, event: Event) -> Events {
        match event {
            Event::MouseDown { x, y, button, .. } if button == self.button => {
                if self.dragging {
                    log::trace!("drag: ignoring second press at ({x}, {y})");
                    return Events::new();
                }
                let p = Point::new(x, y);
                self.dragging = true;
                self.start = p;
                self.last = p;
                smallvec![Event::DragStart(Drag { start: p, end: p })]
            }
            Event::MouseMove { x, y } if self.dragging => {
                self.last = Point::new(x, y);
                smallvec![Event::Dragging(Drag {
                    start: self.start,
                    end: self.last,
                })]
            }
            Event::MouseUp { x, y, button, .. } if button == self.button && self.dragging => {
                self.dragging = false;
                self.last = Point::new(x, y);
                smallvec![Event::DragEnd(Drag {
                    start: self.start,
                    end: self.last,
                })]
            }
            _ => Events::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::TransformExt;
    use pretty_assertions::assert_eq;

    fn drag(sx: f32, sy: f32, ex: f32, ey: f32) -> Drag {
        Drag {
            start: Point::new(sx, sy),
            end: Point::new(ex, ey),
        }
    }

    #[test]
    fn full_gesture() {
        let mut detector = DragDetector::default();
        let out = detector.run_all([
            Event::mouse_move(50.0, 50.0),
            Event::mouse_down(32.0, 32.0, MouseButton::PRIMARY),
            Event::mouse_move(64.0, 48.0),
            Event::mouse_move(128.0, 64.0),
            Event::mouse_up(128.0, 64.0, MouseButton::PRIMARY),
            Event::mouse_move(50.0, 50.0),
        ]);
        assert_eq!(
            out,
            vec![
                Event::DragStart(drag(32.0, 32.0, 32.0, 32.0)),
                Event::Dragging(drag(32.0, 32.0, 64.0, 48.0)),
                Event::Dragging(drag(32.0, 32.0, 128.0, 64.0)),
                Event::DragEnd(drag(32.0, 32.0, 128.0, 64.0)),
            ]
        );
        assert!(!detector.is_dragging());
    }

    #[test]
    fn other_buttons_are_swallowed() {
        let mut detector = DragDetector::new(MouseButton::PRIMARY);
        let out = detector.run_all([
            Event::mouse_down(100.0, 100.0, MouseButton::MIDDLE),
            Event::mouse_move(200.0, 150.0),
            Event::mouse_up(200.0, 150.0, MouseButton::MIDDLE),
            Event::key_press("q"),
        ]);
        assert!(out.is_empty());
    }

    #[test]
    fn second_press_keeps_the_open_drag() {
        let mut detector = DragDetector::default();
        let out = detector.run_all([
            Event::mouse_down(0.0, 0.0, MouseButton::PRIMARY),
            Event::mouse_down(10.0, 10.0, MouseButton::PRIMARY),
            Event::mouse_up(20.0, 20.0, MouseButton::PRIMARY),
        ]);
        assert_eq!(
            out,
            vec![
                Event::DragStart(drag(0.0, 0.0, 0.0, 0.0)),
                Event::DragEnd(drag(0.0, 0.0, 20.0, 20.0)),
            ]
        );
    }

    #[test]
    fn release_of_other_button_does_not_end_drag() {
        let mut detector = DragDetector::default();
        detector.transform(Event::mouse_down(0.0, 0.0, MouseButton::PRIMARY));
        let out = detector.transform(Event::mouse_up(5.0, 5.0, MouseButton::SECONDARY));
        assert!(out.is_empty());
        assert!(detector.is_dragging());
    }

    #[test]
    fn finish_closes_at_last_point() {
        let mut detector = DragDetector::default();
        assert_eq!(detector.finish(), None);
        detector.run_all([
            Event::mouse_down(0.0, 0.0, MouseButton::PRIMARY),
            Event::mouse_move(30.0, 40.0),
        ]);
        assert_eq!(
            detector.finish(),
            Some(Event::DragEnd(drag(0.0, 0.0, 30.0, 40.0)))
        );
        assert!(!detector.is_dragging());
    }
}
