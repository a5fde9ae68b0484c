//! Integration tests: drag gestures through the editor create divs
//! (dm-editor → dm-core).

use dm_core::Bounds;
use dm_editor::{Editor, Event, MouseButton};
use pretty_assertions::assert_eq;

const LEFT: MouseButton = MouseButton::PRIMARY;

fn bounds_of_only_div(editor: &Editor) -> Bounds {
    assert_eq!(editor.divs().len(), 1, "expected exactly one div");
    editor.divs()[0].bounds()
}

// ─── Creating ───────────────────────────────────────────────────────────

#[test]
fn left_drag_creates_one_div() {
    let mut editor = Editor::default();
    assert_eq!(editor.grid_size(), 16);
    editor.user_input_batch([
        Event::mouse_move(50.0, 50.0),
        Event::mouse_down(32.0, 32.0, LEFT),
        Event::mouse_move(128.0, 64.0),
        Event::mouse_up(128.0, 64.0, LEFT),
        Event::mouse_move(50.0, 50.0),
    ]);
    assert_eq!(bounds_of_only_div(&editor), Bounds::new(32.0, 32.0, 96.0, 32.0));
}

#[test]
fn same_script_as_json() {
    let mut editor = Editor::default();
    let report = editor
        .user_input_json(
            r#"[
                {"name": "mouseMove", "x": 50, "y": 50},
                {"name": "mouseDown", "x": 32, "y": 32, "button": 0},
                {"name": "mouseMove", "x": 128, "y": 64},
                {"name": "mouseUp", "x": 128, "y": 64, "button": 0},
                {"name": "mouseMove", "x": 50, "y": 50}
            ]"#,
        )
        .unwrap();
    assert_eq!(report.processed, 5);
    assert_eq!(bounds_of_only_div(&editor), Bounds::new(32.0, 32.0, 96.0, 32.0));
}

#[test]
fn drag_in_every_direction_is_normalized() {
    let corners = [(32.0, 32.0), (128.0, 32.0), (32.0, 64.0), (128.0, 64.0)];
    for &(sx, sy) in &corners {
        let (ex, ey) = (160.0 - sx, 96.0 - sy);
        let mut editor = Editor::default();
        editor.user_input_batch([
            Event::mouse_down(sx, sy, LEFT),
            Event::mouse_move((sx + ex) / 2.0, (sy + ey) / 2.0),
            Event::mouse_move(ex, ey),
            Event::mouse_up(ex, ey, LEFT),
        ]);
        assert_eq!(
            bounds_of_only_div(&editor),
            Bounds::new(32.0, 32.0, 96.0, 32.0),
            "drag from ({sx}, {sy}) to ({ex}, {ey})"
        );
    }
}

#[test]
fn other_buttons_create_nothing() {
    for button in [MouseButton::MIDDLE, MouseButton::SECONDARY] {
        let mut editor = Editor::default();
        editor.user_input_batch([
            Event::mouse_down(100.0, 100.0, button),
            Event::mouse_move(150.0, 120.0),
            Event::mouse_move(200.0, 150.0),
            Event::mouse_up(200.0, 150.0, button),
        ]);
        assert!(editor.divs().is_empty());
    }
}

#[test]
fn bare_click_creates_nothing() {
    let mut editor = Editor::default();
    editor.user_input_batch([
        Event::mouse_down(100.0, 100.0, LEFT),
        Event::mouse_up(100.0, 100.0, LEFT),
    ]);
    assert!(editor.divs().is_empty());
    assert!(!editor.undo_stack().can_undo());
}

#[test]
fn jitter_below_threshold_creates_nothing() {
    let mut editor = Editor::default();
    editor.user_input_batch([
        Event::mouse_down(100.0, 100.0, LEFT),
        Event::mouse_move(101.0, 99.0),
        Event::mouse_up(101.0, 99.0, LEFT),
    ]);
    assert!(editor.divs().is_empty());
}

#[test]
fn pending_div_is_visible_while_dragging() {
    let mut editor = Editor::default();
    editor.user_input_batch([
        Event::mouse_down(0.0, 0.0, LEFT),
        Event::mouse_move(64.0, 32.0),
    ]);
    assert_eq!(bounds_of_only_div(&editor), Bounds::new(0.0, 0.0, 64.0, 32.0));
    assert_eq!(
        editor.router().create_tool().pending(),
        Some(editor.divs()[0].id())
    );
}

#[test]
fn ids_are_unique_and_increasing() {
    let mut editor = Editor::default();
    for i in 0..3 {
        let x = i as f32 * 200.0;
        editor.user_input_batch([
            Event::mouse_down(x, 0.0, LEFT),
            Event::mouse_move(x + 64.0, 64.0),
            Event::mouse_move(x + 96.0, 96.0),
            Event::mouse_up(x + 96.0, 96.0, LEFT),
        ]);
    }
    let ids: Vec<_> = editor.divs().iter().map(|d| d.id()).collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn grid_change_applies_to_next_gesture() {
    let mut editor = Editor::default();
    editor.user_input(Event::key_press("["));
    assert_eq!(editor.grid_size(), 8);
    editor.user_input_batch([
        Event::mouse_down(9.0, 9.0, LEFT),
        Event::mouse_move(20.0, 20.0),
        Event::mouse_move(41.0, 23.0),
        Event::mouse_up(41.0, 23.0, LEFT),
    ]);
    assert_eq!(bounds_of_only_div(&editor), Bounds::new(8.0, 8.0, 32.0, 16.0));
}

// ─── Undo ───────────────────────────────────────────────────────────────

#[test]
fn undo_removes_created_div() {
    let mut editor = Editor::default();
    editor.user_input_batch([
        Event::mouse_down(0.0, 0.0, LEFT),
        Event::mouse_move(32.0, 32.0),
        Event::mouse_move(64.0, 64.0),
        Event::mouse_up(64.0, 64.0, LEFT),
    ]);
    assert_eq!(editor.divs().len(), 1);
    assert_eq!(editor.undo(), Some("create div"));
    assert!(editor.divs().is_empty());
    assert_eq!(editor.undo(), None);
}
