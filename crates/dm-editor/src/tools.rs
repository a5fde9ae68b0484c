//! Tool system for stage interactions.
//!
//! Each tool interprets pointer input and mutates the [`Document`] through
//! a [`ToolContext`]. Tools hold divs by [`DivId`] only, and drop the id as
//! soon as the gesture that needed it is over.
//!
//! | Tool | Down | Move | Up | Click |
//! |------|------|------|----|-------|
//! | **Create** | start a div | stretch it | keep or discard | ignored |
//! | **Select** | start moving if on a selected div | move | select under pointer | select / ctrl toggles |

use crate::commands::{Command, UndoStack};
use crate::drag::DragDetector;
use crate::input::{Drag, Event, MouseButton};
use crate::pipeline::{Log, Transform, TransformExt};
use crate::snap::GridSnapper;
use dm_core::{DivId, Document, Point, bounds_of};

/// The tools the router can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Create,
    Select,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Create => "Create",
            ToolKind::Select => "Select",
        }
    }
}

/// What a tool may touch while handling input.
pub struct ToolContext<'a> {
    pub doc: &'a mut Document,
    pub undo: &'a mut UndoStack,
}

pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Called when the tool becomes active.
    fn load(&mut self, ctx: &mut ToolContext<'_>);

    /// Called when another tool takes over. Releases any affordance the
    /// tool is showing and finishes an in-flight gesture.
    fn unload(&mut self, ctx: &mut ToolContext<'_>);

    fn user_input(&mut self, event: Event, ctx: &mut ToolContext<'_>);
}

// ─── Create Tool ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum CreateState {
    Ready,
    Dragging { start: Point, id: DivId, moves: u32 },
}

/// Drags out new divs with the primary button.
///
/// Input runs through `snap → drag detector`, so the tool only ever sees
/// grid-aligned drag gestures.
pub struct CreateTool {
    drag: DragDetector,
    state: CreateState,
    min_drag_moves: u32,
    /// Snapped crosshair position, while loaded and the pointer is known.
    cursor: Option<Point>,
}

impl Default for CreateTool {
    fn default() -> Self {
        Self::new(2)
    }
}

impl CreateTool {
    pub fn new(min_drag_moves: u32) -> Self {
        Self {
            drag: DragDetector::new(MouseButton::PRIMARY),
            state: CreateState::Ready,
            min_drag_moves,
            cursor: None,
        }
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, CreateState::Dragging { .. })
    }

    /// The div being dragged out, if any.
    pub fn pending(&self) -> Option<DivId> {
        match self.state {
            CreateState::Dragging { id, .. } => Some(id),
            CreateState::Ready => None,
        }
    }

    fn on_gesture(&mut self, event: Event, ctx: &mut ToolContext<'_>) {
        match (event, self.state) {
            (Event::DragStart(Drag { start, .. }), CreateState::Ready) => {
                let id = ctx.doc.create_div(start.x, start.y, 0.0, 0.0);
                self.state = CreateState::Dragging {
                    start,
                    id,
                    moves: 0,
                };
            }
            (Event::DragStart(_), CreateState::Dragging { .. }) => {
                log::trace!("create: already dragging, ignoring drag start");
            }
            (Event::Dragging(Drag { end, .. }), CreateState::Dragging { start, id, moves }) => {
                ctx.doc.set_bounds(id, bounds_of(start, end));
                self.state = CreateState::Dragging {
                    start,
                    id,
                    moves: moves + 1,
                };
            }
            (Event::DragEnd(Drag { end, .. }), CreateState::Dragging { start, id, moves }) => {
                self.state = CreateState::Ready;
                let bounds = bounds_of(start, end);
                ctx.doc.set_bounds(id, bounds);

                let cell = ctx.doc.grid().as_f32();
                let stray = moves < self.min_drag_moves
                    && bounds.width < cell
                    && bounds.height < cell;
                if stray {
                    log::debug!("create: discarding div {id} ({moves} move(s))");
                    ctx.doc.delete_div(id);
                } else {
                    ctx.undo.push(Command::RemoveDiv(id));
                }
            }
            _ => {}
        }
    }
}

impl Tool for CreateTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Create
    }

    fn load(&mut self, _ctx: &mut ToolContext<'_>) {
        self.cursor = None;
    }

    fn unload(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(end) = self.drag.finish() {
            self.on_gesture(end, ctx);
        }
        self.cursor = None;
    }

    fn user_input(&mut self, event: Event, ctx: &mut ToolContext<'_>) {
        let snapper = GridSnapper::new(ctx.doc.grid_size());
        if let Some(p) = event.position() {
            self.cursor = Some(snapper.snap(p));
        }
        let gestures = snapper
            .then(&mut self.drag)
            .then(Log::new("create"))
            .transform(event);
        for gesture in gestures {
            self.on_gesture(gesture, ctx);
        }
    }
}

// ─── Select Tool ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct MoveGesture {
    /// Snapped press point.
    start: Point,
    /// Origin of every div being moved, at press time.
    origins: Vec<(DivId, Point)>,
    moved: bool,
}

/// Selects divs under the pointer and moves the selection.
///
/// Selection changes on release or click, never on press: the press has to
/// check first whether it landed on an already-selected div to start a move.
#[derive(Debug, Default)]
pub struct SelectTool {
    moving: Option<MoveGesture>,
    /// Set after a move, so the click the browser fires on release does not
    /// collapse the selection.
    suppress_click: bool,
    loaded: bool,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_moving(&self) -> bool {
        self.moving.is_some()
    }

    /// Divs drawn with the selection highlight: the document's selection
    /// while the tool is loaded, nothing otherwise.
    pub fn highlighted<'d>(&self, doc: &'d Document) -> &'d [DivId] {
        if self.loaded {
            doc.selection_ids()
        } else {
            &[]
        }
    }

    fn begin_move(&mut self, p: Point, doc: &Document) {
        let snapper = GridSnapper::new(doc.grid_size());
        let origins = doc
            .selection()
            .iter()
            .map(|d| (d.id(), d.origin()))
            .collect();
        log::trace!("select: begin move at {p:?}");
        self.moving = Some(MoveGesture {
            start: snapper.snap(p),
            origins,
            moved: false,
        });
    }

    fn select_at(&self, p: Point, doc: &mut Document) {
        match doc.find_div_at(p) {
            Some(id) => doc.select_only(id),
            None => doc.clear_selection(),
        }
    }
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn load(&mut self, _ctx: &mut ToolContext<'_>) {
        self.loaded = true;
    }

    fn unload(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(gesture) = self.moving.take()
            && gesture.moved
        {
            ctx.undo.push(Command::MoveDivs(gesture.origins));
        }
        self.loaded = false;
        self.suppress_click = false;
    }

    fn user_input(&mut self, event: Event, ctx: &mut ToolContext<'_>) {
        match event {
            Event::MouseDown { x, y, button, .. }
                if button == MouseButton::PRIMARY && self.moving.is_none() =>
            {
                self.suppress_click = false;
                let p = Point::new(x, y);
                if let Some(hit) = ctx.doc.find_div_at(p)
                    && ctx.doc.is_selected(hit)
                {
                    self.begin_move(p, ctx.doc);
                }
            }
            Event::MouseMove { x, y } => {
                let snapper = GridSnapper::new(ctx.doc.grid_size());
                if let Some(gesture) = self.moving.as_mut() {
                    let (dx, dy) = snapper.snap(Point::new(x, y)).delta(gesture.start);
                    for (id, origin) in &gesture.origins {
                        ctx.doc.move_div(*id, origin.offset(dx, dy));
                    }
                    gesture.moved |= dx != 0.0 || dy != 0.0;
                }
            }
            Event::MouseUp { x, y, ctrl_key, .. } => {
                if let Some(gesture) = self.moving.take() {
                    if gesture.moved {
                        self.suppress_click = true;
                        ctx.undo.push(Command::MoveDivs(gesture.origins));
                    }
                } else if !ctrl_key {
                    self.select_at(Point::new(x, y), ctx.doc);
                }
            }
            Event::MouseClick { x, y, ctrl_key, .. } => {
                if std::mem::take(&mut self.suppress_click) {
                    return;
                }
                let p = Point::new(x, y);
                if ctrl_key {
                    if let Some(hit) = ctx.doc.find_div_at(p) {
                        ctx.doc.toggle_selected(hit);
                    }
                } else {
                    self.select_at(p, ctx.doc);
                }
            }
            _ => {}
        }
    }
}
