//! The document: divs in paint order, the selection, and the snapping grid.
//!
//! `Document` is the single owner of every [`Div`]. Tools and the editor
//! refer to divs by [`DivId`] only, so a released or deleted div can never
//! be reached through a stale reference.
//!
//! ## Invariants
//!
//! - Paint order is insertion order; the last div is the topmost.
//! - The selection is a subset of the live divs. Every mutating method
//!   prunes it before observers run, so no observer ever sees a stale id.
//!
//! ## Change notification
//!
//! Observers are zero-argument callbacks run synchronously, in subscription
//! order, after every mutation. There is no batching. An observer that
//! reaches back into the document (e.g. through a shared `RefCell`) and
//! mutates it would re-enter notification; such handles must defer the
//! mutation until the current input has been processed.

use crate::geometry::{Bounds, Point};
use crate::grid::GridSize;
use crate::id::{DivId, IdAllocator};
use crate::model::{Color, Div};
use smallvec::SmallVec;
use std::fmt;

/// Default fuzzy margin for [`Document::find_div_at`].
pub const DEFAULT_HIT_MARGIN: f32 = 5.0;

/// Handle returned by [`Document::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut()>;

pub struct Document {
    divs: Vec<Div>,
    selection: SmallVec<[DivId; 4]>,
    grid: GridSize,
    hit_margin: f32,
    ids: IdAllocator,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("divs", &self.divs)
            .field("selection", &self.selection)
            .field("grid", &self.grid)
            .field("hit_margin", &self.hit_margin)
            .field("observers", &format!("<{} observers>", self.observers.len()))
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(GridSize::default())
    }
}

impl Document {
    pub fn new(grid: GridSize) -> Self {
        Self::with_ids(grid, IdAllocator::new())
    }

    /// Build a document drawing ids from `ids`. The grid is re-clamped
    /// into its bounds, with a floor of 1.
    pub fn with_ids(grid: GridSize, ids: IdAllocator) -> Self {
        Self {
            divs: Vec::new(),
            selection: SmallVec::new(),
            grid: GridSize::new(grid.size, grid.min, grid.max),
            hit_margin: DEFAULT_HIT_MARGIN,
            ids,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn set_hit_margin(&mut self, margin: f32) {
        self.hit_margin = margin.max(0.0);
    }

    pub fn hit_margin(&self) -> f32 {
        self.hit_margin
    }

    // ─── Reads ───────────────────────────────────────────────────────────

    /// All divs in paint order.
    pub fn divs(&self) -> &[Div] {
        &self.divs
    }

    pub fn len(&self) -> usize {
        self.divs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.divs.is_empty()
    }

    pub fn get(&self, id: DivId) -> Option<&Div> {
        self.divs.iter().find(|d| d.id() == id)
    }

    pub fn contains(&self, id: DivId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: DivId) -> Option<usize> {
        self.divs.iter().position(|d| d.id() == id)
    }

    /// Topmost div whose bounds, widened by the hit margin, contain `p`.
    pub fn find_div_at(&self, p: Point) -> Option<DivId> {
        self.divs
            .iter()
            .rev()
            .find(|d| d.bounds().contains_fuzzy(p, self.hit_margin))
            .map(Div::id)
    }

    // ─── Creation & deletion ─────────────────────────────────────────────

    /// Append a new div on top of the stack.
    pub fn create_div(&mut self, left: f32, top: f32, width: f32, height: f32) -> DivId {
        let id = self.ids.allocate();
        self.divs.push(Div::new(id, Bounds::new(left, top, width, height)));
        log::debug!("created div {id} at ({left}, {top}) {width}x{height}");
        self.changed();
        id
    }

    /// Remove one div. Returns it if it was present.
    pub fn delete_div(&mut self, id: DivId) -> Option<Div> {
        let idx = self.index_of(id)?;
        let div = self.divs.remove(idx);
        log::debug!("deleted div {id}");
        self.changed();
        Some(div)
    }

    /// Remove every div in `ids` in one mutation. Returns the removed divs
    /// paired with the paint index they held, lowest index first.
    pub fn delete_divs(&mut self, ids: &[DivId]) -> Vec<(usize, Div)> {
        if ids.is_empty() {
            return Vec::new();
        }
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.divs.len());
        for (idx, div) in std::mem::take(&mut self.divs).into_iter().enumerate() {
            if ids.contains(&div.id()) {
                removed.push((idx, div));
            } else {
                kept.push(div);
            }
        }
        self.divs = kept;
        if !removed.is_empty() {
            log::debug!("deleted {} div(s)", removed.len());
            self.changed();
        }
        removed
    }

    /// Remove the selected divs. The selection ends up empty.
    pub fn delete_selection(&mut self) -> Vec<(usize, Div)> {
        let ids: SmallVec<[DivId; 4]> = self.selection.clone();
        self.delete_divs(&ids)
    }

    /// Put previously removed divs back at their recorded paint indices.
    /// `entries` must be ordered by ascending index, as
    /// [`delete_divs`](Self::delete_divs) returns them.
    pub fn restore_divs(&mut self, entries: Vec<(usize, Div)>) {
        if entries.is_empty() {
            return;
        }
        for (idx, div) in entries {
            if self.contains(div.id()) {
                continue;
            }
            let idx = idx.min(self.divs.len());
            self.divs.insert(idx, div);
        }
        self.changed();
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn selection_ids(&self) -> &[DivId] {
        &self.selection
    }

    /// Selected divs in selection order.
    pub fn selection(&self) -> Vec<&Div> {
        self.selection.iter().filter_map(|id| self.get(*id)).collect()
    }

    pub fn is_selected(&self, id: DivId) -> bool {
        self.selection.contains(&id)
    }

    /// Replace the selection. Unknown ids and duplicates are dropped.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = DivId>) {
        let mut next: SmallVec<[DivId; 4]> = SmallVec::new();
        for id in ids {
            if self.contains(id) && !next.contains(&id) {
                next.push(id);
            }
        }
        self.selection = next;
        self.changed();
    }

    pub fn select_only(&mut self, id: DivId) {
        self.set_selection([id]);
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(std::iter::empty());
    }

    /// Add `id` to the selection, or remove it if already selected.
    pub fn toggle_selected(&mut self, id: DivId) {
        if let Some(pos) = self.selection.iter().position(|s| *s == id) {
            self.selection.remove(pos);
            self.changed();
        } else if self.contains(id) {
            self.selection.push(id);
            self.changed();
        }
    }

    // ─── Grid ────────────────────────────────────────────────────────────

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn grid_size(&self) -> u32 {
        self.grid.get()
    }

    pub fn increase_grid(&mut self) {
        if self.grid.increase() {
            log::debug!("grid size -> {}", self.grid.get());
            self.changed();
        }
    }

    pub fn decrease_grid(&mut self) {
        if self.grid.decrease() {
            log::debug!("grid size -> {}", self.grid.get());
            self.changed();
        }
    }

    // ─── Div mutation ────────────────────────────────────────────────────

    /// Returns `false` if the div does not exist.
    pub fn set_bounds(&mut self, id: DivId, bounds: Bounds) -> bool {
        self.update(id, |d| d.set_bounds(bounds))
    }

    /// Move a div's top-left corner, keeping its size.
    pub fn move_div(&mut self, id: DivId, origin: Point) -> bool {
        self.update(id, |d| d.move_to(origin))
    }

    pub fn set_border_width(&mut self, id: DivId, width: f32) -> bool {
        self.update(id, |d| d.border_width = width)
    }

    pub fn set_border_radius(&mut self, id: DivId, radius: f32) -> bool {
        self.update(id, |d| d.border_radius = radius)
    }

    pub fn set_background_color(&mut self, id: DivId, color: Color) -> bool {
        self.update(id, |d| d.background_color = color)
    }

    pub fn set_padding(&mut self, id: DivId, padding: f32) -> bool {
        self.update(id, |d| d.padding = padding)
    }

    pub fn set_text(&mut self, id: DivId, text: impl Into<String>) -> bool {
        let text = text.into();
        self.update(id, |d| d.text = text)
    }

    fn update(&mut self, id: DivId, f: impl FnOnce(&mut Div)) -> bool {
        let Some(div) = self.divs.iter_mut().find(|d| d.id() == id) else {
            return false;
        };
        f(div);
        self.changed();
        true
    }

    // ─── Observers ───────────────────────────────────────────────────────

    /// Register a callback run after every mutation.
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    fn changed(&mut self) {
        let divs = &self.divs;
        self.selection.retain(|id| divs.iter().any(|d| d.id() == *id));
        for (_, observer) in self.observers.iter_mut() {
            observer();
        }
    }
}
