//! Grid snapping.

use crate::input::Event;
use crate::pipeline::{Events, Transform};
use dm_core::Point;
use smallvec::smallvec;

/// Round `v` to the nearest multiple of `grid`. Exact halves round up.
pub fn snap_value(grid: f32, v: f32) -> f32 {
    (v / grid + 0.5).floor() * grid
}

pub fn snap_point(grid: f32, p: Point) -> Point {
    Point::new(snap_value(grid, p.x), snap_value(grid, p.y))
}

/// Stage that snaps every point an event carries to the grid.
///
/// Stateless between calls; the grid size is read from the document when
/// the stage is built, so a grid change takes effect on the next event.
#[derive(Debug, Clone, Copy)]
pub struct GridSnapper {
    grid: f32,
}

impl GridSnapper {
    pub fn new(grid: u32) -> Self {
        Self {
            grid: grid.max(1) as f32,
        }
    }

    pub fn snap(&self, p: Point) -> Point {
        snap_point(self.grid, p)
    }
}

impl Transform for GridSnapper {
    fn transform(&mut self, event: Event) -> Events {
        let grid = self.grid;
        smallvec![event.map_points(|p| snap_point(grid, p))]
    }
}
