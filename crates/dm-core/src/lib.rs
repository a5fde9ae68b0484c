pub mod document;
pub mod geometry;
pub mod grid;
pub mod id;
pub mod model;

pub use document::{Document, SubscriptionId};
pub use geometry::{Bounds, Point, bounds_of};
pub use grid::GridSize;
pub use id::{DivId, IdAllocator};
pub use model::{Color, Div};
