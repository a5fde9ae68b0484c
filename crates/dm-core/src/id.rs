use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a div. Allocated once and never reused, so it doubles as a
/// stable diffing key for the presentation layer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DivId(u64);

impl DivId {
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for DivId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for DivId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source owned by a [`Document`](crate::Document).
///
/// Each document counts from its own starting point, so two documents built
/// the same way hand out the same ids.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    pub fn allocate(&mut self) -> DivId {
        let id = DivId(self.next);
        self.next += 1;
        id
    }
}
