//! Composable event transformers.
//!
//! A [`Transform`] maps one event to zero or more events: it may drop the
//! event, pass it through, rewrite it, or fan it out. Stages chain left to
//! right; every output of stage *i* is fed to stage *i + 1* in order and
//! the results are concatenated:
//!
//! ```text
//! out = flat_map(f_n, ... flat_map(f_2, f_1(e)))
//! ```
//!
//! Everything runs synchronously on the caller's thread. Gesture detection,
//! snapping, coordinate translation and logging are all stages.

use crate::input::Event;
use smallvec::{SmallVec, smallvec};

/// Output of a single transform step. Most stages emit zero or one event.
pub type Events = SmallVec<[Event; 2]>;

pub trait Transform {
    fn transform(&mut self, event: Event) -> Events;
}

impl<T: Transform + ?Sized> Transform for &mut T {
    fn transform(&mut self, event: Event) -> Events {
        (**self).transform(event)
    }
}

impl<T: Transform + ?Sized> Transform for Box<T> {
    fn transform(&mut self, event: Event) -> Events {
        (**self).transform(event)
    }
}

/// Static composition helpers, available on every [`Transform`].
pub trait TransformExt: Transform + Sized {
    /// Feed every output of `self` into `next`.
    fn then<B: Transform>(self, next: B) -> Then<Self, B> {
        Then { first: self, next }
    }

    /// Run a batch of inputs, in order, and collect every output.
    fn run_all(&mut self, events: impl IntoIterator<Item = Event>) -> Vec<Event> {
        events
            .into_iter()
            .flat_map(|e| self.transform(e))
            .collect()
    }
}

impl<T: Transform> TransformExt for T {}

/// Two stages chained. Built with [`TransformExt::then`].
pub struct Then<A, B> {
    first: A,
    next: B,
}

impl<A: Transform, B: Transform> Transform for Then<A, B> {
    fn transform(&mut self, event: Event) -> Events {
        let mut out = Events::new();
        for e in self.first.transform(event) {
            out.extend(self.next.transform(e));
        }
        out
    }
}

/// A runtime-assembled chain of boxed stages.
#[derive(Default)]
pub struct Pipe {
    stages: Vec<Box<dyn Transform>>,
}

impl Pipe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(mut self, stage: impl Transform + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Transform for Pipe {
    fn transform(&mut self, event: Event) -> Events {
        let mut buffer: Events = smallvec![event];
        for stage in &mut self.stages {
            let mut next = Events::new();
            for e in buffer {
                next.extend(stage.transform(e));
            }
            if next.is_empty() {
                return next;
            }
            buffer = next;
        }
        buffer
    }
}

/// Wraps a closure as a stage. See [`from_fn`].
pub struct FromFn<F>(F);

/// Turn `FnMut(Event) -> Events` into a [`Transform`].
pub fn from_fn<F: FnMut(Event) -> Events>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<F: FnMut(Event) -> Events> Transform for FromFn<F> {
    fn transform(&mut self, event: Event) -> Events {
        (self.0)(event)
    }
}

/// Pass-through stage that traces every event under `label`.
#[derive(Debug, Clone)]
pub struct Log {
    label: &'static str,
}

impl Log {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl Transform for Log {
    fn transform(&mut self, event: Event) -> Events {
        log::trace!("[{}] {:?}", self.label, event);
        smallvec![event]
    }
}

/// Offsets every point an event carries by `(dx, dy)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translate {
    pub dx: f32,
    pub dy: f32,
}

impl Translate {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

impl Transform for Translate {
    fn transform(&mut self, event: Event) -> Events {
        let (dx, dy) = (self.dx, self.dy);
        if dx == 0.0 && dy == 0.0 {
            return smallvec![event];
        }
        smallvec![event.map_points(|p| p.offset(dx, dy))]
    }
}
