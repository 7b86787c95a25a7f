//! Document store: the authoritative mapping from shape id to its current
//! memento.
//!
//! DESIGN
//! ======
//! `CanvasState` is a passive holder. It never validates what it is given;
//! the host checks an action against the store and then calls
//! [`CanvasState::apply`] while holding its own lock, and clients apply what
//! the host confirmed. Keeping validation out of here lets both roles share
//! the same store.
//!
//! Entries are never removed. Deletion is the `is_deleted` flag, so any shape
//! ever created stays reachable by undo. Iteration follows first-insertion
//! order so every peer enumerates shapes identically.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use crate::shape::{Shape, ShapeId, ShapeState};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasState {
    states: HashMap<ShapeId, ShapeState>,
    order: Vec<ShapeId>,
}

impl CanvasState {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current memento of a shape, `None` if it was never created.
    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&ShapeState> {
        self.states.get(id)
    }

    /// Overwrite the memento of `id`. No validation.
    pub fn apply(&mut self, id: ShapeId, state: ShapeState) {
        if self.states.insert(id.clone(), state).is_none() {
            self.order.push(id);
        }
    }

    /// Replace every entry at once, keeping the order of `states`.
    pub fn replace_all(&mut self, states: impl IntoIterator<Item = ShapeState>) {
        self.states.clear();
        self.order.clear();
        for state in states {
            self.apply(state.id().clone(), state);
        }
    }

    /// Shapes not flagged deleted, in insertion order.
    pub fn visible_shapes(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.states().filter(|state| !state.is_deleted).map(|state| &state.shape)
    }

    /// Every memento, deleted ones included, in insertion order.
    pub fn states(&self) -> impl Iterator<Item = &ShapeState> + '_ {
        self.order.iter().filter_map(|id| self.states.get(id))
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible_shapes().count()
    }

    #[must_use]
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.states.contains_key(id)
    }

    /// Number of shapes ever created, deleted ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
