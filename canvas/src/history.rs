//! Per-peer undo/redo history over self-authored actions.
//!
//! DESIGN
//! ======
//! A linear sequence plus a cursor. `cursor` counts the entries currently in
//! effect: `entries[cursor - 1]` is the next undo, `entries[cursor]` the next
//! redo. `cursor == 0` is the empty position (index -1).
//!
//! `push` records a brand-new edit and discards the redo tail.
//!
//! Undo and redo both send the inverse of the entry they peek. When the host
//! confirms one, [`UndoRedoHistory::record_undo`] / [`UndoRedoHistory::record_redo`]
//! move the cursor and overwrite the slot with the action that was actually
//! applied. A slot therefore always holds the last action that put its shape
//! where it is now, and its inverse validates against the current store even
//! for a Create, whose undo stamps a fresh deleted copy. Nothing is pushed,
//! so a reversal never becomes a new undoable entry.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::action::Action;
use crate::consts::DEFAULT_HISTORY_LIMIT;

#[derive(Debug, Clone)]
pub struct UndoRedoHistory {
    entries: Vec<Action>,
    cursor: usize,
    capacity: usize,
}

impl UndoRedoHistory {
    /// Create an empty history keeping at most `capacity` entries (min 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { entries: Vec::new(), cursor: 0, capacity: capacity.max(1) }
    }

    /// Truncate everything past the cursor, append `action`, and move the
    /// cursor onto it. Drops the oldest entries beyond capacity.
    pub fn push(&mut self, action: Action) {
        self.entries.truncate(self.cursor);
        self.entries.push(action);
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len();
    }

    /// Action the next undo would reverse.
    #[must_use]
    pub fn peek_undo(&self) -> Option<&Action> {
        self.cursor.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Action the next redo would replay.
    #[must_use]
    pub fn peek_redo(&self) -> Option<&Action> {
        self.entries.get(self.cursor)
    }

    /// Move the cursor back one entry. Returns `false` at the start.
    pub fn retreat(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Move the cursor forward one entry. Returns `false` at the end.
    pub fn advance(&mut self) -> bool {
        if self.cursor >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// The host confirmed an undo: step back and keep `applied` (the inverse
    /// that took effect) in the slot just undone. Returns `false`, changing
    /// nothing, when there is nothing to undo.
    pub fn record_undo(&mut self, applied: Action) -> bool {
        if !self.retreat() {
            return false;
        }
        if let Some(slot) = self.entries.get_mut(self.cursor) {
            *slot = applied;
        }
        true
    }

    /// The host confirmed a redo: keep `applied` in the slot being redone and
    /// step forward. Returns `false`, changing nothing, at the end.
    pub fn record_redo(&mut self, applied: Action) -> bool {
        let Some(slot) = self.entries.get_mut(self.cursor) else {
            return false;
        };
        *slot = applied;
        self.cursor += 1;
        true
    }

    /// Index of the entry in effect; `None` when nothing can be undone.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.cursor.checked_sub(1)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.entries.len() - self.cursor
    }

    #[must_use]
    pub fn entries(&self) -> &[Action] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl Default for UndoRedoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
