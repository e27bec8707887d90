//! Bounded undo/redo stacks of whole-surface snapshots.

use std::collections::VecDeque;

use crate::draw::{Snapshot, Surface};

/// Default number of undo steps kept before the oldest is evicted.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Linear undo/redo history.
///
/// Every new snapshot clears the redo stack, so history never branches.
#[derive(Debug)]
pub struct HistoryManager {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    max_depth: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl HistoryManager {
    /// Creates an empty history. A depth of zero is treated as one.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Records the current surface as an undo step.
    pub fn snapshot(&mut self, surface: &Surface) {
        self.undo.push_back(surface.snapshot());
        while self.undo.len() > self.max_depth {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Restores the most recent undo step. Returns false if there is none.
    pub fn undo(&mut self, surface: &mut Surface) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(surface.snapshot());
        surface.restore(&previous);
        true
    }

    /// Re-applies the most recently undone step. Returns false if there is none.
    pub fn redo(&mut self, surface: &mut Surface) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push_back(surface.snapshot());
        while self.undo.len() > self.max_depth {
            self.undo.pop_front();
        }
        surface.restore(&next);
        true
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
