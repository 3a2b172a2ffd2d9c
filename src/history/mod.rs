//! Linear undo/redo history of encoded surface snapshots.
//!
//! The history never stores the in-progress stroke: a snapshot is committed
//! only when a stroke session ends or a command (clear) changes the surface.
//! Restoring an entry is asynchronous, see [`pending`].

pub mod pending;

pub use pending::{PaintHandle, PaintJob, PaintQueue};

use crate::draw::EncodedSnapshot;
use std::collections::VecDeque;
use std::mem;

/// Two ordered sequences of snapshots: `past` and `future`.
///
/// `past` always holds at least the initial snapshot; its last element is the
/// state the surface should show. `future` holds undone states, the most
/// recently undone first.
#[derive(Debug)]
pub struct History {
    /// Older entries of `past`, oldest first
    earlier: VecDeque<EncodedSnapshot>,
    /// Last entry of `past`
    current: EncodedSnapshot,
    /// Undone entries, most recently undone at the front
    future: VecDeque<EncodedSnapshot>,
    /// Maximum length of `past` (0 = unlimited)
    max_depth: usize,
}

impl History {
    /// Seeds the history with the initial surface state.
    pub fn new(initial: EncodedSnapshot, max_depth: usize) -> Self {
        Self {
            earlier: VecDeque::new(),
            current: initial,
            future: VecDeque::new(),
            max_depth,
        }
    }

    /// Records a new state, discarding everything that was undone.
    pub fn commit(&mut self, snapshot: EncodedSnapshot) {
        let previous = mem::replace(&mut self.current, snapshot);
        self.earlier.push_back(previous);
        self.future.clear();
        self.enforce_depth();
    }

    /// Steps back one state and returns the snapshot the surface should show.
    ///
    /// Returns `None` (and changes nothing) when only the initial state is left.
    pub fn undo(&mut self) -> Option<&EncodedSnapshot> {
        let previous = self.earlier.pop_back()?;
        let undone = mem::replace(&mut self.current, previous);
        self.future.push_front(undone);
        Some(&self.current)
    }

    /// Re-applies the most recently undone state and returns it.
    ///
    /// Returns `None` when nothing has been undone since the last commit.
    pub fn redo(&mut self) -> Option<&EncodedSnapshot> {
        let next = self.future.pop_front()?;
        let previous = mem::replace(&mut self.current, next);
        self.earlier.push_back(previous);
        Some(&self.current)
    }

    /// Snapshot of the state the surface should currently show.
    pub fn current(&self) -> &EncodedSnapshot {
        &self.current
    }

    /// Number of entries in `past`, including the current state.
    pub fn past_len(&self) -> usize {
        self.earlier.len() + 1
    }

    /// Number of undone entries available for redo.
    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.earlier.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    fn enforce_depth(&mut self) {
        if self.max_depth == 0 {
            return;
        }
        while self.past_len() > self.max_depth {
            if self.earlier.pop_front().is_none() {
                break;
            }
        }
    }
}
