//! Candidate stack: an ordered batch of records with a forward-only cursor.

#[cfg(test)]
#[path = "stack_test.rs"]
mod stack_test;

use crate::input::DragState;
use crate::style::{CardStyle, card_style_at};

/// Ordered records awaiting a swipe decision.
///
/// The record at the cursor is active; records behind it are inert. The
/// cursor only moves forward within a batch and returns to the front only
/// when a fresh batch replaces the records.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateStack<T> {
    records: Vec<T>,
    current_index: usize,
}

impl<T> Default for CandidateStack<T> {
    fn default() -> Self {
        Self { records: Vec::new(), current_index: 0 }
    }
}

impl<T> CandidateStack<T> {
    #[must_use]
    pub fn new(records: Vec<T>) -> Self {
        Self { records, current_index: 0 }
    }

    /// Replace the batch and rewind the cursor.
    pub fn replace_batch(&mut self, records: Vec<T>) {
        self.records = records;
        self.current_index = 0;
    }

    /// The active record, if any remain.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.records.get(self.current_index)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether an active record remains.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.current_index < self.records.len()
    }

    /// Advance past the active record. Returns `false` once the stack is exhausted.
    pub fn advance(&mut self) -> bool {
        if self.has_more() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Records paired with their derived styles, in stack order.
    pub fn styled(&self, drag: DragState) -> impl Iterator<Item = (&T, CardStyle)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(move |(index, record)| (record, card_style_at(index, self.current_index, &drag)))
    }
}
