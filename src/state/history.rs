//! Linear undo/redo history.
//!
//! One growable `Vec` plus a cursor. Pushing while the cursor is behind the
//! end drops everything after it first, so a fresh commit invalidates redo.

use log::debug;

/// Bounded linear history of snapshots.
#[derive(Debug, Clone)]
pub struct HistoryStack<T> {
    entries: Vec<T>,
    cursor: usize,
    limit: usize,
}

impl<T> HistoryStack<T> {
    /// Creates an empty history holding at most `limit` entries (at least one).
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Discards every entry and seeds the history with `initial`.
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }

    /// Drops the redo suffix, appends `entry`, and moves the cursor onto it.
    ///
    /// When the limit is exceeded the oldest entry is dropped.
    pub fn push(&mut self, entry: T) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(entry);

        if self.entries.len() > self.limit {
            let overflow = self.entries.len() - self.limit;
            self.entries.drain(..overflow);
            debug!("History limit {} reached, dropped {} entries", self.limit, overflow);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Steps back one entry. Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Steps forward one entry. Returns `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Cursor position, or `None` when the history is empty.
    pub fn cursor(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.cursor)
    }
}
