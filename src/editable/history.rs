//! Edit history (undo/redo) for the editable surface.
//!
//! Each entry is a full snapshot of the surface content taken before an
//! edit. The oldest entries are dropped past the configured limit.

use super::selection::Selection;
use crate::model::Document;

/// Surface state captured before an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub document: Document,
    pub selection: Selection,
    /// Markup the document was loaded from, if still unmodified
    pub source: Option<String>,
}

/// Edit history with undo/redo stacks.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_size: usize,
}

impl EditHistory {
    pub const DEFAULT_MAX_SIZE: usize = 100;

    /// Create a new edit history with default max size
    pub fn new() -> Self {
        Self::with_max_size(Self::DEFAULT_MAX_SIZE)
    }

    /// Create a new edit history with specified max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Record the state before an edit (clears redo stack)
    pub fn push(&mut self, snapshot: Snapshot) {
        self.redo_stack.clear();
        if self.max_size == 0 {
            return;
        }
        self.undo_stack.push(snapshot);

        // Trim if exceeded max size
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
    }

    /// Step back: returns the state to restore; `current` becomes redoable
    pub fn pop_undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Step forward again: returns the state to restore
    pub fn pop_redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get the number of entries in the undo stack
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of entries in the redo stack
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
