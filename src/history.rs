use crate::document::{Document, Snapshot};

/// Manages undo/redo stacks of whole-document snapshots.
///
/// One snapshot is recorded per committed action (spiral finalized, canvas
/// cleared), never per drag frame or parameter tick.
#[derive(Debug, Default)]
pub struct History {
    /// States that can be returned to by undo
    undo_stack: Vec<Snapshot>,
    /// States that can be returned to by redo
    redo_stack: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-mutation state of a committing action. Any redoable
    /// states are discarded.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
    }

    /// Restore the most recent snapshot, pushing the current state onto the
    /// redo stack. Returns false (and leaves the document untouched) when
    /// there is nothing to undo.
    pub fn undo(&mut self, document: &mut Document) -> bool {
        match self.undo_stack.pop() {
            Some(snapshot) => {
                self.redo_stack.push(document.snapshot());
                document.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Inverse of [`History::undo`]; false when the redo stack is empty.
    pub fn redo(&mut self, document: &mut Document) -> bool {
        match self.redo_stack.pop() {
            Some(snapshot) => {
                self.undo_stack.push(document.snapshot());
                document.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
