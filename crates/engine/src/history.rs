//! Undo/Redo history for cell edits.
//!
//! Two stacks with linear-history semantics: recording a new edit discards
//! everything that could have been redone.

use std::collections::VecDeque;

use taskgrid_core::{Field, RowId};

/// One committed field change; the unit of undo/redo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edit {
    pub row: RowId,
    pub field: Field,
    pub old_value: String,
    pub new_value: String,
}

#[derive(Debug, Default)]
pub struct History {
    /// Front = oldest. Deque so the size cap drops from the front in O(1).
    undo_stack: VecDeque<Edit>,
    redo_stack: Vec<Edit>,
    /// None = unbounded
    max_entries: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(max_entries: Option<usize>) -> Self {
        Self {
            max_entries,
            ..Self::default()
        }
    }

    /// Record a committed edit and clear the redo stack.
    pub fn record(&mut self, edit: Edit) {
        self.undo_stack.push_back(edit);
        self.redo_stack.clear();

        if let Some(max) = self.max_entries {
            while self.undo_stack.len() > max {
                self.undo_stack.pop_front();
            }
        }
    }

    /// Move the newest edit to the redo stack and return it for reverting.
    pub fn undo(&mut self) -> Option<Edit> {
        let edit = self.undo_stack.pop_back()?;
        self.redo_stack.push(edit.clone());
        Some(edit)
    }

    /// Move the newest undone edit back and return it for re-applying.
    pub fn redo(&mut self) -> Option<Edit> {
        let edit = self.redo_stack.pop()?;
        self.undo_stack.push_back(edit.clone());
        Some(edit)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(row: u32, old: &str, new: &str) -> Edit {
        Edit {
            row: RowId(row),
            field: Field::Status,
            old_value: old.to_string(),
            new_value: new.to_string(),
        }
    }

    #[test]
    fn test_undo_redo_moves_between_stacks() {
        let mut history = History::new();
        history.record(edit(1, "a", "b"));
        history.record(edit(1, "b", "c"));

        assert_eq!(history.undo(), Some(edit(1, "b", "c")));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 1);

        assert_eq!(history.redo(), Some(edit(1, "b", "c")));
        assert!(!history.can_redo());
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut history = History::new();
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new();
        history.record(edit(1, "a", "b"));
        history.record(edit(2, "x", "y"));
        history.undo();
        history.undo();
        assert_eq!(history.redo_len(), 2);

        history.record(edit(3, "m", "n"));
        assert!(!history.can_redo());
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(Some(2));
        history.record(edit(1, "a", "b"));
        history.record(edit(2, "a", "b"));
        history.record(edit(3, "a", "b"));

        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.undo().map(|e| e.row), Some(RowId(3)));
        assert_eq!(history.undo().map(|e| e.row), Some(RowId(2)));
        assert_eq!(history.undo(), None);
    }
}
