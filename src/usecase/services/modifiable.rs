use crate::domain::entities::row::{RowStatus, TrackedRow};
use crate::usecase::ports::guards::DirtyOperations;

/// Row set with per-row lifecycle tracking for the edit-then-save screens.
/// Removed rows stay in the set (soft-marked) until a save or reload;
/// a row added and deleted within the same session is purged outright and
/// never reaches the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifiableList<R> {
    rows: Vec<R>,
}

impl<R: TrackedRow + Clone> ModifiableList<R> {
    pub fn new() -> Self {
        ModifiableList { rows: Vec::new() }
    }

    /// Replaces the row set with freshly fetched rows and clears all
    /// tracking: everything loaded from the server is the persisted baseline.
    pub fn load(&mut self, mut rows: Vec<R>) {
        for row in &mut rows {
            row.set_status(RowStatus::Persisted);
        }
        self.rows = rows;
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a new row; it is sent on the next save.
    pub fn add(&mut self, mut row: R) -> usize {
        row.set_status(RowStatus::New);
        self.rows.push(row);
        self.rows.len() - 1
    }

    /// Applies an edit; a persisted row becomes updated, new and updated
    /// rows keep their state, removed rows are not editable.
    pub fn commit_edit(&mut self, index: usize, apply: impl FnOnce(&mut R)) {
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        if row.status() == RowStatus::Removed {
            return;
        }
        apply(row);
        if row.status() == RowStatus::Persisted {
            row.set_status(RowStatus::Updated);
        }
    }

    /// Soft-deletes a row; a row that was never saved is purged entirely.
    pub fn remove(&mut self, index: usize) {
        let Some(row) = self.rows.get(index) else {
            return;
        };
        if row.status() == RowStatus::New {
            self.rows.remove(index);
        } else {
            self.rows[index].set_status(RowStatus::Removed);
        }
    }

    /// The subset sent to the server on save, in row order.
    pub fn modified(&self) -> Vec<R> {
        self.rows
            .iter()
            .filter(|row| !row.status().is_persisted())
            .cloned()
            .collect()
    }
}

impl<R: TrackedRow + Clone> DirtyOperations for ModifiableList<R> {
    fn is_dirty(&self) -> bool {
        self.rows.iter().any(|row| !row.status().is_persisted())
    }
}
