use serde::{Deserialize, Serialize};

/// Lifecycle tag carried by rows on screens with bulk edit-then-save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowStatus {
    Persisted,
    New,
    Updated,
    Removed,
}

impl RowStatus {
    pub fn is_persisted(self) -> bool {
        self == RowStatus::Persisted
    }
}

impl Default for RowStatus {
    fn default() -> Self {
        RowStatus::Persisted
    }
}

/// Implemented by row types whose pending changes are tracked locally and
/// sent to the server in one request.
pub trait TrackedRow {
    fn status(&self) -> RowStatus;
    fn set_status(&mut self, status: RowStatus);
}
