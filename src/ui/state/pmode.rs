use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ui::state::alert::AlertQueue;
use crate::usecase::ports::gateway::AdminGateway;
use crate::usecase::services::list_state::PageState;

const PMODE_LIST_URL: &str = "rest/pmode/list";
const PMODE_URL: &str = "rest/pmode";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PmodeArchiveRow {
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub configuration_date: String,
    #[serde(default)]
    pub current: bool,
}

/// P-Mode archive: the version list is fetched whole and paged locally.
/// Selected versions are deleted in one request; the active version is
/// protected.
pub struct PmodeArchiveScreen {
    gateway: Arc<dyn AdminGateway>,
    pub alerts: AlertQueue,
    pub pager: PageState,
    pub rows: Vec<PmodeArchiveRow>,
    pub selected: BTreeSet<i64>,
    pub loading: bool,
}

impl PmodeArchiveScreen {
    pub fn new(gateway: Arc<dyn AdminGateway>) -> Self {
        PmodeArchiveScreen {
            gateway,
            alerts: AlertQueue::new(),
            pager: PageState::client(),
            rows: Vec::new(),
            selected: BTreeSet::new(),
            loading: false,
        }
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_rows(&self) -> &[PmodeArchiveRow] {
        self.pager.slice(&self.rows)
    }

    pub fn reload(&mut self) {
        self.loading = true;
        match self.gateway.fetch_page(PMODE_LIST_URL, "pmodes", &[]) {
            Ok(page) => {
                match page
                    .rows
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<Result<Vec<PmodeArchiveRow>, _>>()
                {
                    Ok(rows) => {
                        self.rows = rows;
                        self.selected.clear();
                    }
                    Err(err) => self
                        .alerts
                        .error(format!("Could not read the pMode archive: {err}")),
                }
                self.loading = false;
            }
            Err(err) => {
                self.loading = false;
                self.alerts
                    .error(format!("Could not load the pMode archive: {err}"));
            }
        }
    }

    /// Selecting the current version is refused; it can never be deleted.
    pub fn toggle_selection(&mut self, id: i64) -> bool {
        let Some(row) = self.rows.iter().find(|row| row.id == id) else {
            return false;
        };
        if row.current {
            self.alerts
                .error("The current pMode configuration cannot be deleted");
            return false;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        true
    }

    /// One DELETE for all selected versions, ids as a JSON array parameter.
    pub fn delete_selected(&mut self) -> Result<(), String> {
        if self.selected.is_empty() {
            return Ok(());
        }
        let ids: Vec<i64> = self.selected.iter().copied().collect();
        match self.gateway.delete_by_ids(PMODE_URL, &ids) {
            Ok(()) => {
                self.alerts
                    .success("The operation 'archive delete' completed successfully.");
                self.reload();
                Ok(())
            }
            Err(err) => {
                self.reload();
                let message = format!("The operation 'archive delete' did not succeed: {err}");
                self.alerts.error(message.clone());
                Err(message)
            }
        }
    }
}
