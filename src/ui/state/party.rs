use std::fmt::Write as _;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::entities::row::{RowStatus, TrackedRow};
use crate::ui::state::alert::AlertQueue;
use crate::usecase::ports::gateway::AdminGateway;
use crate::usecase::ports::guards::{CancelDialog, DirtyOperations};
use crate::usecase::services::export::{csv_allowed, write_rows_csv};
use crate::usecase::services::list_state::{FilterPair, PageOutcome, PageState};
use crate::usecase::services::modifiable::ModifiableList;
use crate::usecase::services::validation::{first_duplicate, RowValidator};

const PARTY_LIST_URL: &str = "rest/party/list";
const PARTY_UPDATE_URL: &str = "rest/party/update";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyRow {
    pub name: String,
    #[serde(default)]
    pub end_point: String,
    #[serde(default)]
    pub identifiers: Vec<String>,
    #[serde(default)]
    pub process: String,
    #[serde(default)]
    pub status: RowStatus,
}

impl TrackedRow for PartyRow {
    fn status(&self) -> RowStatus {
        self.status
    }

    fn set_status(&mut self, status: RowStatus) {
        self.status = status;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PartyValidator;

impl RowValidator<PartyRow> for PartyValidator {
    fn validate(&self, rows: &[PartyRow]) -> Result<(), String> {
        let mut message = String::new();
        if let Some((_, name)) = first_duplicate(rows.iter().map(|row| row.name.as_str())) {
            let _ = writeln!(message, "Duplicate party name '{name}'.");
        }
        for (index, row) in rows.iter().enumerate() {
            if row.status.is_persisted() || row.status == RowStatus::Removed {
                continue;
            }
            let number = index + 1;
            if row.name.trim().is_empty() {
                let _ = writeln!(message, "Party {number} has no name defined.");
            }
            if row.identifiers.is_empty() {
                let _ = writeln!(message, "Party {number} has no identifier defined.");
            }
        }
        if message.trim().is_empty() {
            Ok(())
        } else {
            Err(message)
        }
    }
}

/// Party management: client-paged bulk editing of the parties known to the
/// access point. Exports render locally from the fully fetched row set.
pub struct PartyScreen {
    gateway: Arc<dyn AdminGateway>,
    dialogs: Arc<dyn CancelDialog>,
    validator: PartyValidator,
    pub alerts: AlertQueue,
    pub filters: FilterPair,
    pub pager: PageState,
    pub list: ModifiableList<PartyRow>,
    pub loading: bool,
}

impl PartyScreen {
    pub fn new(gateway: Arc<dyn AdminGateway>, dialogs: Arc<dyn CancelDialog>) -> Self {
        PartyScreen {
            gateway,
            dialogs,
            validator: PartyValidator,
            alerts: AlertQueue::new(),
            filters: FilterPair::new(),
            pager: PageState::client(),
            list: ModifiableList::new(),
            loading: false,
        }
    }

    pub fn filter_data(&mut self) {
        self.filters.set_active_filter();
        self.pager.reset_offset();
        self.reload();
    }

    pub fn on_page(&mut self, requested: usize) -> PageOutcome {
        self.pager
            .on_page(requested, Some(&self.list), self.dialogs.as_ref())
    }

    pub fn visible_rows(&self) -> &[PartyRow] {
        self.pager.slice(self.list.rows())
    }

    pub fn count(&self) -> usize {
        self.list.len()
    }

    pub fn reload(&mut self) {
        self.loading = true;
        match self
            .gateway
            .fetch_page(PARTY_LIST_URL, "parties", &self.filters.build_query_parameters())
        {
            Ok(page) => {
                match page
                    .rows
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<Result<Vec<PartyRow>, _>>()
                {
                    Ok(rows) => self.list.load(rows),
                    Err(err) => self
                        .alerts
                        .error(format!("Could not read the party list: {err}")),
                }
                self.loading = false;
            }
            Err(err) => {
                self.loading = false;
                self.alerts.error(format!("Could not load parties: {err}"));
            }
        }
    }

    pub fn add(&mut self, row: PartyRow) -> usize {
        let index = self.list.add(row);
        self.pager.spec.offset = self.pager.last_page(self.list.len());
        index
    }

    pub fn edit_party(&mut self, index: usize, apply: impl FnOnce(&mut PartyRow)) {
        self.list.commit_edit(index, apply);
    }

    pub fn delete_party(&mut self, index: usize) {
        self.list.remove(index);
    }

    pub fn save(&mut self) -> Result<(), String> {
        if let Err(message) = self.validator.validate(self.list.rows()) {
            self.alerts.error(message.clone());
            return Err(message);
        }
        let payload: Vec<Value> = self
            .list
            .modified()
            .iter()
            .map(|row| serde_json::to_value(row).unwrap_or(Value::Null))
            .collect();
        match self.gateway.save_rows(PARTY_UPDATE_URL, &payload) {
            Ok(()) => {
                self.alerts
                    .success("The operation 'update parties' completed successfully.");
                self.reload();
                Ok(())
            }
            Err(err) => {
                warn!(%err, "party save failed, resynchronizing from server");
                self.reload();
                let message = format!("The operation 'update parties' did not succeed: {err}");
                self.alerts.error(message.clone());
                Err(message)
            }
        }
    }

    pub fn cancel(&mut self) {
        if self.list.is_dirty() && !self.dialogs.confirm_discard() {
            return;
        }
        self.reload();
    }

    /// Client-paged, so the whole row set is already here; the CSV is
    /// rendered locally instead of round-tripping to the backend.
    pub fn save_as_csv(&mut self) -> Result<String, String> {
        if let Err(message) = csv_allowed(self.count()) {
            self.alerts.error(message.clone());
            return Err(message);
        }
        let rows: Vec<Vec<String>> = self
            .list
            .rows()
            .iter()
            .filter(|row| row.status != RowStatus::Removed)
            .map(|row| {
                vec![
                    row.name.clone(),
                    row.end_point.clone(),
                    row.identifiers.join(","),
                    row.process.clone(),
                ]
            })
            .collect();
        write_rows_csv(&["Party Name", "End Point", "Party Id", "Process"], &rows).map_err(|err| {
            let message = format!("Could not export parties: {err}");
            self.alerts.error(message.clone());
            message
        })
    }
}

impl DirtyOperations for PartyScreen {
    fn is_dirty(&self) -> bool {
        self.list.is_dirty()
    }
}
