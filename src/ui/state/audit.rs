use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::filter::FilterValue;
use crate::ui::state::alert::AlertQueue;
use crate::usecase::ports::gateway::{AdminGateway, PageResponse};
use crate::usecase::ports::guards::CancelDialog;
use crate::usecase::services::export::csv_allowed;
use crate::usecase::services::list_state::{FilterPair, PageOutcome, PageState};

const AUDIT_URL: &str = "rest/audit";
const AUDIT_CSV_URL: &str = "rest/audit/csv";

/// Audit trail viewer. Its criteria are list-valued (several targets or
/// actions at once), serialized as repeated query parameters.
pub struct AuditScreen {
    gateway: Arc<dyn AdminGateway>,
    dialogs: Arc<dyn CancelDialog>,
    pub alerts: AlertQueue,
    pub filters: FilterPair,
    pub pager: PageState,
    pub rows: Vec<Value>,
    pub count: usize,
    pub loading: bool,
    pub targets: Vec<String>,
    pub actions: Vec<String>,
}

impl AuditScreen {
    pub fn new(gateway: Arc<dyn AdminGateway>, dialogs: Arc<dyn CancelDialog>) -> Self {
        AuditScreen {
            gateway,
            dialogs,
            alerts: AlertQueue::new(),
            filters: FilterPair::new(),
            pager: PageState::server(),
            rows: Vec::new(),
            count: 0,
            loading: false,
            targets: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn set_target_filter<I, S>(&mut self, targets: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters
            .draft
            .insert("auditTargetName".to_string(), FilterValue::list(targets));
    }

    pub fn filter_data(&mut self) {
        self.filters.set_active_filter();
        self.pager.reset_offset();
        self.reload();
    }

    pub fn on_page(&mut self, requested: usize) -> PageOutcome {
        let outcome = self.pager.on_page(requested, None, self.dialogs.as_ref());
        if outcome == PageOutcome::Applied {
            self.reload();
        }
        outcome
    }

    pub fn change_page_size(&mut self, new_size: usize) {
        if self.pager.change_page_size(new_size) {
            self.reload();
        }
    }

    pub fn reload(&mut self) {
        self.loading = true;
        let mut params = self.filters.build_query_parameters();
        params.extend(self.pager.query_parameters());
        match self.gateway.fetch_page(AUDIT_URL, "audits", &params) {
            Ok(page) => self.apply_page(page),
            Err(err) => {
                self.loading = false;
                self.alerts
                    .error(format!("Could not load the audit trail: {err}"));
            }
        }
    }

    pub fn apply_page(&mut self, page: PageResponse) {
        self.count = page.count;
        self.rows = page.rows;
        if let Some(targets) = page.lookups.get("targets") {
            self.targets = targets.clone();
        }
        if let Some(actions) = page.lookups.get("actions") {
            self.actions = actions.clone();
        }
        self.loading = false;
    }

    pub fn save_as_csv(&mut self) -> Result<String, String> {
        if let Err(message) = csv_allowed(self.count) {
            self.alerts.error(message.clone());
            return Err(message);
        }
        self.filters.reset_filters();
        self.gateway
            .download_csv(AUDIT_CSV_URL, &self.filters.build_query_parameters())
            .map_err(|err| {
                let message = format!("Could not export the audit trail: {err}");
                self.alerts.error(message.clone());
                message
            })
    }
}
