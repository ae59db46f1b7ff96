use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::domain::entities::filter::FilterValue;
use crate::ui::state::alert::AlertQueue;
use crate::usecase::ports::gateway::{AdminGateway, PageResponse};
use crate::usecase::ports::guards::CancelDialog;
use crate::usecase::services::export::csv_allowed;
use crate::usecase::services::list_state::{FilterPair, PageOutcome, PageState, SortState};

const MESSAGE_LOG_URL: &str = "rest/messagelog";
const MESSAGE_LOG_CSV_URL: &str = "rest/messagelog/csv";
const ITEMS_KEY: &str = "messageLogEntries";

/// Message log viewer: server-paged, sortable, filter committed explicitly.
/// Rows are kept opaque; only the backend interprets them.
pub struct MessageLogScreen {
    gateway: Arc<dyn AdminGateway>,
    dialogs: Arc<dyn CancelDialog>,
    pub alerts: AlertQueue,
    pub filters: FilterPair,
    pub pager: PageState,
    pub sorter: SortState,
    pub rows: Vec<Value>,
    pub count: usize,
    pub loading: bool,
    pub msh_roles: Vec<String>,
    pub message_types: Vec<String>,
    pub message_statuses: Vec<String>,
    pub notification_statuses: Vec<String>,
}

impl MessageLogScreen {
    pub fn new(gateway: Arc<dyn AdminGateway>, dialogs: Arc<dyn CancelDialog>) -> Self {
        MessageLogScreen {
            gateway,
            dialogs,
            alerts: AlertQueue::new(),
            filters: FilterPair::new(),
            pager: PageState::server(),
            sorter: SortState::new(),
            rows: Vec::new(),
            count: 0,
            loading: false,
            msh_roles: Vec::new(),
            message_types: Vec::new(),
            message_statuses: Vec::new(),
            notification_statuses: Vec::new(),
        }
    }

    /// Validates the draft before committing it: an inverted date range is
    /// the one thing the widgets cannot prevent on their own.
    pub fn try_filter(&mut self) -> bool {
        let from = self.filters.draft.get("receivedFrom");
        let to = self.filters.draft.get("receivedTo");
        if let (Some(FilterValue::Instant(from)), Some(FilterValue::Instant(to))) = (from, to) {
            if from > to {
                self.alerts
                    .error("The 'Received up to' date must be after the 'Received from' date");
                return false;
            }
        }
        self.filter_data();
        true
    }

    /// Commits the draft and queries from the first page.
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

    pub fn on_sort(&mut self, column: &str, direction: &str) {
        self.sorter.on_sort(column, direction);
        self.reload();
    }

    pub fn reload(&mut self) {
        self.loading = true;
        debug!(offset = self.pager.offset(), "loading message log page");
        match self
            .gateway
            .fetch_page(MESSAGE_LOG_URL, ITEMS_KEY, &self.query_parameters())
        {
            Ok(page) => self.apply_page(page),
            Err(err) => {
                // rows and count keep their last successful values
                self.loading = false;
                self.alerts
                    .error(format!("Could not load the message log: {err}"));
            }
        }
    }

    /// Whatever response lands last wins; there is no request ordering.
    pub fn apply_page(&mut self, page: PageResponse) {
        self.count = page.count;
        self.rows = page.rows;
        if let Some(echo) = &page.filter {
            self.filters.absorb_echo(echo);
        }
        if let Some(values) = page.lookups.get("mshRoles") {
            self.msh_roles = values.clone();
        }
        if let Some(values) = page.lookups.get("msgTypes") {
            self.message_types = values.clone();
        }
        if let Some(values) = page.lookups.get("msgStatus") {
            self.message_statuses = values.clone();
            self.message_statuses.sort();
        }
        if let Some(values) = page.lookups.get("notifStatus") {
            self.notification_statuses = values.clone();
        }
        self.loading = false;
    }

    /// Exports through the backend; the guard refuses oversized result sets
    /// before any request goes out.
    pub fn save_as_csv(&mut self) -> Result<String, String> {
        if let Err(message) = csv_allowed(self.count) {
            self.alerts.error(message.clone());
            return Err(message);
        }
        self.filters.reset_filters();
        let mut params = self.filters.build_query_parameters();
        params.extend(self.sorter.query_parameters());
        self.gateway
            .download_csv(MESSAGE_LOG_CSV_URL, &params)
            .map_err(|err| {
                let message = format!("Could not export the message log: {err}");
                self.alerts.error(message.clone());
                message
            })
    }

    fn query_parameters(&self) -> Vec<(String, String)> {
        let mut params = self.sorter.query_parameters();
        params.extend(self.filters.build_query_parameters());
        params.extend(self.pager.query_parameters());
        params
    }
}
