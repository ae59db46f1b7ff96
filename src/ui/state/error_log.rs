use std::sync::Arc;

use serde_json::Value;

use crate::ui::state::alert::AlertQueue;
use crate::usecase::ports::gateway::{AdminGateway, PageResponse};
use crate::usecase::ports::guards::CancelDialog;
use crate::usecase::services::export::csv_allowed;
use crate::usecase::services::list_state::{FilterPair, PageOutcome, PageState, SortState};

const ERROR_LOG_URL: &str = "rest/errorlogs";
const ERROR_LOG_CSV_URL: &str = "rest/errorlogs/csv";

/// Error log viewer: same shape as the message log, without row actions.
pub struct ErrorLogScreen {
    gateway: Arc<dyn AdminGateway>,
    dialogs: Arc<dyn CancelDialog>,
    pub alerts: AlertQueue,
    pub filters: FilterPair,
    pub pager: PageState,
    pub sorter: SortState,
    pub rows: Vec<Value>,
    pub count: usize,
    pub loading: bool,
    pub error_codes: Vec<String>,
}

impl ErrorLogScreen {
    pub fn new(gateway: Arc<dyn AdminGateway>, dialogs: Arc<dyn CancelDialog>) -> Self {
        ErrorLogScreen {
            gateway,
            dialogs,
            alerts: AlertQueue::new(),
            filters: FilterPair::new(),
            pager: PageState::server(),
            sorter: SortState::new(),
            rows: Vec::new(),
            count: 0,
            loading: false,
            error_codes: Vec::new(),
        }
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

    pub fn on_sort(&mut self, column: &str, direction: &str) {
        self.sorter.on_sort(column, direction);
        self.reload();
    }

    pub fn reload(&mut self) {
        self.loading = true;
        match self
            .gateway
            .fetch_page(ERROR_LOG_URL, "errorLogEntries", &self.query_parameters())
        {
            Ok(page) => self.apply_page(page),
            Err(err) => {
                self.loading = false;
                self.alerts
                    .error(format!("Could not load the error log: {err}"));
            }
        }
    }

    pub fn apply_page(&mut self, page: PageResponse) {
        self.count = page.count;
        self.rows = page.rows;
        if let Some(echo) = &page.filter {
            self.filters.absorb_echo(echo);
        }
        if let Some(codes) = page.lookups.get("errorCodes") {
            self.error_codes = codes.clone();
        }
        self.loading = false;
    }

    pub fn save_as_csv(&mut self) -> Result<String, String> {
        if let Err(message) = csv_allowed(self.count) {
            self.alerts.error(message.clone());
            return Err(message);
        }
        self.filters.reset_filters();
        let mut params = self.filters.build_query_parameters();
        params.extend(self.sorter.query_parameters());
        self.gateway
            .download_csv(ERROR_LOG_CSV_URL, &params)
            .map_err(|err| {
                let message = format!("Could not export the error log: {err}");
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
