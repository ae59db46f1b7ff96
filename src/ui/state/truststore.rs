use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ui::state::alert::AlertQueue;
use crate::usecase::ports::gateway::AdminGateway;
use crate::usecase::services::export::csv_allowed;
use crate::usecase::services::list_state::PageState;

const TRUSTSTORE_LIST_URL: &str = "rest/truststore/list";
const TRUSTSTORE_CSV_URL: &str = "rest/truststore/csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruststoreEntry {
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub valid_from: String,
    #[serde(default)]
    pub valid_until: String,
}

/// Truststore viewer: the certificate entries are fetched whole and paged
/// locally. Read-only; replacing the store is a file upload handled outside
/// the console state.
pub struct TruststoreScreen {
    gateway: Arc<dyn AdminGateway>,
    pub alerts: AlertQueue,
    pub pager: PageState,
    pub rows: Vec<TruststoreEntry>,
    pub loading: bool,
}

impl TruststoreScreen {
    pub fn new(gateway: Arc<dyn AdminGateway>) -> Self {
        TruststoreScreen {
            gateway,
            alerts: AlertQueue::new(),
            pager: PageState::client(),
            rows: Vec::new(),
            loading: false,
        }
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_rows(&self) -> &[TruststoreEntry] {
        self.pager.slice(&self.rows)
    }

    pub fn reload(&mut self) {
        self.loading = true;
        match self
            .gateway
            .fetch_page(TRUSTSTORE_LIST_URL, "trustStoreEntries", &[])
        {
            Ok(page) => {
                match page
                    .rows
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<Result<Vec<TruststoreEntry>, _>>()
                {
                    Ok(rows) => self.rows = rows,
                    Err(err) => self
                        .alerts
                        .error(format!("Could not read the truststore entries: {err}")),
                }
                self.loading = false;
            }
            Err(err) => {
                self.loading = false;
                self.alerts
                    .error(format!("Could not load the truststore: {err}"));
            }
        }
    }

    /// The store file can only be downloaded when it has entries.
    pub fn can_download(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn save_as_csv(&mut self) -> Result<String, String> {
        if let Err(message) = csv_allowed(self.count()) {
            self.alerts.error(message.clone());
            return Err(message);
        }
        self.gateway
            .download_csv(TRUSTSTORE_CSV_URL, &[])
            .map_err(|err| {
                let message = format!("Could not export the truststore: {err}");
                self.alerts.error(message.clone());
                message
            })
    }
}
