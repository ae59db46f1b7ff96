use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("session expired or access denied")]
    Unauthorized,
    #[error("malformed response: {0}")]
    Decode(String),
}

/// One page of results as returned by the backend, plus the metadata every
/// list endpoint carries: the authoritative total, the echo of the filter
/// the server actually applied, and the lookup lists for the selectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResponse {
    pub count: usize,
    pub rows: Vec<Value>,
    pub filter: Option<Value>,
    pub lookups: BTreeMap<String, Vec<String>>,
}

impl PageResponse {
    pub fn from_rows(rows: Vec<Value>) -> Self {
        PageResponse {
            count: rows.len(),
            rows,
            filter: None,
            lookups: BTreeMap::new(),
        }
    }
}

/// The REST collaborator. All real work (routing, persistence, security)
/// happens behind it; the console only builds queries and renders results.
pub trait AdminGateway: Send + Sync {
    fn fetch_page(
        &self,
        resource: &str,
        items_key: &str,
        params: &[(String, String)],
    ) -> Result<PageResponse, GatewayError>;

    /// Bulk save: PUTs only the modified subset of rows.
    fn save_rows(&self, resource: &str, rows: &[Value]) -> Result<(), GatewayError>;

    /// Bulk delete, `ids` serialized as one JSON array parameter.
    fn delete_by_ids(&self, resource: &str, ids: &[i64]) -> Result<(), GatewayError>;

    /// CSV generation is delegated to the backend; this returns its output.
    fn download_csv(
        &self,
        resource: &str,
        params: &[(String, String)],
    ) -> Result<String, GatewayError>;
}
