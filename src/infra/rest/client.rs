use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use serde_json::Value;
use tracing::debug;

use crate::usecase::ports::gateway::{AdminGateway, GatewayError, PageResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP implementation of the gateway port.
pub struct RestGateway {
    base_url: String,
    http: Client,
}

impl RestGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build http client")?;
        Ok(RestGateway {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    fn check(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        match status.as_u16() {
            401 | 403 => Err(GatewayError::Unauthorized),
            code if !status.is_success() => Err(GatewayError::Status {
                status: code,
                message: response.text().unwrap_or_default(),
            }),
            _ => Ok(response),
        }
    }
}

impl AdminGateway for RestGateway {
    fn fetch_page(
        &self,
        resource: &str,
        items_key: &str,
        params: &[(String, String)],
    ) -> Result<PageResponse, GatewayError> {
        debug!(resource, "fetching page");
        let response = self
            .http
            .get(self.url(resource))
            .query(params)
            .send()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        let response = Self::check(response)?;
        let body: Value = response
            .json()
            .map_err(|err| GatewayError::Decode(err.to_string()))?;
        parse_page_response(body, items_key)
    }

    fn save_rows(&self, resource: &str, rows: &[Value]) -> Result<(), GatewayError> {
        let response = self
            .http
            .put(self.url(resource))
            .json(&rows)
            .send()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        Self::check(response).map(|_| ())
    }

    fn delete_by_ids(&self, resource: &str, ids: &[i64]) -> Result<(), GatewayError> {
        let ids_param = serde_json::to_string(ids)
            .map_err(|err| GatewayError::Decode(err.to_string()))?;
        let response = self
            .http
            .delete(self.url(resource))
            .query(&[("ids", ids_param)])
            .send()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        Self::check(response).map(|_| ())
    }

    fn download_csv(
        &self,
        resource: &str,
        params: &[(String, String)],
    ) -> Result<String, GatewayError> {
        let response = self
            .http
            .get(self.url(resource))
            .query(params)
            .send()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        let response = Self::check(response)?;
        response
            .text()
            .map_err(|err| GatewayError::Decode(err.to_string()))
    }
}

/// List endpoints answer either a bare array or an envelope holding the
/// rows, the total count, the applied filter and the lookup lists. Any
/// remaining array-of-strings field is treated as a lookup list.
pub(crate) fn parse_page_response(
    body: Value,
    items_key: &str,
) -> Result<PageResponse, GatewayError> {
    match body {
        Value::Array(rows) => Ok(PageResponse::from_rows(rows)),
        Value::Object(mut fields) => {
            let rows = match fields.remove(items_key) {
                Some(Value::Array(rows)) => rows,
                Some(_) => {
                    return Err(GatewayError::Decode(format!(
                        "field '{items_key}' is not an array"
                    )))
                }
                None => Vec::new(),
            };
            let count = fields
                .remove("count")
                .and_then(|value| value.as_u64())
                .map(|value| value as usize)
                .unwrap_or(rows.len());
            let filter = fields.remove("filter");
            let mut lookups = BTreeMap::new();
            for (key, value) in fields {
                if let Value::Array(items) = value {
                    let strings: Vec<String> = items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect();
                    if strings.len() == items.len() {
                        lookups.insert(key, strings);
                    }
                }
            }
            Ok(PageResponse {
                count,
                rows,
                filter,
                lookups,
            })
        }
        _ => Err(GatewayError::Decode(
            "expected a json object or array".to_string(),
        )),
    }
}
