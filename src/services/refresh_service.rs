//! Full-data refresh against the row provider
//!
//! The refresh is the engine's only network interaction: it re-requests raw
//! row data with the current filters serialized as query parameters and
//! hands back a replacement row set for `Table::apply_refresh`.

use reqwest::blocking::Client as HttpClient;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::RefreshConfig;
use crate::core::row::Row;
use crate::table::filter::FilterState;

/// Failure modes of a refresh fetch
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("refresh request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("refresh payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Issues the filtered row fetch for a table
///
/// Blocking by design: the engine is synchronous and event-driven, so a
/// caller that wants overlap must spawn its own thread and accepts
/// last-response-wins ordering.
#[derive(Debug, Clone)]
pub struct RefreshService {
    endpoint: String,
    timeout: Duration,
}

impl RefreshService {
    pub fn new<S: Into<String>>(endpoint: S) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_config(config: &RefreshConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch a replacement row set
    ///
    /// Every active filter rides along as a `<column>=<comma-joined tokens>`
    /// query parameter; the provider answers with the full raw row set for
    /// those filters as JSON (`[{"cells": [{"text": …, "raw": …}]}]`).
    pub fn fetch_rows(&self, filters: &FilterState) -> Result<Vec<Row>, RefreshError> {
        let params = filters.filter_params();
        info!(
            endpoint = %self.endpoint,
            filtered_columns = params.len(),
            "refreshing table data"
        );

        let http = HttpClient::builder()
            .user_agent(concat!("tableify/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()?;
        let rows: Vec<Row> = http
            .get(&self.endpoint)
            .query(&params)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(rows)
    }

    /// Decode a refresh payload without performing a fetch
    pub fn decode_rows(payload: &str) -> Result<Vec<Row>, RefreshError> {
        Ok(serde_json::from_str(payload)?)
    }
}
