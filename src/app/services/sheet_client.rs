//! HTTP client for the Google Sheets proxy
//!
//! Each dataset lives in one sheet, served by an Apps Script deployment
//! that answers `GET {endpoint}?sheet={name}` with a JSON array of flat
//! objects, one per spreadsheet row. This service owns the transport
//! concerns (timeouts, status checking, body decoding, cancellation) and
//! hands the pure core an owned [`SheetTable`].
//!
//! The proxy occasionally answers with a JSON object instead of an array
//! (script errors are reported that way); such payloads decode to an empty
//! table rather than a failure, matching the upstream dashboard's
//! behavior. Transport failures and non-success statuses are errors.

use crate::app::models::{Row, SheetTable};
use crate::config::FetchConfig;
use crate::{Error, Result};
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Client for fetching sheet rows from the configured proxy endpoint
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SheetClient {
    /// Build a client from fetch configuration
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Fetch one sheet and decode its rows
    pub async fn fetch_sheet(&self, sheet: &str) -> Result<SheetTable> {
        debug!("Fetching sheet '{}' from {}", sheet, self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("sheet", sheet)])
            .send()
            .await
            .map_err(|e| Error::sheet_fetch(sheet, "request to sheet proxy failed", Some(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::sheet_fetch(
                sheet,
                format!("sheet proxy returned HTTP {}", status),
                None,
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::sheet_fetch(sheet, "failed to read response body", Some(e)))?;

        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| Error::sheet_decode(sheet, "response body is not valid JSON", Some(e)))?;

        let rows = decode_rows(sheet, payload);
        info!("Fetched {} rows from sheet '{}'", rows.len(), sheet);

        Ok(SheetTable::new(sheet, rows))
    }

    /// Fetch one sheet, returning `Interrupted` if the token fires first
    ///
    /// Callers fan these futures out (the overview joins one per dataset);
    /// the client itself stays one-sheet-at-a-time.
    pub async fn fetch_sheet_cancellable(
        &self,
        sheet: &str,
        cancellation_token: &CancellationToken,
    ) -> Result<SheetTable> {
        tokio::select! {
            result = self.fetch_sheet(sheet) => result,
            _ = cancellation_token.cancelled() => {
                Err(Error::interrupted(format!("fetch of sheet '{}' cancelled", sheet)))
            }
        }
    }
}

/// Decode a proxy payload into rows
///
/// Arrays yield their object elements in order; non-object elements are
/// skipped with a warning. Any non-array payload is an empty row set.
fn decode_rows(sheet: &str, payload: Value) -> Vec<Row> {
    let Value::Array(entries) = payload else {
        debug!("Sheet '{}' returned a non-array payload, treating as empty", sheet);
        return Vec::new();
    };

    let total = entries.len();
    let rows: Vec<Row> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(row) => Some(row),
            _ => None,
        })
        .collect();

    if rows.len() < total {
        warn!(
            "Sheet '{}': skipped {} non-object entries",
            sheet,
            total - rows.len()
        );
    }

    rows
}
