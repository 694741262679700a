//! Google Sheets ledger store.
//!
//! The spreadsheet is the production ledger: one tab, a header row, then
//! data rows in the 12-column wire format. This adapter speaks the Sheets
//! `values` API over HTTP — append, ranged read, in-place update, and
//! range clear — which is exactly the contract the `LedgerStore` port
//! demands. Data-row positions are 1-based; sheet rows are positions
//! shifted by the header.
//!
//! # Configuration
//!
//! ```ignore
//! let config = SheetsConfig::new(spreadsheet_id, api_token)
//!     .with_tab("DATA");
//!
//! let store = SheetsLedger::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::ports::{LedgerStore, LedgerStoreError, RawRow};

/// Last column letter of the 12-column wire format.
const LAST_COLUMN: char = 'L';

/// Configuration for the Sheets ledger.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Spreadsheet identifier.
    pub spreadsheet_id: String,
    /// OAuth bearer token for the Sheets API.
    api_token: Secret<String>,
    /// Base URL for the API (default: https://sheets.googleapis.com).
    pub base_url: String,
    /// Tab holding the ledger.
    pub tab: String,
    /// Rows above the data range (header and config rows).
    pub header_rows: u32,
    /// Request timeout.
    pub timeout: Duration,
}

impl SheetsConfig {
    /// Creates a new configuration for the given spreadsheet.
    pub fn new(spreadsheet_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            api_token: Secret::new(api_token.into()),
            base_url: "https://sheets.googleapis.com".to_string(),
            tab: "DATA".to_string(),
            header_rows: 1,
            timeout: Duration::from_secs(20),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the tab name.
    pub fn with_tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = tab.into();
        self
    }

    /// Sets the header row count.
    pub fn with_header_rows(mut self, rows: u32) -> Self {
        self.header_rows = rows;
        self
    }

    fn api_token(&self) -> &str {
        self.api_token.expose_secret()
    }

    /// Sheet row number of a 1-based data position.
    fn sheet_row(&self, position: u32) -> u32 {
        self.header_rows + position
    }

    /// A1 range covering one data row.
    fn row_range(&self, position: u32) -> String {
        let row = self.sheet_row(position);
        format!("{}!A{}:{}{}", self.tab, row, LAST_COLUMN, row)
    }

    /// Open-ended A1 range covering the whole data area.
    fn data_range(&self) -> String {
        format!("{}!A{}:{}", self.tab, self.sheet_row(1), LAST_COLUMN)
    }
}

#[derive(Serialize)]
struct ValuePayload {
    values: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    updates: Option<AppendUpdates>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    updated_range: Option<String>,
}

/// Extracts the first row number from an A1 range like `DATA!A7:L7`.
fn first_row_of_range(range: &str) -> Option<u32> {
    let after_sheet = range.rsplit('!').next()?;
    let digits: String = after_sheet
        .chars()
        .skip_while(|c| c.is_ascii_alphabetic())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Sheets-backed ledger store.
pub struct SheetsLedger {
    config: SheetsConfig,
    client: Client,
}

impl SheetsLedger {
    /// Creates a new store with the given configuration.
    pub fn new(config: SheetsConfig) -> Result<Self, LedgerStoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LedgerStoreError::Unavailable(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn values_url(&self, range: &str, verb: Option<&str>) -> String {
        let verb = verb.map(|v| format!(":{}", v)).unwrap_or_default();
        format!(
            "{}/v4/spreadsheets/{}/values/{}{}",
            self.config.base_url, self.config.spreadsheet_id, range, verb
        )
    }

    async fn check(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, LedgerStoreError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(LedgerStoreError::Rejected(format!("{}: {}", status, body)))
    }
}

#[async_trait]
impl LedgerStore for SheetsLedger {
    async fn append(&self, cells: Vec<String>) -> Result<u32, LedgerStoreError> {
        let url = self.values_url(&self.config.data_range(), Some("append"));
        let response = self
            .client
            .post(url)
            .bearer_auth(self.config.api_token())
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&ValuePayload {
                values: vec![cells],
            })
            .send()
            .await
            .map_err(|e| LedgerStoreError::Unavailable(e.to_string()))?;

        let parsed: AppendResponse = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(|e| LedgerStoreError::Rejected(e.to_string()))?;

        let sheet_row = parsed
            .updates
            .and_then(|u| u.updated_range)
            .as_deref()
            .and_then(first_row_of_range)
            .ok_or_else(|| {
                LedgerStoreError::Rejected("append response had no updated range".to_string())
            })?;
        Ok(sheet_row.saturating_sub(self.config.header_rows))
    }

    async fn read_all(&self) -> Result<Vec<RawRow>, LedgerStoreError> {
        let url = self.values_url(&self.config.data_range(), None);
        let response = self
            .client
            .get(url)
            .bearer_auth(self.config.api_token())
            .send()
            .await
            .map_err(|e| LedgerStoreError::Unavailable(e.to_string()))?;

        let parsed: ValueRange = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(|e| LedgerStoreError::Rejected(e.to_string()))?;

        Ok(parsed
            .values
            .into_iter()
            .enumerate()
            .map(|(i, cells)| RawRow {
                position: i as u32 + 1,
                cells,
            })
            .collect())
    }

    async fn overwrite(&self, position: u32, cells: Vec<String>) -> Result<(), LedgerStoreError> {
        let url = self.values_url(&self.config.row_range(position), None);
        let response = self
            .client
            .put(url)
            .bearer_auth(self.config.api_token())
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&ValuePayload {
                values: vec![cells],
            })
            .send()
            .await
            .map_err(|e| LedgerStoreError::Unavailable(e.to_string()))?;
        self.check(response).await.map(|_| ())
    }

    async fn clear_row(&self, position: u32) -> Result<(), LedgerStoreError> {
        let url = self.values_url(&self.config.row_range(position), Some("clear"));
        let response = self
            .client
            .post(url)
            .bearer_auth(self.config.api_token())
            .send()
            .await
            .map_err(|e| LedgerStoreError::Unavailable(e.to_string()))?;
        self.check(response).await.map(|_| ())
    }

    async fn clear_all(&self) -> Result<(), LedgerStoreError> {
        let url = self.values_url(&self.config.data_range(), Some("clear"));
        let response = self
            .client
            .post(url)
            .bearer_auth(self.config.api_token())
            .send()
            .await
            .map_err(|e| LedgerStoreError::Unavailable(e.to_string()))?;
        self.check(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SheetsConfig {
        SheetsConfig::new("sheet-id", "token").with_tab("DATA")
    }

    #[test]
    fn ranges_shift_past_the_header() {
        let config = config();
        assert_eq!(config.data_range(), "DATA!A2:L");
        assert_eq!(config.row_range(1), "DATA!A2:L2");
        assert_eq!(config.row_range(5), "DATA!A6:L6");

        let two_headers = config.with_header_rows(2);
        assert_eq!(two_headers.data_range(), "DATA!A3:L");
        assert_eq!(two_headers.row_range(1), "DATA!A3:L3");
    }

    #[test]
    fn first_row_of_range_parses_a1_notation() {
        assert_eq!(first_row_of_range("DATA!A7:L7"), Some(7));
        assert_eq!(first_row_of_range("DATA!A112"), Some(112));
        assert_eq!(first_row_of_range("'My Tab'!A7:L7"), Some(7));
        assert_eq!(first_row_of_range("DATA!A:L"), None);
        assert_eq!(first_row_of_range("garbage"), None);
    }

    #[test]
    fn config_debug_does_not_leak_the_token() {
        let rendered = format!("{:?}", config());
        assert!(!rendered.contains("token\""));
    }
}
