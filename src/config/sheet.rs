//! Ledger spreadsheet configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Google Sheets ledger configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SheetConfig {
    /// Spreadsheet identifier
    pub spreadsheet_id: String,

    /// OAuth bearer token for the Sheets API
    pub api_token: Secret<String>,

    /// Base URL for the Sheets API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Tab holding the ledger rows
    #[serde(default = "default_tab")]
    pub tab: String,

    /// Header/config rows above the data range
    #[serde(default = "default_header_rows")]
    pub header_rows: u32,
}

impl SheetConfig {
    /// Validate sheet configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.spreadsheet_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("sheet.spreadsheet_id"));
        }
        if self.api_token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("sheet.api_token"));
        }
        if self.header_rows == 0 {
            return Err(ValidationError::InvalidHeaderRows);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_tab() -> String {
    "DATA".to_string()
}

fn default_header_rows() -> u32 {
    1
}
