//! Harvest domain configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use crate::application::HarvestPolicy;

/// Harvest policy and confirmation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HarvestConfig {
    /// Days from a clean cut to the forecast next harvest
    #[serde(default = "default_forecast_interval_days")]
    pub forecast_interval_days: i64,

    /// Conversion rate from raw sacks to the standardized billing unit
    #[serde(default = "default_sack_rate")]
    pub sack_rate: f64,

    /// Site-local clock offset from UTC, in hours
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i64,

    /// PIN confirming destructive operations
    pub confirm_pin: Secret<String>,

    /// Seconds a pending confirmation stays valid
    #[serde(default = "default_confirm_ttl_secs")]
    pub confirm_ttl_secs: u64,

    /// Seed site table as comma-separated `NAME:CAPACITY` pairs,
    /// e.g. `A27:60,34:109`
    #[serde(default)]
    pub sites: Option<String>,
}

impl HarvestConfig {
    /// Validate harvest configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.forecast_interval_days < 1 {
            return Err(ValidationError::InvalidForecastInterval);
        }
        if !(self.sack_rate > 0.0) {
            return Err(ValidationError::InvalidSackRate);
        }
        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(ValidationError::InvalidUtcOffset);
        }
        if self.confirm_pin.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("harvest.confirm_pin"));
        }
        if self.confirm_ttl_secs == 0 {
            return Err(ValidationError::InvalidConfirmTtl);
        }
        self.seed_sites()?;
        Ok(())
    }

    /// The policy constants handed to the handlers.
    pub fn policy(&self) -> HarvestPolicy {
        HarvestPolicy {
            forecast_interval_days: self.forecast_interval_days,
            sack_rate: self.sack_rate,
            utc_offset_hours: self.utc_offset_hours,
        }
    }

    /// Parses the seed site list, preserving declaration order.
    pub fn seed_sites(&self) -> Result<Vec<(String, u32)>, ValidationError> {
        let Some(raw) = &self.sites else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (name, capacity) = entry
                    .split_once(':')
                    .ok_or_else(|| ValidationError::InvalidSiteSeed(entry.to_string()))?;
                let capacity = capacity
                    .trim()
                    .parse()
                    .map_err(|_| ValidationError::InvalidSiteSeed(entry.to_string()))?;
                Ok((name.trim().to_string(), capacity))
            })
            .collect()
    }
}

fn default_forecast_interval_days() -> i64 {
    15
}

fn default_sack_rate() -> f64 {
    1.4
}

fn default_utc_offset_hours() -> i64 {
    9
}

fn default_confirm_ttl_secs() -> u64 {
    300
}
