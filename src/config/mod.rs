//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `KELP_LEDGER`
//! prefix and `__` as the nesting separator.
//!
//! # Example
//!
//! ```no_run
//! use kelp_ledger::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod harvest;
mod server;
mod sheet;
mod telegram;

pub use error::{ConfigError, ValidationError};
pub use harvest::HarvestConfig;
pub use server::ServerConfig;
pub use sheet::SheetConfig;
pub use telegram::TelegramConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, timeouts)
    #[serde(default)]
    pub server: ServerConfig,

    /// Telegram transport configuration
    pub telegram: TelegramConfig,

    /// Ledger spreadsheet configuration
    pub sheet: SheetConfig,

    /// Harvest policy and confirmation configuration
    pub harvest: HarvestConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present (development), then reads variables with
    /// the `KELP_LEDGER` prefix and `__` separators:
    ///
    /// - `KELP_LEDGER__SERVER__PORT=10000` -> `server.port`
    /// - `KELP_LEDGER__TELEGRAM__BOT_TOKEN=...` -> `telegram.bot_token`
    /// - `KELP_LEDGER__HARVEST__CONFIRM_PIN=...` -> `harvest.confirm_pin`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when required variables are missing or a
    /// value cannot be parsed into its typed field.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("KELP_LEDGER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.telegram.validate()?;
        self.sheet.validate()?;
        self.harvest.validate()?;
        Ok(())
    }
}
