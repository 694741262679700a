//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Forecast interval must be at least one day")]
    InvalidForecastInterval,

    #[error("Sack conversion rate must be positive")]
    InvalidSackRate,

    #[error("UTC offset must be within -12..=14 hours")]
    InvalidUtcOffset,

    #[error("Confirmation TTL must be positive")]
    InvalidConfirmTtl,

    #[error("Site seed entry '{0}' is not NAME:CAPACITY")]
    InvalidSiteSeed(String),

    #[error("Header row count must be at least 1")]
    InvalidHeaderRows,
}
