//! Telegram transport configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Telegram Bot API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    pub bot_token: Secret<String>,

    /// Base URL for the Bot API
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl TelegramConfig {
    /// Validate telegram configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bot_token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("telegram.bot_token"));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.telegram.org".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bot_token_fails_validation() {
        let config = TelegramConfig {
            bot_token: Secret::new(String::new()),
            base_url: default_base_url(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn populated_bot_token_passes() {
        let config = TelegramConfig {
            bot_token: Secret::new("123:abc".to_string()),
            base_url: default_base_url(),
        };
        assert!(config.validate().is_ok());
    }
}
