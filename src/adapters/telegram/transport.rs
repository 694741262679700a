//! Telegram Transport - outbound replies via the Bot API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TelegramConfig::new(bot_token)
//!     .with_base_url("https://api.telegram.org");
//!
//! let transport = TelegramTransport::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use crate::domain::foundation::ChatId;
use crate::ports::{ChatTransport, TransportError};

/// Configuration for the Telegram transport.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token for authentication.
    bot_token: Secret<String>,
    /// Base URL for the API (default: https://api.telegram.org).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl TelegramConfig {
    /// Creates a new configuration with the given bot token.
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: Secret::new(bot_token.into()),
            base_url: "https://api.telegram.org".to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the bot token (for building request URLs).
    fn bot_token(&self) -> &str {
        self.bot_token.expose_secret()
    }
}

/// Telegram Bot API transport implementation.
pub struct TelegramTransport {
    config: TelegramConfig,
    client: Client,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
}

impl TelegramTransport {
    /// Creates a new transport with the given configuration.
    pub fn new(config: TelegramConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Unavailable(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.base_url,
            self.config.bot_token()
        )
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessageRequest {
                chat_id: chat.as_i64(),
                text,
            })
            .send()
            .await
            .map_err(|e| TransportError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected(format!("{}: {}", status, body)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_message_url_embeds_the_token() {
        let config = TelegramConfig::new("123:abc").with_base_url("https://example.test");
        let transport = TelegramTransport::new(config).unwrap();
        assert_eq!(
            transport.send_message_url(),
            "https://example.test/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn config_debug_does_not_leak_the_token() {
        let config = TelegramConfig::new("123:secret-token");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-token"));
    }
}
