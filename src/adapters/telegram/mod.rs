//! Telegram adapters: outbound transport and reply rendering.

pub mod format;
mod transport;

pub use transport::{TelegramConfig, TelegramTransport};
