//! Chat Transport Port - Interface for outbound replies.
//!
//! The core never talks to the messaging service directly; it hands a
//! formatted text block to this port and moves on.

use async_trait::async_trait;

use crate::domain::foundation::ChatId;

/// Errors that can occur delivering a reply.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Chat transport unreachable: {0}")]
    Unavailable(String),

    #[error("Chat transport rejected the message: {0}")]
    Rejected(String),
}

/// Port for sending text replies to a chat.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Delivers a text block to the chat.
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError>;
}
