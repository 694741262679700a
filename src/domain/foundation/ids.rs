//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};

/// Identifier of one chat session with the bot.
///
/// Confirmation state is scoped per chat; two chats never share a pending
/// action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    /// Wraps a transport-level chat identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_id_roundtrips() {
        let id = ChatId::new(-1001234);
        assert_eq!(id.as_i64(), -1001234);
        assert_eq!(id.to_string(), "-1001234");
    }
}
