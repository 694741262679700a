//! Two-step confirmation for destructive ledger operations.
//!
//! Per-chat state machine: `Idle → AwaitingPin(action, expiry) → Idle`.
//! The only transition that executes the pending action is the exact PIN
//! text arriving before expiry; anything else discards it. State lives in
//! process memory only and is never persisted.
//!
//! The clock is injected so tests drive TTL expiry deterministically.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use secrecy::{ExposeSecret, Secret};

use crate::domain::foundation::{ChatId, Clock, Timestamp};

/// A destructive action parked behind the PIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Clear the most recent non-empty row.
    DeleteLast,
    /// Clear every data row, keeping the header.
    DeleteAll,
}

impl PendingAction {
    /// Human label used in chat replies.
    pub fn label(&self) -> &'static str {
        match self {
            PendingAction::DeleteLast => "delete the last report",
            PendingAction::DeleteAll => "clear the entire ledger",
        }
    }
}

/// How a PIN attempt resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Exact PIN in time: execute the action, exactly once.
    Confirmed(PendingAction),
    /// Wrong text: pending action discarded.
    Mismatch,
    /// Right or wrong, the window had closed: pending action discarded.
    Expired,
}

#[derive(Debug, Clone)]
struct Pending {
    action: PendingAction,
    expires_at: Timestamp,
}

/// Per-chat pending confirmations.
pub struct ConfirmationRegistry {
    clock: Arc<dyn Clock>,
    pin: Secret<String>,
    ttl_secs: u64,
    pending: Mutex<HashMap<ChatId, Pending>>,
}

impl ConfirmationRegistry {
    /// Creates a registry with the given PIN and TTL.
    pub fn new(clock: Arc<dyn Clock>, pin: Secret<String>, ttl_secs: u64) -> Self {
        Self {
            clock,
            pin,
            ttl_secs,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// TTL applied to new pending actions, in seconds.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Parks an action for the chat and returns its expiry.
    ///
    /// A second request from the same chat replaces the first.
    pub fn request(&self, chat: ChatId, action: PendingAction) -> Timestamp {
        let expires_at = self.clock.now().plus_secs(self.ttl_secs);
        self.pending
            .lock()
            .expect("ConfirmationRegistry lock poisoned")
            .insert(chat, Pending { action, expires_at });
        expires_at
    }

    /// True when the chat has an action awaiting its PIN.
    ///
    /// Expired entries still count: the next input from the chat is what
    /// discards them (and earns the rejection reply).
    pub fn has_pending(&self, chat: ChatId) -> bool {
        self.pending
            .lock()
            .expect("ConfirmationRegistry lock poisoned")
            .contains_key(&chat)
    }

    /// Resolves the chat's next input against its pending action.
    ///
    /// Returns `None` when nothing was pending. The pending entry is
    /// removed in every case — a confirmation can execute at most once.
    pub fn resolve(&self, chat: ChatId, input: &str) -> Option<ConfirmOutcome> {
        let pending = self
            .pending
            .lock()
            .expect("ConfirmationRegistry lock poisoned")
            .remove(&chat)?;

        if self.clock.now().is_after(&pending.expires_at) {
            return Some(ConfirmOutcome::Expired);
        }
        if input.trim() == self.pin.expose_secret() {
            Some(ConfirmOutcome::Confirmed(pending.action))
        } else {
            Some(ConfirmOutcome::Mismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::FixedClock;

    fn registry(clock: Arc<FixedClock>) -> ConfirmationRegistry {
        ConfirmationRegistry::new(clock, Secret::new("2468".to_string()), 300)
    }

    fn chat(n: i64) -> ChatId {
        ChatId::new(n)
    }

    #[test]
    fn exact_pin_in_time_confirms_exactly_once() {
        let clock = Arc::new(FixedClock::at(Timestamp::from_unix_secs(1000)));
        let reg = registry(clock.clone());

        reg.request(chat(1), PendingAction::DeleteLast);
        clock.advance_secs(60);

        assert_eq!(
            reg.resolve(chat(1), "2468"),
            Some(ConfirmOutcome::Confirmed(PendingAction::DeleteLast))
        );
        // Consumed: a replayed PIN does nothing.
        assert_eq!(reg.resolve(chat(1), "2468"), None);
    }

    #[test]
    fn wrong_pin_discards_the_pending_action() {
        let clock = Arc::new(FixedClock::at(Timestamp::from_unix_secs(1000)));
        let reg = registry(clock);

        reg.request(chat(1), PendingAction::DeleteAll);
        assert_eq!(reg.resolve(chat(1), "9999"), Some(ConfirmOutcome::Mismatch));
        assert!(!reg.has_pending(chat(1)));
        // Correct PIN afterwards finds nothing pending.
        assert_eq!(reg.resolve(chat(1), "2468"), None);
    }

    #[test]
    fn pin_after_ttl_expires_the_action() {
        let clock = Arc::new(FixedClock::at(Timestamp::from_unix_secs(1000)));
        let reg = registry(clock.clone());

        reg.request(chat(1), PendingAction::DeleteAll);
        clock.advance_secs(301);

        assert_eq!(reg.resolve(chat(1), "2468"), Some(ConfirmOutcome::Expired));
        assert!(!reg.has_pending(chat(1)));
    }

    #[test]
    fn pin_exactly_at_expiry_still_confirms() {
        let clock = Arc::new(FixedClock::at(Timestamp::from_unix_secs(1000)));
        let reg = registry(clock.clone());

        reg.request(chat(1), PendingAction::DeleteLast);
        clock.advance_secs(300);

        assert_eq!(
            reg.resolve(chat(1), "2468"),
            Some(ConfirmOutcome::Confirmed(PendingAction::DeleteLast))
        );
    }

    #[test]
    fn pending_state_is_scoped_per_chat() {
        let clock = Arc::new(FixedClock::at(Timestamp::from_unix_secs(1000)));
        let reg = registry(clock);

        reg.request(chat(1), PendingAction::DeleteLast);
        assert!(reg.has_pending(chat(1)));
        assert!(!reg.has_pending(chat(2)));
        assert_eq!(reg.resolve(chat(2), "2468"), None);
        // Chat 1's pending survives chat 2's traffic.
        assert!(reg.has_pending(chat(1)));
    }

    #[test]
    fn second_request_replaces_the_first() {
        let clock = Arc::new(FixedClock::at(Timestamp::from_unix_secs(1000)));
        let reg = registry(clock);

        reg.request(chat(1), PendingAction::DeleteLast);
        reg.request(chat(1), PendingAction::DeleteAll);

        assert_eq!(
            reg.resolve(chat(1), "2468"),
            Some(ConfirmOutcome::Confirmed(PendingAction::DeleteAll))
        );
    }

    #[test]
    fn pin_is_trimmed_but_otherwise_exact() {
        let clock = Arc::new(FixedClock::at(Timestamp::from_unix_secs(1000)));
        let reg = registry(clock);

        reg.request(chat(1), PendingAction::DeleteLast);
        assert_eq!(
            reg.resolve(chat(1), "  2468  "),
            Some(ConfirmOutcome::Confirmed(PendingAction::DeleteLast))
        );

        reg.request(chat(1), PendingAction::DeleteLast);
        assert_eq!(reg.resolve(chat(1), "246 8"), Some(ConfirmOutcome::Mismatch));
    }
}
