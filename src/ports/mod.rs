//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `LedgerStore` - the append-only row table (the system's only state)
//! - `ChatTransport` - outbound text replies

mod chat_transport;
mod ledger_store;

pub use chat_transport::{ChatTransport, TransportError};
pub use ledger_store::{LedgerStore, LedgerStoreError, RawRow};
