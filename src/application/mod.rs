//! Application layer - use-case handlers and the command dispatcher.

pub mod dispatcher;
pub mod handlers;
pub mod policy;
pub mod reply;
pub mod snapshot;

pub use dispatcher::{Dispatcher, InboundMessage};
pub use policy::HarvestPolicy;
pub use reply::{RejectReason, Reply, ReportAck, RestAck};
pub use snapshot::{LedgerSnapshot, SnapshotError};
