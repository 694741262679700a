//! Ledger row model and wire codec.

pub mod codec;
mod row;

pub use codec::{RowDecodeError, COLUMN_COUNT};
pub use row::{standardize_sacks, LedgerRow, ReportedUnits, RowStatus};
