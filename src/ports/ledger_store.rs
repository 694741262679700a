//! Ledger Store Port - Interface to the append-only row table.
//!
//! The store is the sole source of truth: an external table of fixed-width
//! rows addressable by position, supporting append, in-place update,
//! range clear, and full-range read. The core holds no private cache of it.

use async_trait::async_trait;

/// Errors that can occur against the ledger store.
#[derive(Debug, thiserror::Error)]
pub enum LedgerStoreError {
    #[error("Ledger store unreachable: {0}")]
    Unavailable(String),

    #[error("Ledger store rejected the operation: {0}")]
    Rejected(String),

    #[error("Row {0} is outside the ledger's data range")]
    RowOutOfRange(u32),
}

/// Raw cells of one data row, addressed by 1-based data-row position.
///
/// A cleared row (delete-last gap) comes back with all cells blank; its
/// position is still occupied and never shifts later rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub position: u32,
    pub cells: Vec<String>,
}

/// Port for the append-only ledger table.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Appends a row after the last occupied position.
    ///
    /// Returns the new row's position.
    async fn append(&self, cells: Vec<String>) -> Result<u32, LedgerStoreError>;

    /// Reads every data row in position order.
    ///
    /// Cleared rows surface as blank cells (stores may also trim a blank
    /// tail entirely); the header/config rows are never included.
    async fn read_all(&self) -> Result<Vec<RawRow>, LedgerStoreError>;

    /// Overwrites the row at `position` in place.
    async fn overwrite(&self, position: u32, cells: Vec<String>) -> Result<(), LedgerStoreError>;

    /// Blanks the row at `position`, leaving the gap in place.
    async fn clear_row(&self, position: u32) -> Result<(), LedgerStoreError>;

    /// Blanks every data row, keeping the header intact.
    async fn clear_all(&self) -> Result<(), LedgerStoreError>;
}
