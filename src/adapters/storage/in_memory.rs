//! In-memory ledger store for tests and local development.
//!
//! Deterministic stand-in for the spreadsheet: positions are 1-based,
//! cleared rows stay as gaps, and appends always land after the highest
//! allocated position. Clearing everything resets positions, as wiping
//! the sheet's data range does.
//!
//! # Panics
//!
//! Methods panic if internal locks are poisoned. This adapter is for
//! testing and development; production uses the Sheets adapter.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::ports::{LedgerStore, LedgerStoreError, RawRow};

/// Gap-preserving in-memory ledger.
#[derive(Default)]
pub struct InMemoryLedger {
    rows: RwLock<Vec<Option<Vec<String>>>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Number of allocated positions, gaps included.
    pub fn allocated(&self) -> usize {
        self.rows.read().expect("InMemoryLedger: lock poisoned").len()
    }

    /// Number of occupied (non-cleared) rows.
    pub fn occupied(&self) -> usize {
        self.rows
            .read()
            .expect("InMemoryLedger: lock poisoned")
            .iter()
            .filter(|r| r.is_some())
            .count()
    }

    /// Cells at a 1-based position, `None` when cleared or unallocated.
    pub fn cells_at(&self, position: u32) -> Option<Vec<String>> {
        self.rows
            .read()
            .expect("InMemoryLedger: lock poisoned")
            .get(position as usize - 1)
            .and_then(|r| r.clone())
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn append(&self, cells: Vec<String>) -> Result<u32, LedgerStoreError> {
        let mut rows = self.rows.write().expect("InMemoryLedger: lock poisoned");
        rows.push(Some(cells));
        Ok(rows.len() as u32)
    }

    async fn read_all(&self) -> Result<Vec<RawRow>, LedgerStoreError> {
        let rows = self.rows.read().expect("InMemoryLedger: lock poisoned");
        Ok(rows
            .iter()
            .enumerate()
            .map(|(i, cells)| RawRow {
                position: i as u32 + 1,
                cells: cells.clone().unwrap_or_default(),
            })
            .collect())
    }

    async fn overwrite(&self, position: u32, cells: Vec<String>) -> Result<(), LedgerStoreError> {
        let mut rows = self.rows.write().expect("InMemoryLedger: lock poisoned");
        let slot = rows
            .get_mut(position as usize - 1)
            .ok_or(LedgerStoreError::RowOutOfRange(position))?;
        *slot = Some(cells);
        Ok(())
    }

    async fn clear_row(&self, position: u32) -> Result<(), LedgerStoreError> {
        let mut rows = self.rows.write().expect("InMemoryLedger: lock poisoned");
        let slot = rows
            .get_mut(position as usize - 1)
            .ok_or(LedgerStoreError::RowOutOfRange(position))?;
        *slot = None;
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), LedgerStoreError> {
        self.rows
            .write()
            .expect("InMemoryLedger: lock poisoned")
            .clear();
        Ok(())
    }
}
