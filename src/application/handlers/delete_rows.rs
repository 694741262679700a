//! DeleteRowsHandler - executes confirmed destructive operations.
//!
//! Delete-last clears the most recent occupied row by positional scan from
//! the end, leaving a gap that replay skips transparently. Delete-all
//! clears every data row and keeps the header. Both only run after the
//! confirmation handshake has resolved; the handler itself knows nothing
//! about PINs.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::application::snapshot::{LedgerSnapshot, SnapshotError};
use crate::ports::{LedgerStore, LedgerStoreError};

/// Error type for delete operations.
#[derive(Debug, Error)]
pub enum DeleteRowsError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Store(#[from] LedgerStoreError),
}

/// Handler for delete-last and delete-all.
pub struct DeleteRowsHandler {
    ledger: Arc<dyn LedgerStore>,
}

impl DeleteRowsHandler {
    pub fn new(ledger: Arc<dyn LedgerStore>) -> Self {
        Self { ledger }
    }

    /// Clears the most recent occupied row.
    ///
    /// Returns the cleared position, or `None` when the ledger holds no
    /// occupied rows.
    pub async fn delete_last(&self) -> Result<Option<u32>, DeleteRowsError> {
        let snapshot = LedgerSnapshot::load(self.ledger.as_ref()).await?;
        let Some(position) = snapshot.last_occupied_position() else {
            return Ok(None);
        };
        self.ledger.clear_row(position).await?;
        info!(position, "last report cleared");
        Ok(Some(position))
    }

    /// Clears every data row, keeping the header intact.
    pub async fn delete_all(&self) -> Result<(), DeleteRowsError> {
        self.ledger.clear_all().await?;
        info!("all data rows cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryLedger;
    use crate::domain::foundation::{Timestamp, WorkDate};
    use crate::domain::ledger::{codec, LedgerRow, ReportedUnits, RowStatus};
    use crate::domain::sites::SiteId;

    fn row(secs: u64, day: u32) -> Vec<String> {
        codec::encode(&LedgerRow::work(
            Timestamp::from_unix_secs(secs),
            WorkDate::from_ymd(2025, 3, day).unwrap(),
            "kim",
            SiteId::new("A27").unwrap(),
            ReportedUnits::Delta(10),
            60,
            RowStatus::PartialCut,
            10,
            14,
            220,
            "",
        ))
    }

    #[tokio::test]
    async fn delete_last_clears_the_highest_occupied_position() {
        let ledger = Arc::new(InMemoryLedger::new());
        ledger.append(row(100, 1)).await.unwrap();
        ledger.append(row(200, 2)).await.unwrap();

        let handler = DeleteRowsHandler::new(ledger.clone());
        assert_eq!(handler.delete_last().await.unwrap(), Some(2));
        assert_eq!(ledger.occupied(), 1);
        assert!(ledger.cells_at(1).is_some());

        // The gap stays; the next delete-last walks past it to row 1.
        assert_eq!(handler.delete_last().await.unwrap(), Some(1));
        assert_eq!(ledger.occupied(), 0);
    }

    #[tokio::test]
    async fn delete_last_on_empty_ledger_finds_nothing() {
        let ledger = Arc::new(InMemoryLedger::new());
        let handler = DeleteRowsHandler::new(ledger);
        assert_eq!(handler.delete_last().await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_all_empties_the_data_range() {
        let ledger = Arc::new(InMemoryLedger::new());
        ledger.append(row(100, 1)).await.unwrap();
        ledger.append(row(200, 2)).await.unwrap();

        let handler = DeleteRowsHandler::new(ledger.clone());
        handler.delete_all().await.unwrap();
        assert_eq!(ledger.occupied(), 0);
        assert_eq!(ledger.allocated(), 0);
    }
}
