//! In-memory snapshot of the full ledger.
//!
//! Every request loads the whole table fresh, skips cleared gaps, and
//! decodes what remains. Handlers mutate the store and then load a second
//! snapshot to build their response; nothing is cached between requests.

use thiserror::Error;

use crate::domain::foundation::{Timestamp, WorkDate};
use crate::domain::ledger::{codec, RowDecodeError};
use crate::domain::replay::StoredRow;
use crate::domain::sites::SiteId;
use crate::ports::{LedgerStore, LedgerStoreError};

/// Errors loading or decoding the ledger.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Store(#[from] LedgerStoreError),

    #[error(transparent)]
    Decode(#[from] RowDecodeError),
}

/// Decoded, gap-free view of the ledger at one instant.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    rows: Vec<StoredRow>,
}

impl LedgerSnapshot {
    /// Reads and decodes every occupied data row.
    pub async fn load(store: &dyn LedgerStore) -> Result<Self, SnapshotError> {
        let raw = store.read_all().await?;
        let mut rows = Vec::with_capacity(raw.len());
        for raw_row in raw {
            if codec::is_blank(&raw_row.cells) {
                continue;
            }
            let row = codec::decode(raw_row.position, &raw_row.cells)?;
            rows.push(StoredRow::new(raw_row.position, row));
        }
        Ok(Self { rows })
    }

    /// Occupied rows in store-position order.
    pub fn rows(&self) -> &[StoredRow] {
        &self.rows
    }

    /// True when no occupied rows remain.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the most recent occupied row (the delete-last target).
    pub fn last_occupied_position(&self) -> Option<u32> {
        self.rows.iter().map(|r| r.position).max()
    }

    /// The reporter's most recent work row for the site, by
    /// `(work_date, timestamp)` order (the amend target).
    pub fn latest_for(&self, reporter: &str, site: &SiteId) -> Option<&StoredRow> {
        self.rows
            .iter()
            .filter(|s| s.row.reporter == reporter && s.row.site.as_ref() == Some(site))
            .max_by_key(|s| (s.row.order_key(), s.position))
    }

    /// All rows except the one at `position` (amendment context).
    pub fn without_position(&self, position: u32) -> Vec<StoredRow> {
        self.rows
            .iter()
            .filter(|s| s.position != position)
            .cloned()
            .collect()
    }
}

/// Resolves the work date for a fresh report: the explicit day-of-month
/// override when given, otherwise yesterday, both on the site-local clock.
pub fn resolve_work_date(
    now: Timestamp,
    utc_offset_hours: i64,
    day_override: Option<u32>,
) -> Option<WorkDate> {
    let today = WorkDate::today_local(now, utc_offset_hours);
    match day_override {
        Some(day) => WorkDate::resolve_day_override(today, day),
        None => Some(today.previous_day()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::{LedgerRow, ReportedUnits, RowStatus};

    fn work_row(secs: u64, day: u32, reporter: &str, site: &str) -> LedgerRow {
        LedgerRow::work(
            Timestamp::from_unix_secs(secs),
            WorkDate::from_ymd(2025, 3, day).unwrap(),
            reporter,
            SiteId::new(site).unwrap(),
            ReportedUnits::Delta(10),
            60,
            RowStatus::PartialCut,
            10,
            14,
            220,
            "",
        )
    }

    fn snapshot(rows: Vec<(u32, LedgerRow)>) -> LedgerSnapshot {
        LedgerSnapshot {
            rows: rows
                .into_iter()
                .map(|(pos, row)| StoredRow::new(pos, row))
                .collect(),
        }
    }

    #[test]
    fn latest_for_matches_reporter_and_site_by_work_date_order() {
        let snap = snapshot(vec![
            (1, work_row(100, 3, "kim", "A27")),
            // Appended later but worked earlier: not the latest.
            (2, work_row(900, 2, "kim", "A27")),
            (3, work_row(300, 3, "lee", "A27")),
            (4, work_row(400, 3, "kim", "34")),
        ]);

        let hit = snap
            .latest_for("kim", &SiteId::new("A27").unwrap())
            .unwrap();
        assert_eq!(hit.position, 1);
    }

    #[test]
    fn latest_for_misses_when_nothing_matches() {
        let snap = snapshot(vec![(1, work_row(100, 3, "kim", "A27"))]);
        assert!(snap.latest_for("lee", &SiteId::new("34").unwrap()).is_none());
    }

    #[test]
    fn without_position_drops_exactly_one_row() {
        let snap = snapshot(vec![
            (1, work_row(100, 1, "kim", "A27")),
            (2, work_row(200, 2, "kim", "A27")),
        ]);
        let rest = snap.without_position(1);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].position, 2);
    }

    #[test]
    fn last_occupied_position_is_the_positional_maximum() {
        let snap = snapshot(vec![
            (1, work_row(100, 1, "kim", "A27")),
            // Gap at 2 (cleared earlier), later row at 3.
            (3, work_row(300, 2, "kim", "A27")),
        ]);
        assert_eq!(snap.last_occupied_position(), Some(3));
        assert_eq!(LedgerSnapshot::default().last_occupied_position(), None);
    }

    #[test]
    fn default_work_date_is_local_yesterday() {
        // 01:00 UTC on the 10th is the 10th at UTC+9, so yesterday is the 9th.
        let now = Timestamp::parse("2025-03-10T01:00:00Z").unwrap();
        assert_eq!(
            resolve_work_date(now, 9, None),
            Some(WorkDate::from_ymd(2025, 3, 9).unwrap())
        );
    }

    #[test]
    fn day_override_beats_the_default() {
        let now = Timestamp::parse("2025-03-10T01:00:00Z").unwrap();
        assert_eq!(
            resolve_work_date(now, 9, Some(4)),
            Some(WorkDate::from_ymd(2025, 3, 4).unwrap())
        );
        // Future day rolls back one month.
        assert_eq!(
            resolve_work_date(now, 9, Some(25)),
            Some(WorkDate::from_ymd(2025, 2, 25).unwrap())
        );
    }
}
