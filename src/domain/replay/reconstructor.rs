//! Progress and cycle reconstruction by replaying the full ledger.
//!
//! The ledger is the sole source of truth: nothing here is cached, and the
//! same finalized log always reconstructs to the same annotations. Replay
//! walks rows in `(work_date, timestamp)` order, carrying per-site running
//! state, and annotates every row with its cycle index, cumulative in-cycle
//! progress, and whether it closes the cycle.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::ledger::{LedgerRow, ReportedUnits, RowStatus};
use crate::domain::sites::{SiteCapacityTable, SiteId};

/// A decoded ledger row paired with its position in the store.
///
/// Position is the 1-based data-row number; it survives gaps left by
/// delete-last and is what amend/delete address rows by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub position: u32,
    pub row: LedgerRow,
}

impl StoredRow {
    pub fn new(position: u32, row: LedgerRow) -> Self {
        Self { position, row }
    }
}

/// A stored row annotated by replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRow {
    pub position: u32,
    pub row: LedgerRow,
    /// Cycle in progress when the row occurred; 0 for rest rows, which
    /// never belong to a harvest cycle. A row that itself closes the cycle
    /// is reported under the cycle it closes.
    pub cycle_index: u32,
    /// Cumulative in-cycle progress after this row, clamped to
    /// `[0, capacity]`. 0 for rest rows.
    pub progress_after: u32,
    /// True when this row's progress reached the site's capacity.
    pub closes_cycle: bool,
}

/// Errors surfaced by replay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// A work row references a site the capacity table does not know.
    /// Never silently demoted to cycle 0: the caller must reject the
    /// offending command before it is ever written.
    #[error("Row {position}: unrecognized site '{site}'")]
    UnknownSite { site: SiteId, position: u32 },

    /// A non-rest row carries no site at all.
    #[error("Row {position}: work row has no site")]
    MissingSite { position: u32 },
}

#[derive(Default)]
struct SiteState {
    closed_cycles: u32,
    open_progress: u32,
}

/// Replays the full row set and annotates every row.
///
/// Output is in `(work_date, timestamp)` order — the authoritative sequence
/// — regardless of ledger insertion order. Rows at identical keys keep
/// their relative store order.
pub fn reconstruct(
    rows: &[StoredRow],
    sites: &SiteCapacityTable,
) -> Result<Vec<AnnotatedRow>, ReplayError> {
    let mut ordered: Vec<&StoredRow> = rows.iter().collect();
    ordered.sort_by_key(|s| s.row.order_key());

    let mut state: HashMap<SiteId, SiteState> = HashMap::new();
    let mut annotated = Vec::with_capacity(ordered.len());

    for stored in ordered {
        let row = &stored.row;

        if row.is_rest() {
            annotated.push(AnnotatedRow {
                position: stored.position,
                row: row.clone(),
                cycle_index: 0,
                progress_after: 0,
                closes_cycle: false,
            });
            continue;
        }

        let site = row.site.clone().ok_or(ReplayError::MissingSite {
            position: stored.position,
        })?;
        if !sites.contains(&site) {
            return Err(ReplayError::UnknownSite {
                site,
                position: stored.position,
            });
        }

        // Historical rows keep the capacity they were written with; table
        // revisions only affect rows appended afterwards.
        let cap = row.capacity_units;
        let site_state = state.entry(site).or_default();

        // An explicit clean-cut status wins over delta arithmetic: both it
        // and an omitted quantity mean "cut everything remaining".
        let progress_after = match row.reported_units {
            _ if row.status == RowStatus::CleanCut => cap,
            ReportedUnits::FullCut => cap,
            ReportedUnits::Delta(delta) => cap.min(site_state.open_progress + delta),
        };

        let cycle_index = site_state.closed_cycles + 1;
        let closes_cycle = progress_after == cap;

        if closes_cycle {
            site_state.closed_cycles += 1;
            // Overflow past capacity is dropped; the next cycle starts at 0.
            site_state.open_progress = 0;
        } else {
            site_state.open_progress = progress_after;
        }

        annotated.push(AnnotatedRow {
            position: stored.position,
            row: row.clone(),
            cycle_index,
            progress_after,
            closes_cycle,
        });
    }

    Ok(annotated)
}
