//! AmendReportHandler - rewrites the reporter's most recent row for a site.
//!
//! An amendment is a full overwrite in place: the row keeps its store
//! position, its original append timestamp, and the capacity it was
//! written with. Because the old values are gone before the replay runs,
//! the amended row's progress is computed against everything else in the
//! log — never against its own prior value.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::application::policy::HarvestPolicy;
use crate::application::reply::ReportAck;
use crate::application::snapshot::{resolve_work_date, LedgerSnapshot, SnapshotError};
use crate::domain::command::WorkReport;
use crate::domain::foundation::Clock;
use crate::domain::ledger::{codec, standardize_sacks, LedgerRow, ReportedUnits, RowStatus};
use crate::domain::replay::{reconstruct, ReplayError};
use crate::domain::sites::{SiteCapacityTable, SiteId};
use crate::ports::{LedgerStore, LedgerStoreError};

/// Error type for amending reports.
#[derive(Debug, Error)]
pub enum AmendReportError {
    #[error("Unknown site: {0}")]
    UnknownSite(SiteId),

    /// No row by this reporter for this site exists to amend.
    #[error("No report by '{reporter}' for site {site}")]
    NoMatchingReport { reporter: String, site: SiteId },

    #[error("Day {0} does not resolve to a calendar date")]
    BadDayOverride(u32),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Store(#[from] LedgerStoreError),

    #[error(transparent)]
    Replay(#[from] ReplayError),

    #[error("Amended row {0} missing from replay")]
    RowVanished(u32),
}

/// Handler for edit requests.
pub struct AmendReportHandler {
    ledger: Arc<dyn LedgerStore>,
    sites: Arc<RwLock<SiteCapacityTable>>,
    clock: Arc<dyn Clock>,
    policy: HarvestPolicy,
}

impl AmendReportHandler {
    pub fn new(
        ledger: Arc<dyn LedgerStore>,
        sites: Arc<RwLock<SiteCapacityTable>>,
        clock: Arc<dyn Clock>,
        policy: HarvestPolicy,
    ) -> Self {
        Self {
            ledger,
            sites,
            clock,
            policy,
        }
    }

    /// Overwrites the target row and acknowledges from a fresh replay.
    pub async fn handle(
        &self,
        reporter: &str,
        report: WorkReport,
    ) -> Result<ReportAck, AmendReportError> {
        let sites = self.sites.read().await.clone();
        if !sites.contains(&report.site) {
            return Err(AmendReportError::UnknownSite(report.site));
        }

        let snapshot = LedgerSnapshot::load(self.ledger.as_ref()).await?;
        let target = snapshot
            .latest_for(reporter, &report.site)
            .ok_or_else(|| AmendReportError::NoMatchingReport {
                reporter: reporter.to_string(),
                site: report.site.clone(),
            })?;

        let position = target.position;
        let original_timestamp = target.row.timestamp;
        let original_work_date = target.row.work_date;
        // The row was written under this capacity; later table revisions
        // do not reach back into it.
        let capacity = target.row.capacity_units;

        let work_date = match report.day_override {
            Some(day) => resolve_work_date(
                self.clock.now(),
                self.policy.utc_offset_hours,
                Some(day),
            )
            .ok_or(AmendReportError::BadDayOverride(day))?,
            None => original_work_date,
        };

        let reported_units = match report.progress_delta {
            Some(delta) => ReportedUnits::Delta(delta),
            None => ReportedUnits::FullCut,
        };
        let status = if report.clean_cut || report.progress_delta.is_none() {
            RowStatus::CleanCut
        } else {
            RowStatus::PartialCut
        };
        let standard = standardize_sacks(report.sack_count_raw, self.policy.sack_rate);

        let row = LedgerRow::work(
            original_timestamp,
            work_date,
            reporter,
            report.site.clone(),
            reported_units,
            capacity,
            status,
            report.sack_count_raw,
            standard,
            report.unit_price,
            report.note,
        );

        self.ledger.overwrite(position, codec::encode(&row)).await?;
        info!(site = %report.site, position, "report amended in place");

        let snapshot = LedgerSnapshot::load(self.ledger.as_ref()).await?;
        let annotated = reconstruct(snapshot.rows(), &sites)?;
        ReportAck::for_position(
            &annotated,
            position,
            self.policy.forecast_interval_days,
            true,
        )
        .ok_or(AmendReportError::RowVanished(position))
    }
}
