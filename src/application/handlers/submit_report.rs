//! SubmitReportHandler - appends a work or rest report to the ledger.
//!
//! Append is the only mutation that creates rows. The handler validates
//! the site before anything is written, appends, then re-reads and replays
//! the entire log to build the acknowledgement — progress, cycle index,
//! running totals, and forecast all come from the fresh replay, never from
//! state carried between requests.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::application::policy::HarvestPolicy;
use crate::application::reply::{ReportAck, RestAck};
use crate::application::snapshot::{resolve_work_date, LedgerSnapshot, SnapshotError};
use crate::domain::command::{RestReport, WorkReport};
use crate::domain::foundation::Clock;
use crate::domain::ledger::{codec, standardize_sacks, LedgerRow, ReportedUnits, RowStatus};
use crate::domain::replay::{reconstruct, ReplayError};
use crate::domain::sites::{SiteCapacityTable, SiteId};
use crate::ports::{LedgerStore, LedgerStoreError};

/// Error type for submitting reports.
#[derive(Debug, Error)]
pub enum SubmitReportError {
    /// Site absent from the capacity table; nothing was written.
    #[error("Unknown site: {0}")]
    UnknownSite(SiteId),

    /// The day-of-month override fits neither this month nor the last.
    #[error("Day {0} does not resolve to a calendar date")]
    BadDayOverride(u32),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Store(#[from] LedgerStoreError),

    #[error(transparent)]
    Replay(#[from] ReplayError),

    /// The appended row did not come back in the replay.
    #[error("Appended row {0} missing from replay")]
    RowVanished(u32),
}

/// Handler for work and rest reports.
pub struct SubmitReportHandler {
    ledger: Arc<dyn LedgerStore>,
    sites: Arc<RwLock<SiteCapacityTable>>,
    clock: Arc<dyn Clock>,
    policy: HarvestPolicy,
}

impl SubmitReportHandler {
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

    /// Appends a work row and acknowledges from a fresh replay.
    pub async fn handle_work(
        &self,
        reporter: &str,
        report: WorkReport,
    ) -> Result<ReportAck, SubmitReportError> {
        let now = self.clock.now();
        let sites = self.sites.read().await.clone();

        // Reject before writing: an unrecognized site must never reach
        // the ledger.
        let capacity = sites
            .capacity_of(&report.site)
            .ok_or_else(|| SubmitReportError::UnknownSite(report.site.clone()))?;

        let work_date = resolve_work_date(now, self.policy.utc_offset_hours, report.day_override)
            .ok_or(SubmitReportError::BadDayOverride(
                report.day_override.unwrap_or_default(),
            ))?;

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
            now,
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

        let position = self.ledger.append(codec::encode(&row)).await?;
        info!(site = %report.site, %work_date, position, "work report appended");

        let snapshot = LedgerSnapshot::load(self.ledger.as_ref()).await?;
        let annotated = reconstruct(snapshot.rows(), &sites)?;
        ReportAck::for_position(
            &annotated,
            position,
            self.policy.forecast_interval_days,
            false,
        )
        .ok_or(SubmitReportError::RowVanished(position))
    }

    /// Appends a rest row and acknowledges it.
    pub async fn handle_rest(
        &self,
        reporter: &str,
        report: RestReport,
    ) -> Result<RestAck, SubmitReportError> {
        let now = self.clock.now();
        let work_date = resolve_work_date(now, self.policy.utc_offset_hours, report.day_override)
            .ok_or(SubmitReportError::BadDayOverride(
                report.day_override.unwrap_or_default(),
            ))?;

        let row = LedgerRow::rest(now, work_date, reporter, report.status, report.note);
        let position = self.ledger.append(codec::encode(&row)).await?;
        info!(status = %report.status, %work_date, position, "rest report appended");

        Ok(RestAck {
            status: report.status,
            work_date,
        })
    }
}
