//! QuerySummaryHandler - read-only reports over the reconstructed ledger.
//!
//! Every query re-reads the whole log and replays it; there is no
//! materialized view to fall out of sync.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::application::policy::HarvestPolicy;
use crate::application::reply::Reply;
use crate::application::snapshot::{LedgerSnapshot, SnapshotError};
use crate::domain::command::QueryKind;
use crate::domain::foundation::{Clock, WorkDate};
use crate::domain::replay::{
    cycle_revenue, monthly_summary, reconstruct, schedule, season_totals, site_summaries,
    totals_on, ReplayError,
};
use crate::domain::sites::SiteCapacityTable;
use crate::ports::LedgerStore;

/// Error type for summary queries.
#[derive(Debug, Error)]
pub enum QuerySummaryError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Replay(#[from] ReplayError),
}

/// Handler for summary queries.
pub struct QuerySummaryHandler {
    ledger: Arc<dyn LedgerStore>,
    sites: Arc<RwLock<SiteCapacityTable>>,
    clock: Arc<dyn Clock>,
    policy: HarvestPolicy,
}

impl QuerySummaryHandler {
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

    /// Answers one query from a fresh replay.
    pub async fn handle(&self, kind: QueryKind) -> Result<Reply, QuerySummaryError> {
        let sites = self.sites.read().await.clone();
        let snapshot = LedgerSnapshot::load(self.ledger.as_ref()).await?;
        let annotated = reconstruct(snapshot.rows(), &sites)?;
        let today = WorkDate::today_local(self.clock.now(), self.policy.utc_offset_hours);

        Ok(match kind {
            QueryKind::Today => Reply::TodaySummary {
                date: today,
                totals: totals_on(&annotated, today),
            },
            QueryKind::Month => Reply::MonthSummary(monthly_summary(&annotated, today)),
            QueryKind::Season => Reply::SeasonSummary(season_totals(&annotated)),
            QueryKind::Cycles => Reply::CycleBreakdown(cycle_revenue(&annotated)),
            QueryKind::Sites => Reply::SiteBreakdown(site_summaries(&annotated, &sites)),
            QueryKind::Schedule => Reply::Schedule(schedule(
                &annotated,
                &sites,
                self.policy.forecast_interval_days,
            )),
        })
    }
}
