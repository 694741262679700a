//! Typed response payloads handed to the transport adapter for rendering.
//!
//! Handlers compute these from a fresh replay; the transport's formatter
//! turns them into chat text. Keeping them typed keeps rendering out of
//! the application layer and makes responses assertable in tests.

use crate::domain::confirm::PendingAction;
use crate::domain::foundation::WorkDate;
use crate::domain::ledger::RowStatus;
use crate::domain::replay::{
    forecast_for, season_totals, totals_on, AnnotatedRow, CycleRevenue, Forecast, MonthlySummary,
    ScheduleEntry, SiteSummary, Totals,
};
use crate::domain::sites::{SiteChange, SiteId};

/// Acknowledgement of a saved or amended work report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportAck {
    pub site: SiteId,
    pub work_date: WorkDate,
    pub status: RowStatus,
    pub cycle_index: u32,
    pub progress_after: u32,
    pub capacity: u32,
    pub closes_cycle: bool,
    pub sack_count_raw: u32,
    pub sack_count_standard: u32,
    pub unit_price: u32,
    pub revenue: u64,
    /// Revenue across all work rows sharing this row's work date.
    pub day_revenue: u64,
    /// All-time running total after this row.
    pub season_revenue: u64,
    pub forecast: Forecast,
    pub amended: bool,
}

impl ReportAck {
    /// Builds the acknowledgement for the row at `position` from a fresh
    /// replay of the updated log.
    ///
    /// A row that itself closes the cycle forecasts from its own work
    /// date, because the replay already contains it.
    pub fn for_position(
        annotated: &[AnnotatedRow],
        position: u32,
        forecast_interval_days: i64,
        amended: bool,
    ) -> Option<Self> {
        let entry = annotated.iter().find(|a| a.position == position)?;
        let site = entry.row.site.clone()?;
        let forecast = forecast_for(annotated, &site, forecast_interval_days);
        Some(Self {
            site,
            work_date: entry.row.work_date,
            status: entry.row.status,
            cycle_index: entry.cycle_index,
            progress_after: entry.progress_after,
            capacity: entry.row.capacity_units,
            closes_cycle: entry.closes_cycle,
            sack_count_raw: entry.row.sack_count_raw,
            sack_count_standard: entry.row.sack_count_standard,
            unit_price: entry.row.unit_price,
            revenue: entry.row.revenue(),
            day_revenue: totals_on(annotated, entry.row.work_date).revenue,
            season_revenue: season_totals(annotated).revenue,
            forecast,
            amended,
        })
    }
}

/// Acknowledgement of a saved rest-day report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestAck {
    pub status: RowStatus,
    pub work_date: WorkDate,
}

/// Why a pending confirmation was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    PinMismatch,
    Expired,
}

/// Everything the bot can say back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The /start greeting with syntax examples.
    Greeting,
    Report(ReportAck),
    Rest(RestAck),
    TodaySummary { date: WorkDate, totals: Totals },
    MonthSummary(MonthlySummary),
    SeasonSummary(Totals),
    CycleBreakdown(CycleRevenue),
    SiteBreakdown(Vec<SiteSummary>),
    Schedule(Vec<ScheduleEntry>),
    SiteConfigured {
        site: SiteId,
        capacity: u32,
        change: SiteChange,
    },
    ConfirmRequired {
        action: PendingAction,
        ttl_secs: u64,
    },
    ConfirmRejected(RejectReason),
    DeletedLast { position: u32 },
    ClearedAll,
    NothingToDelete,
    NoMatchingReport { site: SiteId },
    UnknownSite { site: SiteId },
    /// Command text unrecognized: reply with a syntax example.
    SyntaxError,
    /// Store failure or other internal error; already logged.
    Failure,
}
