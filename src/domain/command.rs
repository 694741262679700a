//! The parsed command contract consumed by the mutation pipeline.
//!
//! The chat parser (an adapter) turns one message into one of these; the
//! core never sees raw message text except for PIN matching during a
//! confirmation handshake.

use crate::domain::ledger::RowStatus;
use crate::domain::sites::SiteId;

/// A parsed harvest report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkReport {
    pub site: SiteId,
    /// Lines cut on top of the cycle's running progress. `None` means the
    /// crew cut everything remaining — an explicit full clean cut.
    pub progress_delta: Option<u32>,
    pub sack_count_raw: u32,
    /// Price per standardized sack, in thousands.
    pub unit_price: u32,
    /// Bare day-of-month the labor occurred, resolved against the current
    /// month at append time. `None` defaults to yesterday.
    pub day_override: Option<u32>,
    /// Crew declared the bed cut clean regardless of the delta.
    pub clean_cut: bool,
    pub note: String,
}

/// A parsed rest-day report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestReport {
    /// `RestWind` or `RestShore`.
    pub status: RowStatus,
    pub day_override: Option<u32>,
    pub note: String,
}

/// Read-only queries over the reconstructed ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Standard sacks and revenue for today's work date.
    Today,
    /// Monthly summary for the current month.
    Month,
    /// All-time totals.
    Season,
    /// Closing-row revenue grouped by cycle, combined and per site.
    Cycles,
    /// Per-site breakdown.
    Sites,
    /// Upcoming forecast schedule across all sites.
    Schedule,
}

/// One parsed inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Work(WorkReport),
    Rest(RestReport),
    /// Rewrite the reporter's most recent row for the site.
    Amend(WorkReport),
    /// Add a site or revise its capacity.
    ConfigureSite { site: SiteId, capacity: u32 },
    Query(QueryKind),
    DeleteLast,
    DeleteAll,
    /// The /start greeting.
    Start,
}
