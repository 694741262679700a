//! Aggregation over reconstructed rows.
//!
//! Every view here is a single linear scan over the replay output. Nothing
//! depends on ledger insertion order — only on the annotated
//! `(work_date, timestamp)` sequence and the `cycle_index`/`closes_cycle`
//! annotations.

use std::collections::{BTreeMap, HashSet};

use crate::domain::foundation::WorkDate;
use crate::domain::ledger::RowStatus;
use crate::domain::sites::{SiteCapacityTable, SiteId};

use super::reconstructor::AnnotatedRow;

/// Summary of the calendar month containing "today".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    /// Days with at least one work row.
    pub active_work_days: u32,
    /// Days with at least one wind-rest row.
    pub wind_rest_days: u32,
    /// Days with at least one shore-rest row.
    pub shore_rest_days: u32,
    /// Revenue across the month's work rows.
    pub revenue: u64,
}

/// Builds the summary for the month containing `today`.
pub fn monthly_summary(rows: &[AnnotatedRow], today: WorkDate) -> MonthlySummary {
    let (year, month) = today.month_key();
    let mut work_days: HashSet<WorkDate> = HashSet::new();
    let mut wind_days: HashSet<WorkDate> = HashSet::new();
    let mut shore_days: HashSet<WorkDate> = HashSet::new();
    let mut revenue = 0u64;

    for annotated in rows {
        let row = &annotated.row;
        if !row.work_date.same_month(&today) {
            continue;
        }
        match row.status {
            RowStatus::RestWind => {
                wind_days.insert(row.work_date);
            }
            RowStatus::RestShore => {
                shore_days.insert(row.work_date);
            }
            _ => {
                work_days.insert(row.work_date);
                revenue += row.revenue();
            }
        }
    }

    MonthlySummary {
        year,
        month,
        active_work_days: work_days.len() as u32,
        wind_rest_days: wind_days.len() as u32,
        shore_rest_days: shore_days.len() as u32,
        revenue,
    }
}

/// Revenue of cycle-closing rows, grouped by cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleRevenue {
    /// Revenue per cycle index, all sites combined.
    pub combined: BTreeMap<u32, u64>,
    /// Revenue per `(site, cycle index)`.
    pub by_site: BTreeMap<SiteId, BTreeMap<u32, u64>>,
}

/// Groups closing-row revenue by cycle and by `(site, cycle)`.
pub fn cycle_revenue(rows: &[AnnotatedRow]) -> CycleRevenue {
    let mut out = CycleRevenue::default();
    for annotated in rows {
        if !annotated.closes_cycle {
            continue;
        }
        let revenue = annotated.row.revenue();
        *out.combined.entry(annotated.cycle_index).or_default() += revenue;
        if let Some(site) = &annotated.row.site {
            *out.by_site
                .entry(site.clone())
                .or_default()
                .entry(annotated.cycle_index)
                .or_default() += revenue;
        }
    }
    out
}

/// Where a site stands in its harvest cycles.
///
/// Distinct from a zero so that "no clean cut yet" can never be misread as
/// a real first cycle worth nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStanding {
    NoCompletedCycle,
    LastCleanCut { cycle: u32, date: WorkDate },
}

/// All-time totals for one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSummary {
    pub site: SiteId,
    pub capacity: u32,
    pub sack_count_raw: u64,
    pub sack_count_standard: u64,
    pub revenue: u64,
    pub standing: CycleStanding,
}

/// Per-site totals for every declared site, in declaration order.
pub fn site_summaries(rows: &[AnnotatedRow], sites: &SiteCapacityTable) -> Vec<SiteSummary> {
    let mut summaries: Vec<SiteSummary> = sites
        .entries()
        .map(|(site, capacity)| SiteSummary {
            site: site.clone(),
            capacity,
            sack_count_raw: 0,
            sack_count_standard: 0,
            revenue: 0,
            standing: CycleStanding::NoCompletedCycle,
        })
        .collect();

    for annotated in rows {
        let Some(site) = &annotated.row.site else {
            continue;
        };
        let Some(summary) = summaries.iter_mut().find(|s| s.site == *site) else {
            continue;
        };
        summary.sack_count_raw += u64::from(annotated.row.sack_count_raw);
        summary.sack_count_standard += u64::from(annotated.row.sack_count_standard);
        summary.revenue += annotated.row.revenue();
        if annotated.closes_cycle {
            // Rows arrive in replay order, so the last close wins.
            summary.standing = CycleStanding::LastCleanCut {
                cycle: annotated.cycle_index,
                date: annotated.row.work_date,
            };
        }
    }

    summaries
}

/// Standard sacks and revenue for one slice of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub standard_sacks: u64,
    pub revenue: u64,
}

/// Totals for work rows on one calendar day.
pub fn totals_on(rows: &[AnnotatedRow], date: WorkDate) -> Totals {
    rows.iter()
        .filter(|a| a.row.work_date == date && !a.row.is_rest())
        .fold(Totals::default(), |acc, a| Totals {
            standard_sacks: acc.standard_sacks + u64::from(a.row.sack_count_standard),
            revenue: acc.revenue + a.row.revenue(),
        })
}

/// All-time totals across every work row.
pub fn season_totals(rows: &[AnnotatedRow]) -> Totals {
    rows.iter()
        .filter(|a| !a.row.is_rest())
        .fold(Totals::default(), |acc, a| Totals {
            standard_sacks: acc.standard_sacks + u64::from(a.row.sack_count_standard),
            revenue: acc.revenue + a.row.revenue(),
        })
}
