//! Next-harvest forecasting from the last clean cut.

use crate::domain::foundation::WorkDate;
use crate::domain::sites::{SiteCapacityTable, SiteId};

use super::reconstructor::AnnotatedRow;

/// Predicted next clean-cut date for a site.
///
/// `Unknown` is an explicit value, never a sentinel date: a site with no
/// clean cut on record has nothing to forecast from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forecast {
    Scheduled(WorkDate),
    Unknown,
}

impl Forecast {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Forecast::Scheduled(_))
    }
}

/// Forecast for one site: last cycle-closing row's work date plus the
/// fixed regrowth interval.
///
/// Rows must be in replay order; the last closing row for the site wins,
/// so a freshly appended closing row moves the forecast forward
/// immediately.
pub fn forecast_for(rows: &[AnnotatedRow], site: &SiteId, interval_days: i64) -> Forecast {
    rows.iter()
        .rev()
        .find(|a| a.closes_cycle && a.row.site.as_ref() == Some(site))
        .map(|a| Forecast::Scheduled(a.row.work_date.plus_days(interval_days)))
        .unwrap_or(Forecast::Unknown)
}

/// One line of the cross-site forecast schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub site: SiteId,
    pub forecast: Forecast,
}

/// Upcoming forecasts across all declared sites.
///
/// Ascending by forecast date; sites with nothing to forecast sort after
/// every scheduled site, keeping capacity-table declaration order among
/// themselves.
pub fn schedule(
    rows: &[AnnotatedRow],
    sites: &SiteCapacityTable,
    interval_days: i64,
) -> Vec<ScheduleEntry> {
    let mut entries: Vec<ScheduleEntry> = sites
        .declaration_order()
        .map(|site| ScheduleEntry {
            site: site.clone(),
            forecast: forecast_for(rows, site, interval_days),
        })
        .collect();

    // Stable sort: unknowns keep declaration order behind all scheduled.
    entries.sort_by_key(|e| match e.forecast {
        Forecast::Scheduled(date) => (false, Some(date)),
        Forecast::Unknown => (true, None),
    });
    entries
}
