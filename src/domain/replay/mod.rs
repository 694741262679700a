//! The replay engine: reconstruction, aggregation, forecasting.
//!
//! All three are pure functions over an in-memory snapshot of the ledger.
//! Every request re-reads and replays the whole log; derived state can
//! never drift from the rows.

pub mod forecast;
pub mod reconstructor;
pub mod summary;

pub use forecast::{forecast_for, schedule, Forecast, ScheduleEntry};
pub use reconstructor::{reconstruct, AnnotatedRow, ReplayError, StoredRow};
pub use summary::{
    cycle_revenue, monthly_summary, season_totals, site_summaries, totals_on, CycleRevenue,
    CycleStanding, MonthlySummary, SiteSummary, Totals,
};
