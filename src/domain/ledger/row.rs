//! LedgerRow - the canonical record for one harvest or rest event.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, WorkDate};
use crate::domain::sites::SiteId;

/// Row status as reported by the crew.
///
/// `CleanCut` marks cycle completion; the two rest variants never belong to
/// a harvest cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    CleanCut,
    PartialCut,
    RestWind,
    RestShore,
    Pending,
}

impl RowStatus {
    /// Canonical token written to the ledger's status column.
    pub fn token(&self) -> &'static str {
        match self {
            RowStatus::CleanCut => "clean_cut",
            RowStatus::PartialCut => "partial_cut",
            RowStatus::RestWind => "rest_wind",
            RowStatus::RestShore => "rest_shore",
            RowStatus::Pending => "pending",
        }
    }

    /// Parses a status column token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "clean_cut" => Some(RowStatus::CleanCut),
            "partial_cut" => Some(RowStatus::PartialCut),
            "rest_wind" => Some(RowStatus::RestWind),
            "rest_shore" => Some(RowStatus::RestShore),
            "pending" => Some(RowStatus::Pending),
            _ => None,
        }
    }

    /// Human label used in chat replies.
    pub fn label(&self) -> &'static str {
        match self {
            RowStatus::CleanCut => "clean cut",
            RowStatus::PartialCut => "partial cut",
            RowStatus::RestWind => "rest (wind)",
            RowStatus::RestShore => "rest (shore)",
            RowStatus::Pending => "pending",
        }
    }

    /// True for the two rest-day variants.
    pub fn is_rest(&self) -> bool {
        matches!(self, RowStatus::RestWind | RowStatus::RestShore)
    }
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// What the report said about lines harvested.
///
/// The ledger stores the reported quantity, never the derived cumulative
/// progress; replay derives the latter fresh on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportedUnits {
    /// Units omitted: "cut everything remaining", an explicit full clean cut.
    FullCut,
    /// An increment of lines on top of the cycle's running progress.
    Delta(u32),
}

/// One row of the append-only harvest ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Instant the row was appended; preserved across amendments.
    pub timestamp: Timestamp,
    /// Site-local calendar day the labor occurred.
    pub work_date: WorkDate,
    /// Free-text identity of the submitter.
    pub reporter: String,
    /// Harvest site; `None` for rest days.
    pub site: Option<SiteId>,
    /// Reported line quantity (work rows only; rest rows carry a zero delta).
    pub reported_units: ReportedUnits,
    /// The site's line count at the time the row was written.
    pub capacity_units: u32,
    /// Reported outcome.
    pub status: RowStatus,
    /// Raw sack count as reported.
    pub sack_count_raw: u32,
    /// Raw sacks normalized into the billing unit.
    pub sack_count_standard: u32,
    /// Price per standardized sack, in thousands of the currency unit.
    pub unit_price: u32,
    /// Free text.
    pub note: String,
}

impl LedgerRow {
    /// Builds a work row.
    #[allow(clippy::too_many_arguments)]
    pub fn work(
        timestamp: Timestamp,
        work_date: WorkDate,
        reporter: impl Into<String>,
        site: SiteId,
        reported_units: ReportedUnits,
        capacity_units: u32,
        status: RowStatus,
        sack_count_raw: u32,
        sack_count_standard: u32,
        unit_price: u32,
        note: impl Into<String>,
    ) -> Self {
        debug_assert!(!status.is_rest());
        Self {
            timestamp,
            work_date,
            reporter: reporter.into(),
            site: Some(site),
            reported_units,
            capacity_units,
            status,
            sack_count_raw,
            sack_count_standard,
            unit_price,
            note: note.into(),
        }
    }

    /// Builds a rest row: empty site, zero capacity, zero sacks, zero revenue.
    pub fn rest(
        timestamp: Timestamp,
        work_date: WorkDate,
        reporter: impl Into<String>,
        status: RowStatus,
        note: impl Into<String>,
    ) -> Self {
        debug_assert!(status.is_rest());
        Self {
            timestamp,
            work_date,
            reporter: reporter.into(),
            site: None,
            reported_units: ReportedUnits::Delta(0),
            capacity_units: 0,
            status,
            sack_count_raw: 0,
            sack_count_standard: 0,
            unit_price: 0,
            note: note.into(),
        }
    }

    /// Revenue rederived from its inputs; the stored column is never trusted.
    pub fn revenue(&self) -> u64 {
        u64::from(self.sack_count_standard) * u64::from(self.unit_price) * 1000
    }

    /// True for rest-day rows.
    pub fn is_rest(&self) -> bool {
        self.status.is_rest()
    }

    /// The ordering key authoritative for reconstruction.
    pub fn order_key(&self) -> (WorkDate, Timestamp) {
        (self.work_date, self.timestamp)
    }
}

/// Normalizes a raw sack count into the billing unit.
///
/// Round half away from zero on `raw × rate`.
pub fn standardize_sacks(raw: u32, rate: f64) -> u32 {
    (f64::from(raw) * rate).round() as u32
}
