//! Wire codec for the fixed 12-column ledger row.
//!
//! Column order is the contract with the spreadsheet:
//! `[timestamp, workDate, reporter, site, progressUnits, capacityUnits,
//! status, sackCountRaw, sackCountStandard, unitPrice, revenue, note]`.
//!
//! Decoding tolerates trailing blank cells (the store trims them) and
//! reports cleared rows — all cells blank — as gaps to be skipped rather
//! than errors. The revenue column is written for human readers of the
//! sheet but rederived on every decode.

use thiserror::Error;

use super::row::{LedgerRow, ReportedUnits, RowStatus};
use crate::domain::foundation::{Timestamp, WorkDate};
use crate::domain::sites::SiteId;

/// Number of columns in the wire format.
pub const COLUMN_COUNT: usize = 12;

/// Errors raised while decoding a ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowDecodeError {
    #[error("Row {row}: bad timestamp '{value}'")]
    BadTimestamp { row: u32, value: String },

    #[error("Row {row}: bad work date '{value}'")]
    BadWorkDate { row: u32, value: String },

    #[error("Row {row}: column '{column}' is not a number: '{value}'")]
    BadNumber {
        row: u32,
        column: &'static str,
        value: String,
    },

    #[error("Row {row}: unknown status token '{value}'")]
    BadStatus { row: u32, value: String },

    #[error("Row {row}: rest row carries site '{site}'")]
    RestRowWithSite { row: u32, site: String },

    #[error("Row {row}: work row has no site")]
    WorkRowWithoutSite { row: u32 },
}

/// True when every cell is blank: a gap left by delete-last.
pub fn is_blank(cells: &[String]) -> bool {
    cells.iter().all(|c| c.trim().is_empty())
}

/// Encodes a row into its 12 wire cells.
pub fn encode(row: &LedgerRow) -> Vec<String> {
    let progress = match row.reported_units {
        ReportedUnits::FullCut => String::new(),
        ReportedUnits::Delta(n) => n.to_string(),
    };
    vec![
        row.timestamp.to_rfc3339(),
        row.work_date.to_string(),
        row.reporter.clone(),
        row.site.as_ref().map(|s| s.as_str().to_string()).unwrap_or_default(),
        progress,
        row.capacity_units.to_string(),
        row.status.token().to_string(),
        row.sack_count_raw.to_string(),
        row.sack_count_standard.to_string(),
        row.unit_price.to_string(),
        row.revenue().to_string(),
        row.note.clone(),
    ]
}

/// Decodes the wire cells of the given 1-based data row.
///
/// Callers skip blank rows via [`is_blank`] before calling this.
pub fn decode(row_number: u32, cells: &[String]) -> Result<LedgerRow, RowDecodeError> {
    let cell = |i: usize| cells.get(i).map(|c| c.trim()).unwrap_or("");

    let timestamp = Timestamp::parse(cell(0)).map_err(|_| RowDecodeError::BadTimestamp {
        row: row_number,
        value: cell(0).to_string(),
    })?;
    let work_date = WorkDate::parse(cell(1)).map_err(|_| RowDecodeError::BadWorkDate {
        row: row_number,
        value: cell(1).to_string(),
    })?;
    let reporter = cell(2).to_string();

    let site = match cell(3) {
        "" => None,
        raw => Some(SiteId::new(raw).map_err(|_| RowDecodeError::WorkRowWithoutSite {
            row: row_number,
        })?),
    };

    let number = |i: usize, column: &'static str| -> Result<u32, RowDecodeError> {
        let raw = cell(i);
        if raw.is_empty() {
            return Ok(0);
        }
        raw.parse().map_err(|_| RowDecodeError::BadNumber {
            row: row_number,
            column,
            value: raw.to_string(),
        })
    };

    let reported_units = match cell(4) {
        "" => ReportedUnits::FullCut,
        raw => ReportedUnits::Delta(raw.parse().map_err(|_| RowDecodeError::BadNumber {
            row: row_number,
            column: "progressUnits",
            value: raw.to_string(),
        })?),
    };

    let capacity_units = number(5, "capacityUnits")?;
    let status = RowStatus::from_token(cell(6)).ok_or_else(|| RowDecodeError::BadStatus {
        row: row_number,
        value: cell(6).to_string(),
    })?;
    let sack_count_raw = number(7, "sackCountRaw")?;
    let sack_count_standard = number(8, "sackCountStandard")?;
    let unit_price = number(9, "unitPrice")?;
    // Column 10 (revenue) is intentionally ignored: always rederived.
    let note = cell(11).to_string();

    if status.is_rest() {
        if let Some(site) = site {
            return Err(RowDecodeError::RestRowWithSite {
                row: row_number,
                site: site.as_str().to_string(),
            });
        }
        return Ok(LedgerRow::rest(timestamp, work_date, reporter, status, note));
    }

    let site = site.ok_or(RowDecodeError::WorkRowWithoutSite { row: row_number })?;
    Ok(LedgerRow::work(
        timestamp,
        work_date,
        reporter,
        site,
        reported_units,
        capacity_units,
        status,
        sack_count_raw,
        sack_count_standard,
        unit_price,
        note,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_work_row() -> LedgerRow {
        LedgerRow::work(
            Timestamp::parse("2025-03-02T07:15:00Z").unwrap(),
            WorkDate::from_ymd(2025, 3, 1).unwrap(),
            "kim",
            SiteId::new("A27").unwrap(),
            ReportedUnits::Delta(30),
            60,
            RowStatus::PartialCut,
            43,
            60,
            220,
            "east rows first",
        )
    }

    #[test]
    fn encode_produces_twelve_columns() {
        let cells = encode(&sample_work_row());
        assert_eq!(cells.len(), COLUMN_COUNT);
        assert_eq!(cells[3], "A27");
        assert_eq!(cells[4], "30");
        assert_eq!(cells[6], "partial_cut");
        assert_eq!(cells[10], (60u64 * 220 * 1000).to_string());
    }

    #[test]
    fn decode_roundtrips_a_work_row() {
        let row = sample_work_row();
        let decoded = decode(1, &encode(&row)).unwrap();
        assert_eq!(decoded, row);
    }

    #[test]
    fn decode_roundtrips_a_rest_row() {
        let row = LedgerRow::rest(
            Timestamp::parse("2025-03-02T07:15:00Z").unwrap(),
            WorkDate::from_ymd(2025, 3, 1).unwrap(),
            "kim",
            RowStatus::RestShore,
            "swell too high",
        );
        let decoded = decode(4, &encode(&row)).unwrap();
        assert_eq!(decoded, row);
    }

    #[test]
    fn empty_progress_cell_means_full_cut() {
        let mut cells = encode(&sample_work_row());
        cells[4] = String::new();
        let decoded = decode(1, &cells).unwrap();
        assert_eq!(decoded.reported_units, ReportedUnits::FullCut);
    }

    #[test]
    fn decode_tolerates_trailing_blank_cells() {
        let mut cells = encode(&sample_work_row());
        cells.truncate(10); // store trimmed empty price/revenue/note tail
        cells[9] = String::new();
        let decoded = decode(1, &cells).unwrap();
        assert_eq!(decoded.unit_price, 0);
        assert_eq!(decoded.note, "");
    }

    #[test]
    fn stored_revenue_is_ignored_and_rederived() {
        let mut cells = encode(&sample_work_row());
        cells[10] = "999999".to_string(); // inconsistent with its inputs
        let decoded = decode(1, &cells).unwrap();
        assert_eq!(decoded.revenue(), 60 * 220 * 1000);
    }

    #[test]
    fn blank_row_is_a_gap() {
        assert!(is_blank(&vec![String::new(); COLUMN_COUNT]));
        assert!(is_blank(&[]));
        assert!(!is_blank(&encode(&sample_work_row())));
    }

    #[test]
    fn malformed_cells_report_row_number() {
        let mut cells = encode(&sample_work_row());
        cells[0] = "yesterday-ish".to_string();
        match decode(7, &cells) {
            Err(RowDecodeError::BadTimestamp { row, .. }) => assert_eq!(row, 7),
            other => panic!("expected BadTimestamp, got {:?}", other),
        }

        let mut cells = encode(&sample_work_row());
        cells[6] = "done".to_string();
        assert!(matches!(
            decode(2, &cells),
            Err(RowDecodeError::BadStatus { row: 2, .. })
        ));

        let mut cells = encode(&sample_work_row());
        cells[7] = "many".to_string();
        assert!(matches!(
            decode(3, &cells),
            Err(RowDecodeError::BadNumber { column: "sackCountRaw", .. })
        ));
    }

    #[test]
    fn rest_row_with_site_is_rejected() {
        let rest = LedgerRow::rest(
            Timestamp::from_unix_secs(0),
            WorkDate::from_ymd(2025, 3, 1).unwrap(),
            "kim",
            RowStatus::RestWind,
            "",
        );
        let mut cells = encode(&rest);
        cells[3] = "A27".to_string();
        assert!(matches!(
            decode(5, &cells),
            Err(RowDecodeError::RestRowWithSite { row: 5, .. })
        ));
    }

    #[test]
    fn work_row_without_site_is_rejected() {
        let mut cells = encode(&sample_work_row());
        cells[3] = String::new();
        assert!(matches!(
            decode(6, &cells),
            Err(RowDecodeError::WorkRowWithoutSite { row: 6 })
        ));
    }
}
