//! WorkDate value object - the site-local calendar day labor occurred.
//!
//! Distinct from [`Timestamp`](super::Timestamp): a row's timestamp is the
//! instant it was appended, while its work date is the day the harvest crew
//! was actually on the water. Rows are ordered by `(work_date, timestamp)`
//! everywhere reconstruction happens.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Site-local calendar date of a harvest or rest day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkDate(NaiveDate);

impl WorkDate {
    /// Wraps an existing calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a work date from year/month/day, if the combination is valid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses the `YYYY-MM-DD` form used in the ledger's date column.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }

    /// The local calendar day at `now`, shifted by the site's UTC offset.
    pub fn today_local(now: Timestamp, utc_offset_hours: i64) -> Self {
        Self(now.plus_hours(utc_offset_hours).as_datetime().date_naive())
    }

    /// The day before this one.
    pub fn previous_day(&self) -> Self {
        Self(self.0.pred_opt().expect("calendar underflow"))
    }

    /// This date plus a number of days (forecast arithmetic).
    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Resolves a bare day-of-month against `today`'s month.
    ///
    /// A day still in the future relative to today rolls back one month
    /// (a crew reporting "the 28th" on the 3rd means last month's 28th).
    /// Days that fit neither month (e.g. 31 in a 30-day month) resolve to
    /// `None`.
    pub fn resolve_day_override(today: WorkDate, day: u32) -> Option<Self> {
        if day == 0 || day > 31 {
            return None;
        }
        let this_month = NaiveDate::from_ymd_opt(today.0.year(), today.0.month(), day);
        match this_month {
            Some(d) if d <= today.0 => Some(Self(d)),
            _ => {
                let (year, month) = if today.0.month() == 1 {
                    (today.0.year() - 1, 12)
                } else {
                    (today.0.year(), today.0.month() - 1)
                };
                NaiveDate::from_ymd_opt(year, month, day).map(Self)
            }
        }
    }

    /// Returns the `(year, month)` bucket for monthly aggregation.
    pub fn month_key(&self) -> (i32, u32) {
        (self.0.year(), self.0.month())
    }

    /// True when both dates fall in the same calendar month.
    pub fn same_month(&self, other: &WorkDate) -> bool {
        self.month_key() == other.month_key()
    }

    /// Returns the inner date.
    pub fn as_date(&self) -> &NaiveDate {
        &self.0
    }
}

impl std::fmt::Display for WorkDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> WorkDate {
        WorkDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn work_date_parse_roundtrips_through_display() {
        let d = date(2025, 3, 7);
        assert_eq!(WorkDate::parse(&d.to_string()).unwrap(), d);
    }

    #[test]
    fn today_local_shifts_across_midnight() {
        // 20:00 UTC is already the next day at UTC+9.
        let now = Timestamp::parse("2025-03-01T20:00:00Z").unwrap();
        assert_eq!(WorkDate::today_local(now, 9), date(2025, 3, 2));
        assert_eq!(WorkDate::today_local(now, 0), date(2025, 3, 1));
    }

    #[test]
    fn previous_day_crosses_month_boundary() {
        assert_eq!(date(2025, 3, 1).previous_day(), date(2025, 2, 28));
    }

    #[test]
    fn day_override_in_the_past_stays_in_current_month() {
        let today = date(2025, 3, 20);
        assert_eq!(
            WorkDate::resolve_day_override(today, 12),
            Some(date(2025, 3, 12))
        );
    }

    #[test]
    fn day_override_same_day_is_today() {
        let today = date(2025, 3, 20);
        assert_eq!(
            WorkDate::resolve_day_override(today, 20),
            Some(date(2025, 3, 20))
        );
    }

    #[test]
    fn day_override_in_the_future_rolls_back_one_month() {
        let today = date(2025, 3, 3);
        assert_eq!(
            WorkDate::resolve_day_override(today, 28),
            Some(date(2025, 2, 28))
        );
    }

    #[test]
    fn day_override_rolls_january_back_into_december() {
        let today = date(2025, 1, 2);
        assert_eq!(
            WorkDate::resolve_day_override(today, 15),
            Some(date(2024, 12, 15))
        );
    }

    #[test]
    fn day_override_invalid_in_both_months_is_none() {
        // Neither April nor March 2025... March has 31, April has 30.
        // Use a day no month has.
        let today = date(2025, 4, 10);
        assert_eq!(WorkDate::resolve_day_override(today, 32), None);
        assert_eq!(WorkDate::resolve_day_override(today, 0), None);
        // 31 in April rolls back to March 31, which exists.
        assert_eq!(
            WorkDate::resolve_day_override(today, 31),
            Some(date(2025, 3, 31))
        );
        // 30 on March 2 rolls back to February, which has no 30th.
        let early_march = date(2025, 3, 2);
        assert_eq!(WorkDate::resolve_day_override(early_march, 30), None);
    }

    #[test]
    fn month_key_groups_by_calendar_month() {
        assert!(date(2025, 3, 1).same_month(&date(2025, 3, 31)));
        assert!(!date(2025, 3, 1).same_month(&date(2025, 4, 1)));
        assert!(!date(2024, 3, 1).same_month(&date(2025, 3, 1)));
    }
}
