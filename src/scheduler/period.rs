//! Day and period arithmetic shared by the allocator and the forecaster
//!
//! Everything here is UTC-only and a pure function of its arguments.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use std::fmt;

use super::cadence::CadencePeriod;

// ============================================================================
// Period Key
// ============================================================================

/// Bucket identifying the capacity-reset window that contains a date
///
/// Two dates share a period exactly when their keys are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeriodKey {
    /// The calendar date itself
    Day(NaiveDate),
    /// Monday that starts the week
    Week(NaiveDate),
    /// Calendar month
    Month { year: i32, month: u32 },
}

impl PeriodKey {
    /// Key of the period of type `period` that contains `date`
    pub fn for_date(date: NaiveDate, period: CadencePeriod) -> Self {
        match period {
            CadencePeriod::Daily => Self::Day(date),
            CadencePeriod::Weekly => Self::Week(start_of_week(date)),
            CadencePeriod::Monthly => Self::Month {
                year: date.year(),
                month: date.month(),
            },
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) | Self::Week(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

// ============================================================================
// Day Arithmetic
// ============================================================================

/// Monday on or before `date`
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(offset)
}

/// UTC midnight of the day containing `at`
pub fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    midnight(at.date_naive())
}

/// UTC midnight of `date`
pub fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// `date` shifted by `days`, or `None` past the calendar range
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

/// Consecutive dates starting at `start`
pub fn days_from(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), |d| d.succ_opt())
}

// ============================================================================
// Timestamps
// ============================================================================

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse an ISO-8601 timestamp
///
/// Accepts RFC 3339 with an offset, a date-time without offset (read as UTC),
/// or a bare date (UTC midnight). Returns `None` for anything else.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(midnight)
}

/// Format as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ============================================================================
// Tests
// ============================================================================
