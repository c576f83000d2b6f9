//! Calendar handling for balance and quota computations
//!
//! Records carry plain ISO dates (`YYYY-MM-DD`). Every "as of today"
//! computation asks an injected [`Clock`] for the instant and a
//! [`Timezone`] for the user's local calendar day, so tests can pin both.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Timezone wrapper for the user's locale
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Timezone::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Parses an IANA timezone name such as `America/Bogota`
    pub fn parse(name: &str) -> Result<Self, TemporalError> {
        Tz::from_str(name)
            .map(Timezone)
            .map_err(|_| TemporalError::InvalidTimezone(name.to_string()))
    }

    /// Returns the local calendar date of a UTC instant
    pub fn local_date(&self, utc: DateTime<Utc>) -> NaiveDate {
        utc.with_timezone(&self.0).date_naive()
    }

    /// Returns the local calendar date "now" according to the clock
    pub fn today(&self, clock: &dyn Clock) -> NaiveDate {
        self.local_date(clock.now())
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod { start: String, end: String },

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real-time clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Freezes the clock at noon UTC of the given date
    pub fn at_date(date: NaiveDate) -> Self {
        Self(
            date.and_hms_opt(12, 0, 0)
                .map(|noon| noon.and_utc())
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Last representable instant of a calendar day (23:59:59.999999999)
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN))
}

/// First day of the month containing `date`
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// True when both dates fall in the same calendar month
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Calendar-month distance ignoring the day of month
///
/// `(to.year - from.year) * 12 + (to.month - from.month)`; negative when
/// `to` lies in an earlier month.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

/// Adds whole months, clamping the day to the target month's length
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Parses a `YYYY-MM` period into the first day of that month
pub fn parse_month(s: &str) -> Result<NaiveDate, TemporalError> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| TemporalError::InvalidMonth(s.to_string()))
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// The whole calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            start: start_of_month(date),
            end: end_of_month(date),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_of_month_handles_leap_years() {
        assert_eq!(end_of_month(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(end_of_month(date(2025, 2, 10)), date(2025, 2, 28));
        assert_eq!(end_of_month(date(2025, 12, 1)), date(2025, 12, 31));
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between(date(2025, 1, 31), date(2025, 12, 1)), 11);
        assert_eq!(months_between(date(2025, 11, 15), date(2026, 2, 1)), 3);
        assert_eq!(months_between(date(2026, 3, 1), date(2026, 1, 1)), -2);
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(date(2025, 1, 31), 1), date(2025, 2, 28));
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2026-10").unwrap(), date(2026, 10, 1));
        assert!(matches!(parse_month("2026-13"), Err(TemporalError::InvalidMonth(_))));
    }

    #[test]
    fn test_local_date_respects_timezone() {
        let tz = Timezone::parse("America/Bogota").unwrap();
        let instant = Utc.with_ymd_and_hms(2026, 1, 1, 3, 0, 0).unwrap();
        assert_eq!(tz.local_date(instant), date(2025, 12, 31));
        assert_eq!(Timezone::default().local_date(instant), date(2026, 1, 1));
    }

    #[test]
    fn test_fixed_clock_today() {
        let clock = FixedClock::at_date(date(2026, 10, 19));
        assert_eq!(Timezone::default().today(&clock), date(2026, 10, 19));
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::month_of(date(2026, 2, 14));
        assert!(range.contains(date(2026, 2, 28)));
        assert!(!range.contains(date(2026, 3, 1)));
        assert!(DateRange::new(date(2026, 2, 2), date(2026, 2, 1)).is_err());
    }
}
