//! Unit tests for the calendar helpers
//!
//! Tests cover month boundaries, month arithmetic, date ranges, clocks
//! and timezone-aware "today".

use chrono::{NaiveDate, TimeZone, Utc};
use core_kernel::temporal::{
    add_months, end_of_day, end_of_month, months_between, parse_month, same_month,
    start_of_month, Clock, DateRange, FixedClock, TemporalError, Timezone,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod month_boundaries {
    use super::*;

    #[test]
    fn test_start_of_month() {
        assert_eq!(start_of_month(date(2026, 10, 19)), date(2026, 10, 1));
    }

    #[test]
    fn test_end_of_month_thirty_day_month() {
        assert_eq!(end_of_month(date(2026, 11, 3)), date(2026, 11, 30));
    }

    #[test]
    fn test_end_of_month_is_idempotent() {
        let eom = end_of_month(date(2026, 1, 15));
        assert_eq!(end_of_month(eom), eom);
    }

    #[test]
    fn test_end_of_day_is_last_instant() {
        let eod = end_of_day(date(2026, 10, 19));
        assert_eq!(eod.date(), date(2026, 10, 19));
        assert!(eod > date(2026, 10, 19).and_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn test_same_month() {
        assert!(same_month(date(2026, 10, 1), date(2026, 10, 31)));
        assert!(!same_month(date(2026, 10, 1), date(2025, 10, 1)));
    }
}

mod month_arithmetic {
    use super::*;

    #[test]
    fn test_months_between_across_years() {
        assert_eq!(months_between(date(2025, 12, 31), date(2026, 1, 1)), 1);
        assert_eq!(months_between(date(2026, 1, 1), date(2026, 12, 31)), 11);
    }

    #[test]
    fn test_months_between_same_month_is_zero() {
        assert_eq!(months_between(date(2026, 5, 1), date(2026, 5, 31)), 0);
    }

    #[test]
    fn test_add_months_across_year_end() {
        assert_eq!(add_months(date(2026, 11, 15), 3), date(2027, 2, 15));
    }

    #[test]
    fn test_parse_month_rejects_garbage() {
        assert_eq!(
            parse_month("oct-2026"),
            Err(TemporalError::InvalidMonth("oct-2026".to_string()))
        );
    }
}

mod date_range {
    use super::*;

    #[test]
    fn test_range_is_inclusive() {
        let range = DateRange::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap();
        assert!(range.contains(date(2026, 1, 1)));
        assert!(range.contains(date(2026, 1, 31)));
        assert_eq!(range.days(), 30);
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(date(2026, 1, 1), date(2026, 1, 1)).unwrap();
        assert_eq!(range.days(), 0);
    }

    #[test]
    fn test_inverted_range_fails() {
        let result = DateRange::new(date(2026, 2, 1), date(2026, 1, 1));
        assert!(matches!(result, Err(TemporalError::InvalidPeriod { .. })));
    }
}

mod clocks {
    use super::*;

    #[test]
    fn test_fixed_clock_is_frozen() {
        let instant = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_today_depends_on_timezone() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 2, 0, 0).unwrap());
        let madrid = Timezone::parse("Europe/Madrid").unwrap();
        let lima = Timezone::parse("America/Lima").unwrap();

        assert_eq!(madrid.today(&clock), date(2026, 3, 1));
        assert_eq!(lima.today(&clock), date(2026, 2, 28));
    }

    #[test]
    fn test_invalid_timezone_name() {
        assert!(matches!(
            Timezone::parse("Mars/Olympus"),
            Err(TemporalError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_timezone_serializes_as_name() {
        let tz = Timezone::parse("America/Bogota").unwrap();
        let json = serde_json::to_string(&tz).unwrap();
        assert_eq!(json, "\"America/Bogota\"");
        let back: Timezone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tz);
    }
}
