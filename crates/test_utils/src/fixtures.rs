//! Pre-built Test Fixtures
//!
//! Provides ready-to-use dates and amounts. These fixtures are consistent
//! and predictable so tests can reason about month boundaries.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{Clock, FixedClock, UserId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for calendar test data
pub struct DateFixtures;

impl DateFixtures {
    /// Builds a date, panicking on invalid input
    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
    }

    /// The reference "today" used across suites (Mar 15, 2024)
    pub fn today() -> NaiveDate {
        Self::ymd(2024, 3, 15)
    }

    /// First day of the reference month
    pub fn month_start() -> NaiveDate {
        Self::ymd(2024, 3, 1)
    }

    /// Last day of the reference month
    pub fn month_end() -> NaiveDate {
        Self::ymd(2024, 3, 31)
    }

    /// A day in the previous month
    pub fn last_month() -> NaiveDate {
        Self::ymd(2024, 2, 10)
    }

    /// A day in the following month
    pub fn next_month() -> NaiveDate {
        Self::ymd(2024, 4, 10)
    }

    /// Start of the year, used as a default credit/goal start
    pub fn year_start() -> NaiveDate {
        Self::ymd(2024, 1, 1)
    }

    /// Leap day, for end-of-month clamping
    pub fn leap_day() -> NaiveDate {
        Self::ymd(2024, 2, 29)
    }

    /// A clock frozen at noon UTC on [`DateFixtures::today`]
    pub fn clock() -> Arc<dyn Clock> {
        Self::clock_at(Self::today())
    }

    /// A clock frozen at noon UTC on `date`
    pub fn clock_at(date: NaiveDate) -> Arc<dyn Clock> {
        Arc::new(FixedClock::at_date(date))
    }
}

/// Fixture for money test data
pub struct AmountFixtures;

impl AmountFixtures {
    /// A typical monthly salary
    pub fn salary() -> Decimal {
        dec!(3000.00)
    }

    /// A typical monthly rent
    pub fn rent() -> Decimal {
        dec!(1200.00)
    }

    /// A small everyday expense
    pub fn coffee() -> Decimal {
        dec!(3.50)
    }

    /// A goal target
    pub fn goal_target() -> Decimal {
        dec!(1200.00)
    }

    /// A credit principal
    pub fn principal() -> Decimal {
        dec!(10000.00)
    }

    /// An annual interest rate in percent
    pub fn annual_rate() -> Decimal {
        dec!(12)
    }

    /// A project budget
    pub fn project_budget() -> Decimal {
        dec!(5000.00)
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// A fresh signed-in user
    pub fn user() -> UserId {
        UserId::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_month_is_consistent() {
        assert!(DateFixtures::month_start() <= DateFixtures::today());
        assert!(DateFixtures::today() <= DateFixtures::month_end());
        assert_eq!(DateFixtures::clock().now().date_naive(), DateFixtures::today());
    }
}
