//! Integration tests for domain_savings

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::money::{from_cents, Cents};
use domain_savings::{
    monthly_quota, months_remaining, total_savings_at_date, AutoSaveConfig, Fund, Goal,
    GoalProgress, GoalStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Quota Convergence Tests
// ============================================================================

mod quota_tests {
    use super::*;

    #[test]
    fn test_quota_converges_over_a_year() {
        let start = date(2026, 1, 1);
        let mut goal = Goal::new("Motorbike", dec!(1200), start).with_deadline(date(2027, 1, 1));

        assert_eq!(from_cents(monthly_quota(&goal, start)), dec!(100));

        goal.contribute(dec!(500), date(2026, 1, 15), "bonus").unwrap();
        let february = date(2026, 2, 1);

        assert_eq!(months_remaining(&goal, february), 11);
        assert_eq!(from_cents(monthly_quota(&goal, february)), dec!(63.64));
    }

    #[test]
    fn test_missed_month_raises_next_quota() {
        let goal = Goal::new("Trip", dec!(600), date(2026, 1, 1)).with_deadline(date(2026, 7, 1));

        let january = monthly_quota(&goal, date(2026, 1, 10));
        let march = monthly_quota(&goal, date(2026, 3, 10));

        assert_eq!(january, Cents::new(10_000));
        assert_eq!(march, Cents::new(15_000));
    }

    #[test]
    fn test_progress_serializes_camel_case() {
        let goal = Goal::new("Trip", dec!(600), date(2026, 1, 1)).with_deadline(date(2026, 7, 1));
        let progress = GoalProgress::compute(&goal, date(2026, 1, 10), Cents::new(100));
        let json = serde_json::to_value(&progress).unwrap();

        assert_eq!(progress.status, GoalStatus::Behind);
        assert_eq!(json["monthlyQuota"], 100.0);
        assert_eq!(json["monthsRemaining"], 6);
        assert_eq!(json["status"], "behind");
    }
}

// ============================================================================
// Savings Aggregation Tests
// ============================================================================

mod aggregation_tests {
    use super::*;

    #[test]
    fn test_total_savings_with_no_goals() {
        assert_eq!(total_savings_at_date(&[], date(2026, 1, 1)), Cents::ZERO);
    }

    #[test]
    fn test_historical_total_ignores_cache() {
        let mut goal = Goal::new("Car", dec!(9000), date(2026, 1, 1));
        goal.contribute(dec!(1000), date(2026, 1, 10), "").unwrap();
        goal.contribute(dec!(1000), date(2026, 2, 10), "").unwrap();
        goal.current_amount = dec!(123456);

        assert_eq!(total_savings_at_date(&[goal], date(2026, 1, 5)), Cents::new(100_000));
    }

    #[test]
    fn test_fund_auto_save_across_months() {
        let mut fund = Fund::new("Rainy day").with_auto_save(AutoSaveConfig::monthly(dec!(25), 10));

        for month in 1..=3 {
            fund.apply_auto_save(date(2026, month, 10)).unwrap();
        }

        assert_eq!(fund.current_amount, dec!(75));
        assert_eq!(fund.history.len(), 3);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn cache_matches_replay_when_never_overdrawn(
        deposits in prop::collection::vec(1i64..1_000_000i64, 1..30)
    ) {
        let start = date(2026, 1, 1);
        let mut goal = Goal::new("Prop", dec!(1000000), start);
        for (offset, minor) in deposits.iter().enumerate() {
            let day = start.checked_add_days(Days::new(offset as u64)).unwrap();
            goal.contribute(Decimal::new(*minor, 2), day, "").unwrap();
        }

        prop_assert_eq!(goal.current_total(), goal.replayed_total());
    }

    #[test]
    fn replay_never_negative_and_matches_cache(
        moves in prop::collection::vec((1i64..100_000i64, any::<bool>()), 0..30)
    ) {
        let start = date(2026, 1, 1);
        let mut fund = Fund::new("Prop");
        for (offset, (minor, deposit)) in moves.iter().enumerate() {
            let day = start.checked_add_days(Days::new(offset as u64)).unwrap();
            let amount = Decimal::new(*minor, 2);
            if *deposit {
                fund.deposit(amount, day, "").unwrap();
            } else {
                fund.withdraw(amount, day, "").unwrap();
            }
        }

        for offset in 0..31u64 {
            let day = start.checked_add_days(Days::new(offset)).unwrap();
            prop_assert!(!fund.total_as_of(day).is_negative());
        }
        prop_assert!(!fund.current_total().is_negative());
        prop_assert_eq!(fund.current_total(), fund.replayed_total());
    }
}
