//! Unit tests for the cents arithmetic module
//!
//! Tests cover conversion at the boundary, the safe arithmetic helpers,
//! accumulation without drift and rates.

use core_kernel::money::{
    ensure_positive, from_cents, safe_add, safe_div, safe_mul, safe_percent, safe_sub,
    sum_amounts, to_cents, Cents, Rate,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod conversion {
    use super::*;

    #[test]
    fn test_to_cents_multiplies_by_hundred() {
        assert_eq!(to_cents(dec!(100.50)).value(), 10050);
        assert_eq!(to_cents(dec!(0.01)).value(), 1);
    }

    #[test]
    fn test_to_cents_of_zero() {
        assert_eq!(to_cents(Decimal::ZERO), Cents::ZERO);
    }

    #[test]
    fn test_to_cents_of_negative_amount() {
        assert_eq!(to_cents(dec!(-42.10)).value(), -4210);
    }

    #[test]
    fn test_to_cents_absorbs_representation_noise() {
        assert_eq!(to_cents(dec!(10.50000000001)).value(), 1050);
        assert_eq!(to_cents(dec!(0.30000000000000004)).value(), 30);
    }

    #[test]
    fn test_from_cents_has_two_decimal_places() {
        let amount = from_cents(Cents::new(7));
        assert_eq!(amount, dec!(0.07));
        assert_eq!(amount.scale(), 2);
    }

    #[test]
    fn test_round_trip_cents_first() {
        for minor in [-100_001, -1, 0, 1, 99, 123_456_789] {
            let cents = Cents::new(minor);
            assert_eq!(to_cents(from_cents(cents)), cents);
        }
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_safe_add_and_sub() {
        assert_eq!(safe_add(dec!(0.1), dec!(0.2)), dec!(0.30));
        assert_eq!(safe_sub(dec!(1.00), dec!(0.99)), dec!(0.01));
    }

    #[test]
    fn test_safe_mul_rounds_once() {
        assert_eq!(safe_mul(dec!(10.00), dec!(0.333)), dec!(3.33));
        assert_eq!(safe_mul(dec!(0.05), dec!(0.5)), dec!(0.03));
    }

    #[test]
    fn test_safe_div_rounds_to_cents() {
        assert_eq!(safe_div(dec!(700), dec!(11)), dec!(63.64));
        assert_eq!(safe_div(dec!(1200), dec!(12)), dec!(100));
    }

    #[test]
    fn test_safe_div_by_zero_returns_zero() {
        assert_eq!(safe_div(dec!(700), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_safe_percent() {
        assert_eq!(safe_percent(dec!(80), dec!(12.5)), dec!(10.00));
    }

    #[test]
    fn test_sum_amounts_does_not_drift() {
        let total = sum_amounts(std::iter::repeat(dec!(0.1)).take(1000));
        assert_eq!(total, Cents::new(10_000));
        assert_eq!(from_cents(total), dec!(100));
    }

    #[test]
    fn test_cents_operators() {
        let mut total = Cents::new(500);
        total += Cents::new(250);
        total -= Cents::new(1000);
        assert_eq!(total, Cents::new(-250));
        assert_eq!(-total, Cents::new(250));
        assert_eq!(total.abs(), Cents::new(250));
        assert_eq!(total.clamp_non_negative(), Cents::ZERO);
    }

    #[test]
    fn test_cents_saturate_instead_of_overflowing() {
        assert_eq!(Cents::new(i64::MAX) + Cents::new(1), Cents::new(i64::MAX));
    }
}

mod validation {
    use super::*;

    #[test]
    fn test_ensure_positive_accepts_a_cent() {
        assert_eq!(ensure_positive(dec!(0.01), "amount").unwrap(), Cents::new(1));
    }

    #[test]
    fn test_ensure_positive_names_the_field() {
        let error = ensure_positive(dec!(-5), "deposit").unwrap_err();
        assert!(error.to_string().contains("deposit"));
    }
}

mod rates {
    use super::*;

    #[test]
    fn test_rate_from_percentage() {
        let rate = Rate::from_percentage(dec!(24));
        assert_eq!(rate.as_decimal(), dec!(0.24));
        assert_eq!(rate.as_percentage(), dec!(24));
    }

    #[test]
    fn test_rate_monthly_and_apply() {
        let monthly = Rate::from_percentage(dec!(24)).monthly();
        assert_eq!(monthly.as_decimal(), dec!(0.02));
        assert_eq!(monthly.apply(dec!(1000)), dec!(20.00));
    }

    #[test]
    fn test_zero_rate() {
        assert!(Rate::from_percentage(Decimal::ZERO).is_zero());
    }
}
