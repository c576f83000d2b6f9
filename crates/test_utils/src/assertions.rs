//! Custom Test Assertions
//!
//! Assertion helpers for amounts that give more meaningful messages
//! than plain `assert_eq!`.

use core_kernel::{from_cents, Cents};
use rust_decimal::Decimal;

/// Asserts that two amounts are equal once rounded to cents
///
/// # Panics
///
/// Panics if the amounts differ by at least one cent
pub fn assert_amount_eq(actual: Decimal, expected: Decimal) {
    let (a, e) = (core_kernel::to_cents(actual), core_kernel::to_cents(expected));
    assert_eq!(
        a, e,
        "Amounts differ: actual={}, expected={}",
        actual, expected
    );
}

/// Asserts that two amounts are within `tolerance` of each other
///
/// # Arguments
///
/// * `actual` - The computed amount
/// * `expected` - The expected amount
/// * `tolerance` - The allowed absolute difference
pub fn assert_amount_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a cents value matches a major-unit amount
pub fn assert_cents_eq(actual: Cents, expected: Decimal) {
    assert_eq!(
        from_cents(actual),
        expected,
        "Cents mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that an amount is not negative
pub fn assert_non_negative(amount: Decimal) {
    assert!(
        amount >= Decimal::ZERO,
        "Expected a non-negative amount, got {}",
        amount
    );
}

/// Asserts that dates are in descending order
pub fn assert_sorted_desc(dates: &[chrono::NaiveDate]) {
    for pair in dates.windows(2) {
        assert!(
            pair[0] >= pair[1],
            "Dates out of order: {} before {}",
            pair[0],
            pair[1]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_assert_amount_eq_ignores_scale() {
        assert_amount_eq(dec!(10.5), dec!(10.50));
    }

    #[test]
    #[should_panic(expected = "Amounts differ")]
    fn test_assert_amount_eq_fails_on_cent() {
        assert_amount_eq(dec!(10.50), dec!(10.51));
    }

    #[test]
    fn test_assert_approx() {
        assert_amount_approx_eq(dec!(888.49), dec!(888.488), dec!(0.01));
    }
}
