//! Money arithmetic in integer minor units
//!
//! Amounts enter and leave the system as `Decimal` major units (what the
//! user types and what the document store persists). Every summation of
//! more than one term is carried out in [`Cents`], so repeated additions
//! and subtractions never drift.
//!
//! ```rust
//! use core_kernel::money::{to_cents, from_cents, safe_add};
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(to_cents(dec!(10.50000000001)).value(), 1050);
//! assert_eq!(from_cents(to_cents(dec!(19.99))), dec!(19.99));
//! assert_eq!(safe_add(dec!(0.1), dec!(0.2)), dec!(0.30));
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::error::CoreError;

/// Minor units per major unit
pub const MINOR_PER_MAJOR: i64 = 100;

/// Decimal places of a major-unit amount
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// A signed amount of minor units (cents)
///
/// This is the only type balances are accumulated in. Conversion back to
/// a major-unit `Decimal` happens once, at the output boundary.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    /// Creates a value from a raw count of minor units
    pub const fn new(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Converts a major-unit amount, rounding half away from zero
    ///
    /// Amounts outside the `i64` cents range saturate.
    pub fn from_amount(amount: Decimal) -> Self {
        let saturated = if amount.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        };
        let minor = amount
            .checked_mul(Decimal::from(MINOR_PER_MAJOR))
            .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|scaled| scaled.to_i64())
            .unwrap_or(saturated);
        Self(minor)
    }

    /// Converts back to a major-unit amount with two decimal places
    pub fn to_amount(self) -> Decimal {
        Decimal::new(self.0, AMOUNT_DECIMAL_PLACES)
    }

    /// Returns the raw minor-unit count
    pub const fn value(self) -> i64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Floors negative values at zero
    pub fn clamp_non_negative(self) -> Self {
        Self(self.0.max(0))
    }

    /// Multiplies by a decimal factor, rounding once
    pub fn scale(self, factor: Decimal) -> Self {
        Self::from_amount(self.to_amount() * factor)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.to_amount())
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Sub for Cents {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Neg for Cents {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for Cents {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Self {
        iter.fold(Cents::ZERO, |acc, c| acc + c)
    }
}

impl<'a> Sum<&'a Cents> for Cents {
    fn sum<I: Iterator<Item = &'a Cents>>(iter: I) -> Self {
        iter.fold(Cents::ZERO, |acc, c| acc + *c)
    }
}

impl From<i64> for Cents {
    fn from(minor_units: i64) -> Self {
        Self(minor_units)
    }
}

/// Converts a major-unit amount to cents: `round(amount * 100)`
pub fn to_cents(amount: Decimal) -> Cents {
    Cents::from_amount(amount)
}

/// Converts cents back to a major-unit amount: `cents / 100`
pub fn from_cents(cents: Cents) -> Decimal {
    cents.to_amount()
}

/// Adds two amounts through cents
pub fn safe_add(a: Decimal, b: Decimal) -> Decimal {
    from_cents(to_cents(a) + to_cents(b))
}

/// Subtracts two amounts through cents
pub fn safe_sub(a: Decimal, b: Decimal) -> Decimal {
    from_cents(to_cents(a) - to_cents(b))
}

/// Multiplies an amount by a factor, rounding once to cents
pub fn safe_mul(amount: Decimal, factor: Decimal) -> Decimal {
    from_cents(to_cents(amount).scale(factor))
}

/// Divides an amount, rounding once to cents
///
/// A zero divisor yields zero instead of an error.
pub fn safe_div(amount: Decimal, divisor: Decimal) -> Decimal {
    if divisor.is_zero() {
        return Decimal::ZERO;
    }
    let minor = Decimal::from(to_cents(amount).value()) / divisor;
    from_cents(Cents::from_amount(minor / Decimal::from(MINOR_PER_MAJOR)))
}

/// Applies a percentage (e.g. `15` for 15%) to an amount
pub fn safe_percent(amount: Decimal, percent: Decimal) -> Decimal {
    safe_mul(amount, percent / dec!(100))
}

/// Sums any number of major-unit amounts in cents
pub fn sum_amounts<I>(amounts: I) -> Cents
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().map(to_cents).sum()
}

/// Validates a user-entered amount and returns it in cents
///
/// Amounts that round to zero cents or below are rejected.
pub fn ensure_positive(amount: Decimal, field: &str) -> Result<Cents, CoreError> {
    let cents = to_cents(amount);
    if !cents.is_positive() {
        return Err(CoreError::non_positive(field, amount));
    }
    Ok(cents)
}

/// Represents a percentage rate (e.g., an annual interest rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.05 for 5%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.05 for 5%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g., 5.0 for 5%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Converts an annual rate into its nominal monthly rate
    pub fn monthly(&self) -> Self {
        Self {
            value: self.value / dec!(12),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Applies this rate to an amount
    pub fn apply(&self, amount: Decimal) -> Decimal {
        safe_mul(amount, self.value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().round_dp(4).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cents_strips_float_noise() {
        assert_eq!(to_cents(dec!(10.50000000001)), Cents::new(1050));
        assert_eq!(to_cents(dec!(10.499999999)), Cents::new(1050));
    }

    #[test]
    fn test_to_cents_rounds_half_away_from_zero() {
        assert_eq!(to_cents(dec!(0.005)), Cents::new(1));
        assert_eq!(to_cents(dec!(-0.005)), Cents::new(-1));
    }

    #[test]
    fn test_to_cents_saturates_beyond_decimal_range() {
        let huge = Decimal::from_str_exact("1000000000000000000000000000").unwrap();
        assert_eq!(to_cents(huge), Cents::new(i64::MAX));
        assert_eq!(to_cents(-huge), Cents::new(i64::MIN));
        assert_eq!(to_cents(Decimal::MAX), Cents::new(i64::MAX));
    }

    #[test]
    fn test_ensure_positive_accepts_saturated_amount() {
        let huge = Decimal::from_str_exact("1000000000000000000000000000").unwrap();
        assert_eq!(ensure_positive(huge, "amount").unwrap(), Cents::new(i64::MAX));
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(from_cents(Cents::new(10050)), dec!(100.50));
        assert_eq!(from_cents(Cents::new(-1)), dec!(-0.01));
    }

    #[test]
    fn test_safe_add_has_no_drift() {
        let mut total = Decimal::ZERO;
        for _ in 0..10 {
            total = safe_add(total, dec!(0.1));
        }
        assert_eq!(total, dec!(1.00));
    }

    #[test]
    fn test_safe_div_by_zero_is_zero() {
        assert_eq!(safe_div(dec!(100), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(safe_div(dec!(100), dec!(3)), dec!(33.33));
    }

    #[test]
    fn test_safe_percent() {
        assert_eq!(safe_percent(dec!(250), dec!(10)), dec!(25.00));
        assert_eq!(safe_mul(dec!(19.99), dec!(3)), dec!(59.97));
    }

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive(dec!(12.5), "amount").unwrap(), Cents::new(1250));
        assert!(ensure_positive(Decimal::ZERO, "amount").is_err());
        assert!(ensure_positive(dec!(0.004), "amount").is_err());
        assert!(ensure_positive(dec!(-3), "amount").is_err());
    }

    #[test]
    fn test_cents_clamp_and_display() {
        assert_eq!(Cents::new(-500).clamp_non_negative(), Cents::ZERO);
        assert_eq!(Cents::new(123456).to_string(), "1234.56");
    }

    #[test]
    fn test_rate_monthly() {
        let rate = Rate::from_percentage(dec!(12));
        assert_eq!(rate.monthly().as_decimal(), dec!(0.01));
        assert_eq!(rate.to_string(), "12%");
    }
}
