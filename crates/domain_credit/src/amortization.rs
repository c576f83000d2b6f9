//! Annuity amortization: quota, inverse rate solve and schedule
//!
//! The power `(1+r)^n` runs in `f64`; a 96-bit decimal overflows on long
//! terms at high rates. Results are rounded to cents before they leave
//! this module.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use core_kernel::money::{ensure_positive, from_cents, safe_div, to_cents, Cents, Rate};

use crate::error::CreditError;

/// Longest term accepted for a credit, in months
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Checks the inputs every credit calculation shares
///
/// The principal must be positive, the annual rate non-negative and the
/// term between one month and [`MAX_TERM_MONTHS`].
pub fn validate_loan_terms(
    principal: Decimal,
    annual_rate_pct: Decimal,
    term: u32,
) -> Result<(), CreditError> {
    ensure_positive(principal, "principal")?;
    if annual_rate_pct.is_sign_negative() {
        return Err(CreditError::InvalidCredit(format!(
            "interest rate must not be negative, got {}",
            annual_rate_pct
        )));
    }
    if term == 0 || term > MAX_TERM_MONTHS {
        return Err(CreditError::InvalidCredit(format!(
            "term must be between 1 and {} months, got {}",
            MAX_TERM_MONTHS, term
        )));
    }
    Ok(())
}

/// Bisection settings for [`solve_interest_rate`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Fixed number of halvings of the bracket
    pub iterations: u32,
    /// Lower bound of the annual percent bracket
    pub lower_pct: f64,
    /// Upper bound of the annual percent bracket
    pub upper_pct: f64,
    /// Quota difference accepted as a match, in major units
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iterations: 20,
            lower_pct: 0.0,
            upper_pct: 1000.0,
            tolerance: 0.01,
        }
    }
}

fn quota_f64(principal: f64, annual_rate_pct: f64, term: u32) -> f64 {
    if term == 0 {
        return 0.0;
    }
    if annual_rate_pct == 0.0 {
        return principal / f64::from(term);
    }
    let monthly = annual_rate_pct / 100.0 / 12.0;
    let growth = match i32::try_from(term) {
        Ok(exponent) => (1.0 + monthly).powi(exponent),
        Err(_) => (1.0 + monthly).powf(f64::from(term)),
    };
    if !growth.is_finite() {
        // Limit of the annuity formula as (1+r)^n grows without bound
        return principal * monthly;
    }
    principal * monthly * growth / (growth - 1.0)
}

fn round_to_cents(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .map(|amount| from_cents(to_cents(amount)))
        .unwrap_or(Decimal::ZERO)
}

/// Fixed monthly quota repaying `principal` over `term` months
///
/// # Arguments
///
/// * `principal` - Amount borrowed
/// * `annual_rate_pct` - Nominal annual rate in percent (`24` for 24%)
/// * `term` - Number of monthly payments
///
/// # Returns
///
/// The quota rounded to cents; zero for a zero term
///
/// # Example
///
/// ```rust
/// use domain_credit::calculate_quota;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(calculate_quota(dec!(1200), dec!(0), 12), dec!(100));
/// ```
pub fn calculate_quota(principal: Decimal, annual_rate_pct: Decimal, term: u32) -> Decimal {
    if term == 0 {
        return Decimal::ZERO;
    }
    if annual_rate_pct.is_zero() {
        return safe_div(principal, Decimal::from(term));
    }
    let principal = principal.to_f64().unwrap_or(0.0);
    let rate = annual_rate_pct.to_f64().unwrap_or(0.0);
    round_to_cents(quota_f64(principal, rate, term))
}

/// Annual rate in percent that yields `quota` for the given principal and term
///
/// Runs exactly `config.iterations` bisection steps over
/// `[config.lower_pct, config.upper_pct]`, stopping early only when a
/// midpoint reproduces the quota within `config.tolerance`. With the
/// default 20 steps over `[0, 1000]` the bracket ends about 0.001
/// percentage points wide.
///
/// Returns zero when `quota * term` does not exceed the principal, since
/// no positive rate can explain such a quota.
pub fn solve_interest_rate(
    principal: Decimal,
    quota: Decimal,
    term: u32,
    config: &SolverConfig,
) -> Decimal {
    if term == 0 {
        return Decimal::ZERO;
    }
    let total = Cents::new(to_cents(quota).value().saturating_mul(i64::from(term)));
    if total <= to_cents(principal) {
        return Decimal::ZERO;
    }
    let principal = principal.to_f64().unwrap_or(0.0);
    let quota = quota.to_f64().unwrap_or(0.0);

    let mut low = config.lower_pct;
    let mut high = config.upper_pct;
    let mut guess = (low + high) / 2.0;
    for step in 0..config.iterations {
        guess = (low + high) / 2.0;
        let candidate = quota_f64(principal, guess, term);
        if (candidate - quota).abs() < config.tolerance {
            trace!(step, rate = guess, "Rate solver converged");
            break;
        }
        if candidate < quota {
            low = guess;
        } else {
            high = guess;
        }
    }

    Decimal::from_f64(guess)
        .map(|rate| rate.round_dp(4))
        .unwrap_or(Decimal::ZERO)
}

/// One month of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    pub number: u32,
    pub payment: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    /// Outstanding principal after this payment
    pub balance: Decimal,
}

/// Month-by-month split of each quota into interest and principal
///
/// Interest is charged on the outstanding balance at the monthly rate
/// and rounded to cents. The final row takes whatever principal is left,
/// so the schedule always closes at exactly zero.
pub fn amortization_schedule(
    principal: Decimal,
    annual_rate_pct: Decimal,
    term: u32,
) -> Vec<AmortizationRow> {
    let quota = to_cents(calculate_quota(principal, annual_rate_pct, term));
    let monthly = Rate::from_percentage(annual_rate_pct).monthly();
    let mut balance = to_cents(principal);

    (1..=term)
        .map(|number| {
            let interest = to_cents(monthly.apply(from_cents(balance)));
            let principal_part: Cents = if number == term {
                balance
            } else {
                (quota - interest).min(balance)
            };
            balance -= principal_part;
            AmortizationRow {
                number,
                payment: from_cents(interest + principal_part),
                interest: from_cents(interest),
                principal: from_cents(principal_part),
                balance: from_cents(balance),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_interest_quota() {
        assert_eq!(calculate_quota(dec!(1200), Decimal::ZERO, 12), dec!(100));
        assert_eq!(calculate_quota(dec!(1000), Decimal::ZERO, 3), dec!(333.33));
    }

    #[test]
    fn test_annuity_quota() {
        // 10000 at 12% a year over 12 months is the textbook 888.49
        assert_eq!(calculate_quota(dec!(10000), dec!(12), 12), dec!(888.49));
    }

    #[test]
    fn test_zero_term_quota() {
        assert_eq!(calculate_quota(dec!(1000), dec!(10), 0), Decimal::ZERO);
    }

    #[test]
    fn test_huge_term_does_not_overflow() {
        // (1+r)^n is infinite in f64 here, so the quota tends to P * r
        assert_eq!(calculate_quota(dec!(1000), dec!(1000), 2000), dec!(833.33));
    }

    #[test]
    fn test_term_beyond_i32_keeps_sign() {
        let quota = calculate_quota(dec!(1200), dec!(12), 3_000_000_000);
        assert_eq!(quota, dec!(12));
    }

    #[test]
    fn test_loan_terms_are_bounded() {
        assert!(validate_loan_terms(dec!(1000), dec!(12), MAX_TERM_MONTHS).is_ok());
        assert!(validate_loan_terms(dec!(1000), dec!(12), MAX_TERM_MONTHS + 1).is_err());
        assert!(validate_loan_terms(dec!(1000), dec!(12), 0).is_err());
        assert!(validate_loan_terms(dec!(1000), dec!(-1200), 12).is_err());
        assert!(matches!(
            validate_loan_terms(dec!(-5), dec!(12), 12),
            Err(CreditError::Core(_))
        ));
    }

    #[test]
    fn test_solve_returns_zero_without_interest() {
        let config = SolverConfig::default();
        assert_eq!(solve_interest_rate(dec!(1200), dec!(100), 12, &config), Decimal::ZERO);
        assert_eq!(solve_interest_rate(dec!(1200), dec!(90), 12, &config), Decimal::ZERO);
    }

    #[test]
    fn test_solve_recovers_rate() {
        let rate = solve_interest_rate(dec!(10000), dec!(888.49), 12, &SolverConfig::default());
        assert!((rate - dec!(12)).abs() < dec!(0.1), "got {}", rate);
    }

    #[test]
    fn test_solver_iterations_are_injectable() {
        let coarse = SolverConfig {
            iterations: 1,
            ..SolverConfig::default()
        };
        assert_eq!(solve_interest_rate(dec!(10000), dec!(888.49), 12, &coarse), dec!(500));
    }

    #[test]
    fn test_schedule_closes_at_zero() {
        let schedule = amortization_schedule(dec!(10000), dec!(12), 12);

        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule[0].interest, dec!(100));
        assert_eq!(schedule[0].principal, dec!(788.49));
        assert_eq!(schedule.last().unwrap().balance, Decimal::ZERO);

        let repaid: Cents = schedule.iter().map(|row| to_cents(row.principal)).sum();
        assert_eq!(repaid, Cents::new(1_000_000));
    }

    #[test]
    fn test_zero_rate_schedule() {
        let schedule = amortization_schedule(dec!(1000), Decimal::ZERO, 3);
        let payments: Vec<Decimal> = schedule.iter().map(|row| row.payment).collect();
        assert_eq!(payments, vec![dec!(333.33), dec!(333.33), dec!(333.34)]);
    }
}
