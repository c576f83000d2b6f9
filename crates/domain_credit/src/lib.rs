//! Credit Domain
//!
//! Installment credits repaid with a fixed monthly quota under the
//! French (annuity) system.
//!
//! # Key Concepts
//!
//! - **Quota**: the fixed monthly payment, `P * r * (1+r)^n / ((1+r)^n - 1)`
//!   with `r` the nominal monthly rate, or `P / n` at zero interest
//! - **Rate solving**: the inverse problem, finding the annual rate that
//!   produces a known quota, by fixed-iteration bisection
//! - **Status**: totals, remaining balance and progress, recomputed from
//!   the current terms on every read
//!
//! The quota and everything derived from it are never stored on the
//! credit, so editing the rate or term retroactively changes the status.

pub mod amortization;
pub mod credit;
pub mod status;
pub mod error;

pub use amortization::{
    amortization_schedule, calculate_quota, solve_interest_rate, validate_loan_terms,
    AmortizationRow, SolverConfig, MAX_TERM_MONTHS,
};
pub use credit::{Credit, CreditStatus, Payment};
pub use status::{credit_status, CreditSummary};
pub use error::CreditError;
