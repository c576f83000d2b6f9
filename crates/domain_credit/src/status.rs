//! Derived repayment status of a credit

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use core_kernel::money::from_cents;

use crate::credit::{Credit, CreditStatus};

/// Repayment figures recomputed from a credit's current terms
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummary {
    pub status: CreditStatus,
    pub total_paid: Decimal,
    pub total_to_pay: Decimal,
    /// Never negative, even after overpaying
    pub remaining_balance: Decimal,
    pub quota: Decimal,
    /// Total paid over total to pay, in percent
    pub progress: Decimal,
    pub payments_made: u32,
    pub next_due_date: Option<NaiveDate>,
}

/// Computes the status of a credit
pub fn credit_status(credit: &Credit) -> CreditSummary {
    let total_paid = credit.total_paid();
    let total_to_pay = credit.total_to_pay();

    let progress = if total_to_pay.is_positive() {
        (from_cents(total_paid) / from_cents(total_to_pay) * dec!(100))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    CreditSummary {
        status: credit.status,
        total_paid: from_cents(total_paid),
        total_to_pay: from_cents(total_to_pay),
        remaining_balance: from_cents((total_to_pay - total_paid).clamp_non_negative()),
        quota: from_cents(credit.quota()),
        progress,
        payments_made: credit.payments_made(),
        next_due_date: credit.next_due_date(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::money::Cents;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn test_status_of_fresh_credit() {
        let credit = Credit::new("Car", dec!(10000), dec!(12), 12, start());
        let summary = credit_status(&credit);

        assert_eq!(summary.quota, dec!(888.49));
        assert_eq!(summary.total_to_pay, dec!(10661.88));
        assert_eq!(summary.remaining_balance, dec!(10661.88));
        assert_eq!(summary.progress, Decimal::ZERO);
    }

    #[test]
    fn test_overpayment_floors_remaining() {
        let mut credit = Credit::new("Loan", dec!(100), Decimal::ZERO, 1, start());
        credit.record_payment(dec!(150), start(), "", Cents::new(100)).unwrap();
        let summary = credit_status(&credit);

        assert_eq!(summary.remaining_balance, Decimal::ZERO);
        assert_eq!(summary.progress, dec!(150));
        assert_eq!(summary.status, CreditStatus::Paid);
    }

    #[test]
    fn test_status_tracks_rate_edits() {
        let mut credit = Credit::new("Car", dec!(1200), Decimal::ZERO, 12, start());
        credit.record_payment(dec!(600), start(), "", Cents::new(100)).unwrap();
        assert_eq!(credit_status(&credit).progress, dec!(50));

        credit.interest_rate = dec!(12);
        assert!(credit_status(&credit).progress < dec!(50));
    }
}
