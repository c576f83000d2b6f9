//! Installment credits and their payments

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::money::{ensure_positive, from_cents, to_cents, Cents};
use core_kernel::temporal::add_months;
use core_kernel::{CreditId, PaymentId, Record};

use crate::amortization::{calculate_quota, validate_loan_terms};
use crate::error::CreditError;

/// Repayment state of a credit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditStatus {
    Active,
    Paid,
}

/// A payment made against a credit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub credit_id: CreditId,
    pub date: NaiveDate,
    pub amount: Decimal,
    #[serde(default)]
    pub note: String,
}

/// A credit as persisted in the `credits` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credit {
    pub id: CreditId,
    pub name: String,
    pub principal: Decimal,
    /// Nominal annual rate in percent
    pub interest_rate: Decimal,
    /// Number of monthly payments
    pub term: u32,
    pub start_date: NaiveDate,
    pub status: CreditStatus,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Credit {
    /// Creates a new active credit
    ///
    /// # Arguments
    ///
    /// * `name` - Display name
    /// * `principal` - Amount borrowed
    /// * `interest_rate` - Annual rate in percent
    /// * `term` - Number of monthly payments
    /// * `start_date` - Day the credit was taken
    pub fn new(
        name: impl Into<String>,
        principal: Decimal,
        interest_rate: Decimal,
        term: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: CreditId::new_v7(),
            name: name.into(),
            principal,
            interest_rate,
            term,
            start_date,
            status: CreditStatus::Active,
            payments: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), CreditError> {
        if self.name.trim().is_empty() {
            return Err(CreditError::InvalidCredit("name must not be empty".to_string()));
        }
        validate_loan_terms(self.principal, self.interest_rate, self.term)
    }

    pub fn is_paid(&self) -> bool {
        self.status == CreditStatus::Paid
    }

    /// Monthly quota under the current terms
    pub fn quota(&self) -> Cents {
        to_cents(calculate_quota(self.principal, self.interest_rate, self.term))
    }

    /// Quota times term
    pub fn total_to_pay(&self) -> Cents {
        Cents::new(self.quota().value().saturating_mul(i64::from(self.term)))
    }

    pub fn total_paid(&self) -> Cents {
        self.payments.iter().map(|payment| to_cents(payment.amount)).sum()
    }

    pub fn payments_made(&self) -> u32 {
        self.payments.len() as u32
    }

    /// Appends a payment and flips the credit to paid once it is settled
    ///
    /// The credit counts as settled when the total paid reaches the total
    /// to pay minus `tolerance`. A paid credit never returns to active.
    pub fn record_payment(
        &mut self,
        amount: Decimal,
        date: NaiveDate,
        note: impl Into<String>,
        tolerance: Cents,
    ) -> Result<Payment, CreditError> {
        if self.is_paid() {
            return Err(CreditError::AlreadyPaid(self.id.to_string()));
        }
        let cents = ensure_positive(amount, "amount")?;
        let payment = Payment {
            id: PaymentId::new_v7(),
            credit_id: self.id,
            date,
            amount: from_cents(cents),
            note: note.into(),
        };
        self.payments.push(payment.clone());
        if self.total_paid() >= self.total_to_pay() - tolerance {
            self.status = CreditStatus::Paid;
        }
        Ok(payment)
    }

    /// Due date of the next installment, `None` once paid
    pub fn next_due_date(&self) -> Option<NaiveDate> {
        if self.is_paid() {
            return None;
        }
        Some(add_months(self.start_date, self.payments_made()))
    }

    /// True when an installment is due before today and still unpaid
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.next_due_date().map_or(false, |due| due < today)
    }
}

impl Record for Credit {
    type Id = CreditId;
    const COLLECTION: &'static str = "credits";

    fn id(&self) -> CreditId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOLERANCE: Cents = Cents::new(100);

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn phone() -> Credit {
        Credit::new("Phone", dec!(1200), Decimal::ZERO, 12, date(1, 15))
    }

    #[test]
    fn test_totals_follow_terms() {
        let credit = phone();
        assert_eq!(credit.quota(), Cents::new(10_000));
        assert_eq!(credit.total_to_pay(), Cents::new(120_000));
    }

    #[test]
    fn test_twelve_payments_settle_credit() {
        let mut credit = phone();
        for month in 0..11 {
            credit.record_payment(dec!(100), add_months(date(1, 15), month), "", TOLERANCE).unwrap();
            assert_eq!(credit.status, CreditStatus::Active);
        }
        credit.record_payment(dec!(100), date(12, 15), "", TOLERANCE).unwrap();

        assert!(credit.is_paid());
        assert_eq!(credit.next_due_date(), None);
    }

    #[test]
    fn test_payment_within_tolerance_settles() {
        let mut credit = phone();
        credit.record_payment(dec!(1199.50), date(2, 1), "lump sum", TOLERANCE).unwrap();
        assert!(credit.is_paid());
    }

    #[test]
    fn test_paid_credit_rejects_payments() {
        let mut credit = phone();
        credit.record_payment(dec!(1200), date(2, 1), "", TOLERANCE).unwrap();

        let result = credit.record_payment(dec!(1), date(2, 2), "", TOLERANCE);
        assert!(matches!(result, Err(CreditError::AlreadyPaid(_))));
        assert_eq!(credit.payments.len(), 1);
    }

    #[test]
    fn test_paid_status_survives_term_edit() {
        let mut credit = phone();
        credit.record_payment(dec!(1200), date(2, 1), "", TOLERANCE).unwrap();
        credit.interest_rate = dec!(50);
        assert!(credit.is_paid());
    }

    #[test]
    fn test_due_dates() {
        let mut credit = phone();
        assert_eq!(credit.next_due_date(), Some(date(1, 15)));
        assert!(credit.is_overdue(date(1, 16)));
        assert!(!credit.is_overdue(date(1, 15)));

        credit.record_payment(dec!(100), date(1, 15), "", TOLERANCE).unwrap();
        assert_eq!(credit.next_due_date(), Some(date(2, 15)));
        assert!(!credit.is_overdue(date(1, 16)));
    }

    #[test]
    fn test_validate() {
        assert!(phone().validate().is_ok());
        let mut bad = phone();
        bad.term = 0;
        assert!(matches!(bad.validate(), Err(CreditError::InvalidCredit(_))));
        bad.term = 3_000_000_000;
        assert!(matches!(bad.validate(), Err(CreditError::InvalidCredit(_))));
    }
}
