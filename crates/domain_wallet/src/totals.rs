//! Income and expense totals in cents

use chrono::NaiveDate;
use core_kernel::money::Cents;
use core_kernel::temporal::same_month;
use serde::Serialize;

use crate::transaction::{Transaction, TransactionType};

/// Income and expense sums over a slice of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransactionTotals {
    pub income: Cents,
    pub expense: Cents,
}

impl TransactionTotals {
    /// Sums every transaction yielded by the iterator
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .fold(Self::default(), |mut totals, tx| {
                match tx.transaction_type {
                    TransactionType::Income => totals.income += tx.cents(),
                    TransactionType::Expense => totals.expense += tx.cents(),
                }
                totals
            })
    }

    /// Sums transactions dated on or before `date`
    pub fn up_to(transactions: &[Transaction], date: NaiveDate) -> Self {
        Self::from_transactions(transactions.iter().filter(|tx| tx.date <= date))
    }

    /// Sums transactions dated in the calendar month containing `date`
    pub fn in_month(transactions: &[Transaction], date: NaiveDate) -> Self {
        Self::from_transactions(transactions.iter().filter(|tx| same_month(tx.date, date)))
    }

    /// Net cash flow: income minus expense
    pub fn net(&self) -> Cents {
        self.income - self.expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::income(dec!(1000), "Salary", date(9, 30)),
            Transaction::expense(dec!(0.1), "Coffee", date(10, 1)),
            Transaction::expense(dec!(0.2), "Coffee", date(10, 2)),
            Transaction::income(dec!(50), "Gift", date(11, 1)),
        ]
    }

    #[test]
    fn test_totals_of_empty_slice() {
        let totals = TransactionTotals::from_transactions(std::iter::empty());
        assert_eq!(totals.net(), Cents::ZERO);
    }

    #[test]
    fn test_up_to_is_inclusive() {
        let totals = TransactionTotals::up_to(&sample(), date(10, 2));
        assert_eq!(totals.income, Cents::new(100_000));
        assert_eq!(totals.expense, Cents::new(30));
        assert_eq!(totals.net(), Cents::new(99_970));
    }

    #[test]
    fn test_in_month() {
        let totals = TransactionTotals::in_month(&sample(), date(10, 15));
        assert_eq!(totals.income, Cents::ZERO);
        assert_eq!(totals.expense, Cents::new(30));
    }
}
