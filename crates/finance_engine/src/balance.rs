//! Available balance
//!
//! ```text
//! available(d) = Σ income(≤ d) − Σ expense(≤ d)
//!              − Σ_goals max(0, replay(goal, ≤ d))
//!              − Σ_funds max(0, replay(fund, ≤ d))
//! ```
//!
//! Records carry calendar dates, so "up to the end of day `d`" is the
//! inclusive comparison `date <= d`. Goal and fund totals always come
//! from their histories, never from the cached `current_amount`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::money::{from_cents, Cents};
use domain_savings::{Fund, Goal};
use domain_wallet::{Transaction, TransactionTotals};

use crate::snapshot::FinanceSnapshot;

/// Every term of the balance equation for one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceTerms {
    pub income: Cents,
    pub expense: Cents,
    pub goals_saved: Cents,
    pub funds_saved: Cents,
}

impl BalanceTerms {
    /// Computes the terms from the raw collections
    pub fn compute(
        transactions: &[Transaction],
        goals: &[Goal],
        funds: &[Fund],
        date: NaiveDate,
    ) -> Self {
        let totals = TransactionTotals::up_to(transactions, date);
        Self {
            income: totals.income,
            expense: totals.expense,
            goals_saved: goals.iter().map(|goal| goal.total_as_of(date)).sum(),
            funds_saved: funds.iter().map(|fund| fund.total_as_of(date)).sum(),
        }
    }

    pub fn net_cash_flow(&self) -> Cents {
        self.income - self.expense
    }

    pub fn earmarked(&self) -> Cents {
        self.goals_saved + self.funds_saved
    }

    pub fn available(&self) -> Cents {
        self.net_cash_flow() - self.earmarked()
    }
}

/// Available balance as of the end of `date`
pub fn balance_at_date(snapshot: &FinanceSnapshot, date: NaiveDate) -> Cents {
    BalanceTerms::compute(&snapshot.transactions, &snapshot.goals, &snapshot.funds, date)
        .available()
}

/// Balance terms in major units, as reported to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceBreakdown {
    pub date: NaiveDate,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_cash_flow: Decimal,
    pub goals_saved: Decimal,
    pub funds_saved: Decimal,
    pub available: Decimal,
}

impl BalanceBreakdown {
    pub fn compute(snapshot: &FinanceSnapshot, date: NaiveDate) -> Self {
        let terms =
            BalanceTerms::compute(&snapshot.transactions, &snapshot.goals, &snapshot.funds, date);
        Self {
            date,
            total_income: from_cents(terms.income),
            total_expense: from_cents(terms.expense),
            net_cash_flow: from_cents(terms.net_cash_flow()),
            goals_saved: from_cents(terms.goals_saved),
            funds_saved: from_cents(terms.funds_saved),
            available: from_cents(terms.available()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn test_empty_snapshot_is_zero() {
        assert_eq!(balance_at_date(&FinanceSnapshot::default(), date(1, 1)), Cents::ZERO);
    }

    #[test]
    fn test_entry_on_query_day_counts() {
        let snapshot = FinanceSnapshot {
            transactions: vec![Transaction::income(dec!(100), "Salary", date(3, 15))],
            ..Default::default()
        };

        assert_eq!(balance_at_date(&snapshot, date(3, 14)), Cents::ZERO);
        assert_eq!(balance_at_date(&snapshot, date(3, 15)), Cents::new(10_000));
    }

    #[test]
    fn test_earmarks_are_deducted() {
        let mut goal = Goal::new("Bike", dec!(900), date(1, 1));
        goal.contribute(dec!(200), date(2, 1), "").unwrap();
        let mut fund = Fund::new("Emergency");
        fund.deposit(dec!(150), date(2, 2), "").unwrap();
        fund.withdraw(dec!(50), date(2, 20), "").unwrap();

        let snapshot = FinanceSnapshot {
            transactions: vec![
                Transaction::income(dec!(1000), "Salary", date(1, 31)),
                Transaction::expense(dec!(120.25), "Food", date(2, 3)),
            ],
            goals: vec![goal],
            funds: vec![fund],
            ..Default::default()
        };

        let breakdown = BalanceBreakdown::compute(&snapshot, date(2, 10));
        assert_eq!(breakdown.net_cash_flow, dec!(879.75));
        assert_eq!(breakdown.goals_saved, dec!(200));
        assert_eq!(breakdown.funds_saved, dec!(150));
        assert_eq!(breakdown.available, dec!(529.75));

        assert_eq!(balance_at_date(&snapshot, date(2, 28)), Cents::new(57_975));
    }

    #[test]
    fn test_overdrawn_goal_does_not_add_money() {
        let mut goal = Goal::new("Trip", dec!(500), date(1, 1));
        goal.contribute(dec!(50), date(1, 2), "").unwrap();
        goal.withdraw(dec!(80), date(1, 3), "").unwrap();
        let snapshot = FinanceSnapshot {
            transactions: vec![Transaction::income(dec!(100), "Salary", date(1, 1))],
            goals: vec![goal],
            ..Default::default()
        };

        assert_eq!(balance_at_date(&snapshot, date(1, 31)), Cents::new(10_000));
    }
}
