//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating finance records that
//! maintain domain invariants.

use chrono::{Duration, NaiveDate};
use core_kernel::money::Cents;
use domain_credit::Credit;
use domain_project::{FundingSource, Project, ProjectTransaction};
use domain_savings::{Fund, Goal};
use domain_wallet::{Transaction, TransactionType};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::DateFixtures;

/// Strategy for positive amounts with two decimal places (0.01 to 100,000.00)
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for small positive amounts (0.01 to 500.00)
pub fn small_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..50_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for dates within 2023-2025
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    let base = DateFixtures::ymd(2023, 1, 1);
    (0i64..1095i64).prop_map(move |offset| base + Duration::days(offset))
}

/// Strategy for transaction types
pub fn transaction_type_strategy() -> impl Strategy<Value = TransactionType> {
    prop_oneof![Just(TransactionType::Income), Just(TransactionType::Expense)]
}

/// Strategy for valid wallet transactions
pub fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (
        amount_strategy(),
        transaction_type_strategy(),
        prop_oneof![Just("Salary"), Just("Food"), Just("Rent"), Just("Leisure")],
        date_strategy(),
    )
        .prop_map(|(amount, kind, category, date)| Transaction::new(kind, amount, category, date))
}

/// Strategy for a list of wallet transactions
pub fn transactions_strategy(max: usize) -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(transaction_strategy(), 0..max)
}

/// Strategy for deposit/withdrawal sequences as (amount, date, is_deposit)
pub fn movements_strategy(max: usize) -> impl Strategy<Value = Vec<(Decimal, NaiveDate, bool)>> {
    prop::collection::vec((small_amount_strategy(), date_strategy(), any::<bool>()), 0..max)
}

/// Strategy for a dated savings history, oldest movement first
pub fn history_strategy(max: usize) -> impl Strategy<Value = Vec<(Decimal, NaiveDate, bool)>> {
    movements_strategy(max).prop_map(|mut movements| {
        movements.sort_by_key(|(_, date, _)| *date);
        movements
    })
}

/// Strategy for goals whose history was written through the domain methods
pub fn goal_strategy(max: usize) -> impl Strategy<Value = Goal> {
    history_strategy(max).prop_map(|history| {
        let mut goal = Goal::new("Generated goal", Decimal::new(1_000_000, 2), DateFixtures::ymd(2023, 1, 1));
        for (amount, date, deposit) in history {
            let applied = if deposit {
                goal.contribute(amount, date, "")
            } else {
                goal.withdraw(amount, date, "")
            };
            applied.expect("generated amounts are positive");
        }
        goal
    })
}

/// Strategy for funds whose history was written through the domain methods
pub fn fund_strategy(max: usize) -> impl Strategy<Value = Fund> {
    history_strategy(max).prop_map(|history| {
        let mut fund = Fund::new("Generated fund");
        for (amount, date, deposit) in history {
            let applied = if deposit {
                fund.deposit(amount, date, "")
            } else {
                fund.withdraw(amount, date, "")
            };
            applied.expect("generated amounts are positive");
        }
        fund
    })
}

/// Strategy for active credits carrying up to `max` small payments
///
/// The principal is large enough that the payments never settle the credit.
pub fn credit_strategy(max: usize) -> impl Strategy<Value = Credit> {
    (
        annual_rate_strategy(),
        term_strategy(),
        prop::collection::vec((small_amount_strategy(), date_strategy()), 0..max),
    )
        .prop_map(|(rate, term, payments)| {
            let mut credit = Credit::new(
                "Generated credit",
                Decimal::new(10_000_000, 2),
                rate,
                term,
                DateFixtures::ymd(2023, 1, 1),
            );
            for (amount, date) in payments {
                credit
                    .record_payment(amount, date, "", Cents::new(100))
                    .expect("credit stays active");
            }
            credit
        })
}

/// Strategy for projects holding up to `max` transactions
pub fn project_strategy(max: usize) -> impl Strategy<Value = Project> {
    prop::collection::vec(project_transaction_strategy(), 0..max).prop_map(|transactions| {
        let mut project = Project::new("Generated project", Decimal::new(5_000_000, 2));
        for tx in transactions {
            project.add_transaction(tx).expect("generated transactions are valid");
        }
        project
    })
}

/// Strategy for project transactions without budget lines
pub fn project_transaction_strategy() -> impl Strategy<Value = ProjectTransaction> {
    (amount_strategy(), date_strategy(), any::<bool>(), any::<bool>()).prop_map(
        |(amount, date, income, internal)| {
            if income {
                let source = if internal {
                    FundingSource::Internal
                } else {
                    FundingSource::External
                };
                ProjectTransaction::income(amount, source, date, "Funding")
            } else {
                ProjectTransaction::expense(amount, date, "Cost")
            }
        },
    )
}

/// Strategy for annual interest rates in percent (0% to 60%)
pub fn annual_rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..6000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for credit terms in months
pub fn term_strategy() -> impl Strategy<Value = u32> {
    1u32..120u32
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_transactions_validate(tx in transaction_strategy()) {
            prop_assert!(tx.validate().is_ok());
        }

        #[test]
        fn generated_histories_are_chronological(history in history_strategy(12)) {
            prop_assert!(history.windows(2).all(|pair| pair[0].1 <= pair[1].1));
        }

        #[test]
        fn generated_credits_stay_active(credit in credit_strategy(10)) {
            prop_assert!(!credit.is_paid());
        }
    }
}
