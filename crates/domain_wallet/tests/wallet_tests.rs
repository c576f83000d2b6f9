//! Integration tests for domain_wallet

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::money::{from_cents, Cents};
use domain_wallet::{rename_category, Transaction, TransactionTotals, TransactionType};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Persisted Shape Tests
// ============================================================================

mod record_shape_tests {
    use super::*;

    #[test]
    fn test_deserialize_stored_document() {
        let json = r#"{
            "id": "0192b6a4-5d1e-7c3a-8f00-000000000001",
            "amount": 42.1,
            "type": "expense",
            "category": "Food",
            "description": "Lunch",
            "date": "2026-10-19"
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.transaction_type, TransactionType::Expense);
        assert_eq!(tx.amount, dec!(42.1));
        assert_eq!(tx.date, date(2026, 10, 19));
        assert_eq!(tx.is_recurring, None);
    }

    #[test]
    fn test_round_trip_keeps_every_field() {
        let tx = Transaction::income(dec!(1234.56), "Salary", date(2026, 1, 31))
            .with_description("January payroll")
            .with_recurring(true);

        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();

        assert_eq!(back, tx);
    }
}

// ============================================================================
// Totals Tests
// ============================================================================

mod totals_tests {
    use super::*;

    #[test]
    fn test_many_small_expenses_do_not_drift() {
        let txs: Vec<Transaction> = (0..1000)
            .map(|_| Transaction::expense(dec!(0.01), "Fees", date(2026, 3, 1)))
            .collect();

        let totals = TransactionTotals::from_transactions(&txs);

        assert_eq!(totals.expense, Cents::new(1000));
        assert_eq!(from_cents(totals.net()), dec!(-10));
    }

    #[test]
    fn test_rename_then_totals_unchanged() {
        let txs = vec![
            Transaction::expense(dec!(12), "Food", date(2026, 3, 1)),
            Transaction::income(dec!(40), "Food", date(2026, 3, 2)),
        ];
        let renamed = rename_category(&txs, "Food", "Meals").unwrap();

        assert_eq!(
            TransactionTotals::from_transactions(&renamed),
            TransactionTotals::from_transactions(&txs)
        );
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn net_equals_sum_of_signed_cents(
        amounts in prop::collection::vec((1i64..10_000_000i64, any::<bool>()), 0..50)
    ) {
        let txs: Vec<Transaction> = amounts
            .iter()
            .map(|(minor, income)| {
                let amount = Decimal::new(*minor, 2);
                if *income {
                    Transaction::income(amount, "In", date(2026, 1, 1))
                } else {
                    Transaction::expense(amount, "Out", date(2026, 1, 1))
                }
            })
            .collect();

        let totals = TransactionTotals::from_transactions(&txs);
        let signed: Cents = txs.iter().map(Transaction::signed_cents).sum();

        prop_assert_eq!(totals.net(), signed);
    }
}
