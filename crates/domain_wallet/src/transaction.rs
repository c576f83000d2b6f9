//! Income and expense transactions
//!
//! A transaction is immutable once written. The single exception is the
//! category rename bulk edit, which rewrites the `category` field across
//! every matching record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::money::{to_cents, Cents};
use core_kernel::{Record, TransactionId};

use crate::error::WalletError;

/// Direction of a wallet transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Sign applied to the amount when computing net cash flow
    pub fn sign(self) -> i64 {
        match self {
            TransactionType::Income => 1,
            TransactionType::Expense => -1,
        }
    }
}

/// A wallet transaction as persisted in the `transactions` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    /// Major-unit amount, always positive; the direction lives in `transaction_type`
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
}

impl Transaction {
    /// Creates a new transaction
    ///
    /// # Arguments
    ///
    /// * `transaction_type` - Income or expense
    /// * `amount` - Positive major-unit amount
    /// * `category` - Free-form category label
    /// * `date` - Calendar date the money moved
    pub fn new(
        transaction_type: TransactionType,
        amount: Decimal,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new_v7(),
            amount,
            transaction_type,
            category: category.into(),
            description: String::new(),
            date,
            is_recurring: None,
        }
    }

    /// Creates an income transaction
    pub fn income(amount: Decimal, category: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(TransactionType::Income, amount, category, date)
    }

    /// Creates an expense transaction
    pub fn expense(amount: Decimal, category: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(TransactionType::Expense, amount, category, date)
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the transaction as produced by a recurring schedule
    pub fn with_recurring(mut self, recurring: bool) -> Self {
        self.is_recurring = Some(recurring);
        self
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub fn cents(&self) -> Cents {
        to_cents(self.amount)
    }

    /// Amount in cents with the cash-flow sign applied
    pub fn signed_cents(&self) -> Cents {
        match self.transaction_type {
            TransactionType::Income => self.cents(),
            TransactionType::Expense => -self.cents(),
        }
    }

    /// Checks the record before it is written
    pub fn validate(&self) -> Result<(), WalletError> {
        if !self.cents().is_positive() {
            return Err(WalletError::InvalidAmount(format!(
                "transaction amount must be greater than zero, got {}",
                self.amount
            )));
        }
        if self.category.trim().is_empty() {
            return Err(WalletError::MissingField("category"));
        }
        Ok(())
    }
}

impl Record for Transaction {
    type Id = TransactionId;
    const COLLECTION: &'static str = "transactions";

    fn id(&self) -> TransactionId {
        self.id
    }
}

/// Renames a category across a set of transactions
///
/// Returns only the records whose category changed, already rewritten,
/// so the caller can persist exactly those.
pub fn rename_category(
    transactions: &[Transaction],
    from: &str,
    to: &str,
) -> Result<Vec<Transaction>, WalletError> {
    let to = to.trim();
    if to.is_empty() {
        return Err(WalletError::InvalidRename(
            "new category name must not be empty".to_string(),
        ));
    }
    if from == to {
        return Ok(Vec::new());
    }

    let renamed: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| tx.category == from)
        .map(|tx| Transaction {
            category: to.to_string(),
            ..tx.clone()
        })
        .collect();
    debug!(from, to, count = renamed.len(), "Category rename prepared");
    Ok(renamed)
}
