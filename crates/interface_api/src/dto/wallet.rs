//! Wallet DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_wallet::TransactionType;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub is_recurring: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct RenameCategoryRequest {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct RenameCategoryResponse {
    pub updated: usize,
}
