//! Goal and fund DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Body of every deposit, withdrawal and contribution
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: Decimal,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub name: String,
    pub target_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    /// Defaults to today
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSaveRequest {
    pub amount: Decimal,
    pub day_of_month: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFundRequest {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    pub auto_save: Option<AutoSaveRequest>,
}
