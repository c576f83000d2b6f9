//! Credit DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreditRequest {
    pub name: String,
    pub principal: Decimal,
    /// Annual rate in percent
    pub interest_rate: Decimal,
    pub term: u32,
    /// Defaults to today
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub principal: Decimal,
    /// Annual rate in percent
    pub rate: Decimal,
    pub term: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub quota: Decimal,
    pub total_to_pay: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct SolveRateQuery {
    pub principal: Decimal,
    pub quota: Decimal,
    pub term: u32,
}

#[derive(Debug, Serialize)]
pub struct SolveRateResponse {
    /// Annual rate in percent
    pub rate: Decimal,
}
