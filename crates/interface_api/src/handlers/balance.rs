//! Balance handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use core_kernel::temporal::{end_of_month, parse_month};
use core_kernel::UserId;
use finance_engine::BalanceBreakdown;

use crate::dto::balance::*;
use crate::error::ApiError;
use crate::state::AppState;

/// Every term of the balance equation, for `date` or today
pub async fn get_breakdown(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Query(query): Query<DateQuery>,
) -> Json<BalanceBreakdown> {
    let engine = state.engine(user);
    let date = query.date.unwrap_or_else(|| engine.today());
    Json(engine.balance_breakdown(date))
}

/// Spendable balance right now
pub async fn get_current(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
) -> Json<BalanceResponse> {
    let engine = state.engine(user);
    Json(BalanceResponse {
        date: engine.today(),
        available: engine.current_balance(),
    })
}

/// Reporting balance at the end of a `YYYY-MM` period
pub async fn get_available(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let period = parse_month(&query.period).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let engine = state.engine(user);
    Ok(Json(BalanceResponse {
        date: end_of_month(period),
        available: engine.available_balance(period),
    }))
}

/// Total saved across goals at the end of the month containing `date`
pub async fn get_savings_total(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Query(query): Query<DateQuery>,
) -> Json<SavingsTotalResponse> {
    let engine = state.engine(user);
    let date = query.date.unwrap_or_else(|| engine.today());
    Json(SavingsTotalResponse {
        date,
        total: engine.total_savings_at_date(date),
    })
}
