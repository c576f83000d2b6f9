//! Credit handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use core_kernel::money::{ensure_positive, from_cents, to_cents, Cents};
use core_kernel::{CreditId, UserId};
use domain_credit::{validate_loan_terms, AmortizationRow, Credit, CreditSummary, Payment};
use finance_engine::EngineError;
use rust_decimal::Decimal;

use crate::dto::credits::*;
use crate::dto::savings::AmountRequest;
use crate::dto::CreatedResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_credits(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
) -> Json<Vec<Credit>> {
    Json(state.engine(user).snapshot().credits)
}

pub async fn create_credit(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Json(request): Json<CreateCreditRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let engine = state.engine(user);
    let start = request.start_date.unwrap_or_else(|| engine.today());
    let credit = Credit::new(
        request.name,
        request.principal,
        request.interest_rate,
        request.term,
        start,
    );

    let id = engine.create_credit(credit).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

pub async fn delete_credit(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.engine(user).delete_credit(CreditId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Paid status, progress and next due date
pub async fn get_status(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
) -> Result<Json<CreditSummary>, ApiError> {
    Ok(Json(state.engine(user).credit_status(CreditId::from_uuid(id))?))
}

/// Month-by-month amortization table
pub async fn get_schedule(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AmortizationRow>>, ApiError> {
    Ok(Json(state.engine(user).credit_schedule(CreditId::from_uuid(id))?))
}

pub async fn add_payment(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
    Json(request): Json<AmountRequest>,
) -> Result<(StatusCode, Json<Payment>), ApiError> {
    let payment = state
        .engine(user)
        .add_payment(CreditId::from_uuid(id), request.amount, request.note)
        .await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// Monthly installment for a prospective credit
pub async fn quote(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<QuoteResponse>, ApiError> {
    validate_loan_terms(query.principal, query.rate, query.term).map_err(EngineError::from)?;
    let quota = state
        .engine(user)
        .calculate_quota(query.principal, query.rate, query.term);
    let total = Cents::new(to_cents(quota).value().saturating_mul(i64::from(query.term)));
    Ok(Json(QuoteResponse {
        quota,
        total_to_pay: from_cents(total),
    }))
}

/// Annual rate implied by a principal, installment and term
pub async fn solve_rate(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Query(query): Query<SolveRateQuery>,
) -> Result<Json<SolveRateResponse>, ApiError> {
    validate_loan_terms(query.principal, Decimal::ZERO, query.term).map_err(EngineError::from)?;
    ensure_positive(query.quota, "quota").map_err(EngineError::from)?;
    let rate = state
        .engine(user)
        .solve_interest_rate(query.principal, query.quota, query.term);
    Ok(Json(SolveRateResponse { rate }))
}
