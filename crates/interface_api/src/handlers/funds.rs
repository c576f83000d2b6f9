//! Fund handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use core_kernel::{FundId, UserId};
use domain_savings::{AutoSaveConfig, Fund, FundTransaction};

use crate::dto::savings::*;
use crate::dto::CreatedResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_funds(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
) -> Json<Vec<Fund>> {
    Json(state.engine(user).snapshot().funds)
}

pub async fn create_fund(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Json(request): Json<CreateFundRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let mut fund = Fund::new(request.name).with_style(request.icon, request.color);
    if let Some(auto_save) = request.auto_save {
        fund = fund.with_auto_save(AutoSaveConfig::monthly(auto_save.amount, auto_save.day_of_month));
    }

    let id = state.engine(user).create_fund(fund).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

pub async fn delete_fund(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.engine(user).delete_fund(FundId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn deposit(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
    Json(request): Json<AmountRequest>,
) -> Result<(StatusCode, Json<FundTransaction>), ApiError> {
    let entry = state
        .engine(user)
        .deposit_to_fund(FundId::from_uuid(id), request.amount, request.note)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn withdraw(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
    Json(request): Json<AmountRequest>,
) -> Result<(StatusCode, Json<FundTransaction>), ApiError> {
    let entry = state
        .engine(user)
        .withdraw_from_fund(FundId::from_uuid(id), request.amount, request.note)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Runs the fund's monthly auto-save if it is due
pub async fn run_auto_save(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<FundTransaction>), ApiError> {
    let entry = state.engine(user).run_auto_save(FundId::from_uuid(id)).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
