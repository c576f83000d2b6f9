//! Wallet transaction handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use core_kernel::{TransactionId, UserId};
use domain_wallet::Transaction;

use crate::dto::wallet::*;
use crate::dto::CreatedResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Lists transactions in insertion order
pub async fn list_transactions(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
) -> Json<Vec<Transaction>> {
    Json(state.engine(user).snapshot().transactions)
}

/// Records an income or expense
pub async fn create_transaction(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let engine = state.engine(user);
    let date = request.date.unwrap_or_else(|| engine.today());
    let mut transaction =
        Transaction::new(request.transaction_type, request.amount, request.category, date)
            .with_description(request.description);
    if let Some(recurring) = request.is_recurring {
        transaction = transaction.with_recurring(recurring);
    }

    let id = engine.add_transaction(transaction).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

/// Deletes a transaction
pub async fn delete_transaction(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .engine(user)
        .remove_transaction(TransactionId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Renames a category on every transaction that uses it
pub async fn rename_category(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Json(request): Json<RenameCategoryRequest>,
) -> Result<Json<RenameCategoryResponse>, ApiError> {
    let updated = state
        .engine(user)
        .rename_category(&request.from, &request.to)
        .await?;
    Ok(Json(RenameCategoryResponse { updated }))
}
