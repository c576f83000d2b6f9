//! Savings goal handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use core_kernel::{GoalId, UserId};
use domain_savings::{Goal, GoalHistoryItem, GoalProgress};

use crate::dto::savings::*;
use crate::dto::CreatedResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_goals(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
) -> Json<Vec<Goal>> {
    Json(state.engine(user).snapshot().goals)
}

pub async fn create_goal(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Json(request): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let engine = state.engine(user);
    let start = request.start_date.unwrap_or_else(|| engine.today());
    let mut goal = Goal::new(request.name, request.target_amount, start).with_icon(request.icon);
    if let Some(deadline) = request.deadline {
        goal = goal.with_deadline(deadline);
    }

    let id = engine.create_goal(goal).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.engine(user).delete_goal(GoalId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Saved amount, quota and status of one goal
pub async fn get_progress(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
) -> Result<Json<GoalProgress>, ApiError> {
    Ok(Json(state.engine(user).goal_progress(GoalId::from_uuid(id))?))
}

pub async fn contribute(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
    Json(request): Json<AmountRequest>,
) -> Result<(StatusCode, Json<GoalHistoryItem>), ApiError> {
    let item = state
        .engine(user)
        .contribute_to_goal(GoalId::from_uuid(id), request.amount, request.note)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn withdraw(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
    Json(request): Json<AmountRequest>,
) -> Result<(StatusCode, Json<GoalHistoryItem>), ApiError> {
    let item = state
        .engine(user)
        .withdraw_from_goal(GoalId::from_uuid(id), request.amount, request.note)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}
