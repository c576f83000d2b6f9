//! Project handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use core_kernel::{BudgetLineId, ProjectId, UserId};
use domain_project::{BudgetLine, BudgetLineUsage, Project, ProjectStats, ProjectTransaction};

use crate::dto::projects::*;
use crate::dto::CreatedResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_projects(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
) -> Json<Vec<Project>> {
    Json(state.engine(user).snapshot().projects)
}

pub async fn create_project(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let mut project = Project::new(request.name, request.target_budget);
    if let Some(status) = request.status {
        project = project.with_status(status);
    }

    let id = state.engine(user).create_project(project).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.engine(user).delete_project(ProjectId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Income, expenses, budget consumption and task progress
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectStats>, ApiError> {
    Ok(Json(state.engine(user).project_stats(ProjectId::from_uuid(id))?))
}

/// Records income; internal funding also debits the wallet
pub async fn add_income(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
    Json(request): Json<ProjectIncomeRequest>,
) -> Result<(StatusCode, Json<ProjectTransaction>), ApiError> {
    let tx = state
        .engine(user)
        .add_project_income(
            ProjectId::from_uuid(id),
            request.amount,
            request.funding_source,
            request.description,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(tx)))
}

pub async fn add_expense(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
    Json(request): Json<ProjectExpenseRequest>,
) -> Result<(StatusCode, Json<ProjectTransaction>), ApiError> {
    let tx = state
        .engine(user)
        .add_project_expense(
            ProjectId::from_uuid(id),
            request.amount,
            request.description,
            request.budget_line_id.map(BudgetLineId::from_uuid),
            request.category,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(tx)))
}

/// Usage of every budget line
pub async fn list_budget_lines(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<BudgetLineUsage>>, ApiError> {
    Ok(Json(state.engine(user).budget_line_usage(ProjectId::from_uuid(id))?))
}

pub async fn add_budget_line(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Path(id): Path<Uuid>,
    Json(request): Json<BudgetLineRequest>,
) -> Result<(StatusCode, Json<BudgetLine>), ApiError> {
    let line = state
        .engine(user)
        .add_budget_line(ProjectId::from_uuid(id), request.name, request.allocated_amount)
        .await?;
    Ok((StatusCode::CREATED, Json(line)))
}
