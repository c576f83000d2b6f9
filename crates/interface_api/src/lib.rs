//! HTTP API Layer
//!
//! This crate exposes the finance engine over REST using Axum.
//!
//! # Architecture
//!
//! - **State**: one engine per signed-in user, created on first request
//! - **Handlers**: request handlers for each resource
//! - **Middleware**: bearer-token authentication, audit logging
//! - **DTOs**: request/response bodies
//! - **Error Handling**: engine errors mapped to status codes
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::ApiConfig};
//!
//! let app = create_router(ApiConfig::default());
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{balance, credits, funds, goals, health, ledger, projects, wallet};
use crate::middleware::{audit_middleware, auth_middleware};

pub use crate::state::AppState;

/// Creates the main API router
///
/// # Arguments
///
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(config: ApiConfig) -> Router {
    create_router_with_state(AppState::new(config))
}

/// Creates the router over existing state
pub fn create_router_with_state(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let balance_routes = Router::new()
        .route("/", get(balance::get_breakdown))
        .route("/current", get(balance::get_current))
        .route("/available", get(balance::get_available));

    let transaction_routes = Router::new()
        .route("/", get(wallet::list_transactions).post(wallet::create_transaction))
        .route("/rename-category", post(wallet::rename_category))
        .route("/:id", delete(wallet::delete_transaction));

    let ledger_routes = Router::new()
        .route("/", get(ledger::list_entries))
        .route("/grouped", get(ledger::list_grouped))
        .route("/summary", get(ledger::get_summary));

    let goal_routes = Router::new()
        .route("/", get(goals::list_goals).post(goals::create_goal))
        .route("/:id", delete(goals::delete_goal))
        .route("/:id/progress", get(goals::get_progress))
        .route("/:id/contributions", post(goals::contribute))
        .route("/:id/withdrawals", post(goals::withdraw));

    let fund_routes = Router::new()
        .route("/", get(funds::list_funds).post(funds::create_fund))
        .route("/:id", delete(funds::delete_fund))
        .route("/:id/deposits", post(funds::deposit))
        .route("/:id/withdrawals", post(funds::withdraw))
        .route("/:id/auto-save", post(funds::run_auto_save));

    let credit_routes = Router::new()
        .route("/", get(credits::list_credits).post(credits::create_credit))
        .route("/quote", get(credits::quote))
        .route("/solve-rate", get(credits::solve_rate))
        .route("/:id", delete(credits::delete_credit))
        .route("/:id/status", get(credits::get_status))
        .route("/:id/schedule", get(credits::get_schedule))
        .route("/:id/payments", post(credits::add_payment));

    let project_routes = Router::new()
        .route("/", get(projects::list_projects).post(projects::create_project))
        .route("/:id", delete(projects::delete_project))
        .route("/:id/stats", get(projects::get_stats))
        .route("/:id/income", post(projects::add_income))
        .route("/:id/expenses", post(projects::add_expense))
        .route(
            "/:id/budget-lines",
            get(projects::list_budget_lines).post(projects::add_budget_line),
        );

    // Protected API routes
    let api_routes = Router::new()
        .nest("/balance", balance_routes)
        .route("/savings/total", get(balance::get_savings_total))
        .nest("/transactions", transaction_routes)
        .nest("/ledger", ledger_routes)
        .nest("/goals", goal_routes)
        .nest("/funds", fund_routes)
        .nest("/credits", credit_routes)
        .nest("/projects", project_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
