//! Unified ledger handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use core_kernel::UserId;
use finance_engine::{group_by_date, LedgerDay, LedgerEntry, LedgerFilter, LedgerSource, LedgerSummary};

use crate::dto::balance::LedgerQuery;
use crate::error::ApiError;
use crate::state::AppState;

fn filter_from(query: LedgerQuery) -> Result<LedgerFilter, ApiError> {
    let source = query
        .source
        .as_deref()
        .filter(|s| !s.is_empty() && *s != "all")
        .map(str::parse::<LedgerSource>)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    Ok(LedgerFilter {
        source,
        search: query.q,
        from: query.from,
        to: query.to,
    })
}

/// Every money movement, newest first
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<Vec<LedgerEntry>>, ApiError> {
    let filter = filter_from(query)?;
    Ok(Json(state.engine(user).filtered_ledger(&filter)))
}

/// Filtered entries grouped by day
pub async fn list_grouped(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<Vec<LedgerDay>>, ApiError> {
    let filter = filter_from(query)?;
    Ok(Json(group_by_date(state.engine(user).filtered_ledger(&filter))))
}

/// Totals over the filtered entries
pub async fn get_summary(
    State(state): State<AppState>,
    Extension(user): Extension<UserId>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<LedgerSummary>, ApiError> {
    let filter = filter_from(query)?;
    let entries = state.engine(user).filtered_ledger(&filter);
    Ok(Json(LedgerSummary::from_entries(&entries)))
}
