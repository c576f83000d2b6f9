//! API middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use core_kernel::UserId;

use crate::state::AppState;

/// Authentication middleware
///
/// Validates the bearer token and stores the signed-in [`UserId`] and
/// the claims in the request extensions
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "));

    let Some(token) = token else {
        warn!("Missing or invalid Authorization header");
        return Err(StatusCode::UNAUTHORIZED);
    };

    let claims = crate::auth::validate_token(token, &state.config.jwt_secret).map_err(|e| {
        warn!(error = %e, "Token validation failed");
        StatusCode::UNAUTHORIZED
    })?;
    let user_id = claims.user_id().map_err(|e| {
        warn!(error = %e, "Token subject is not a user id");
        StatusCode::UNAUTHORIZED
    })?;

    request.extensions_mut().insert(user_id);
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Audit logging middleware
///
/// One line per request with the acting user; server-side failures are
/// raised to `warn`
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let user = request
        .extensions()
        .get::<UserId>()
        .map(ToString::to_string)
        .unwrap_or_else(|| "anonymous".to_owned());

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        warn!(%method, %path, %user, status, elapsed_ms, "Finance request failed");
    } else {
        info!(%method, %path, %user, status, elapsed_ms, "Finance request");
    }

    response
}
