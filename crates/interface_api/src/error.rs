//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use core_kernel::PortError;
use finance_engine::EngineError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient funds: available {available}, needed {needed}")]
    InsufficientFunds { available: Decimal, needed: Decimal },

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error_type, details) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", None),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict", None),
            ApiError::InsufficientFunds { available, needed } => (
                StatusCode::CONFLICT,
                "insufficient_funds",
                Some(json!({ "available": available, "needed": needed })),
            ),
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable", None),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None),
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", None),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        let message = err.to_string();
        match err {
            PortError::NotFound { .. } => ApiError::NotFound(message),
            PortError::Validation { .. } => ApiError::Validation(message),
            PortError::Conflict { .. } => ApiError::Conflict(message),
            PortError::Unauthorized { .. } => ApiError::Unauthorized,
            ref transient if transient.is_transient() => ApiError::Unavailable(message),
            _ => ApiError::Internal(message),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        if let EngineError::Persistence(port) = err {
            return port.into();
        }
        let message = err.to_string();
        match &err {
            EngineError::InsufficientFunds { available, needed } => ApiError::InsufficientFunds {
                available: *available,
                needed: *needed,
            },
            EngineError::ConsistencyGap { orphan, .. } => {
                error!(orphan = %orphan, error = %message, "Request left the stores inconsistent");
                ApiError::Internal(message)
            }
            other if other.is_not_found() => ApiError::NotFound(message),
            other if other.is_validation() => ApiError::Validation(message),
            _ => ApiError::Internal(message),
        }
    }
}
