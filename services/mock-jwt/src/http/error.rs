//! API error types and responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::error::MockJwtError;

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    /// Key store or signing failure
    #[error(transparent)]
    Core(#[from] MockJwtError),

    /// Worker task panicked or was cancelled
    #[error("Internal error: {0}")]
    Internal(String),
}

/// API error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Stable error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Core(err) if err.is_client_error() => (StatusCode::BAD_REQUEST, err.code()),
            ApiError::Core(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.code()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("worker task failed: {}", err))
    }
}
