//! EchoTrace hub API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use echotrace_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

use crate::publisher::PushError;

/// Startup and runtime errors for the hub server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// Offending `quiet_hours` entries, for quiet-hours validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<String>>,
}

/// HTTP-layer error that implements `IntoResponse`.
#[derive(Debug)]
pub enum ApiError {
    /// A domain operation failed.
    Domain(DomainError),
    /// A configuration push to a node failed.
    Push(PushError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<PushError> for ApiError {
    fn from(err: PushError) -> Self {
        Self::Push(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, entries) = match &self {
            Self::Domain(DomainError::InvalidQuietHours(entries)) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                Some(entries.clone()),
            ),
            Self::Domain(DomainError::NotFound(_)) => (StatusCode::NOT_FOUND, "not_found", None),
            Self::Domain(err) if err.is_validation() => {
                (StatusCode::BAD_REQUEST, "validation_error", None)
            }
            Self::Domain(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "infrastructure_error",
                None,
            ),
            Self::Push(PushError::Conflict(_)) => (StatusCode::CONFLICT, "push_conflict", None),
            Self::Push(PushError::Failed(_)) => (StatusCode::BAD_GATEWAY, "push_failed", None),
        };

        let message = match self {
            Self::Domain(err) => err.to_string(),
            Self::Push(err) => err.to_string(),
        };

        let body = ErrorBody {
            error: error_code,
            message,
            entries,
        };

        (status, Json(body)).into_response()
    }
}
