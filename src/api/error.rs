//! API error types with structured JSON responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::ollama::LlmError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Query cannot be empty")]
    EmptyQuery,
    #[error("Model backend unavailable: {0}")]
    ModelUnavailable(String),
    #[error("Model not found: {0}")]
    ModelNotFound(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::EmptyQuery => (
                StatusCode::BAD_REQUEST,
                "EMPTY_QUERY",
                "Query cannot be empty".to_string(),
            ),
            ApiError::ModelUnavailable(detail) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "MODEL_UNAVAILABLE",
                format!("Model backend unavailable: {detail}"),
            ),
            ApiError::ModelNotFound(model) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "MODEL_NOT_FOUND",
                format!("Model '{model}' is not available"),
            ),
            ApiError::Upstream(detail) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                detail.clone(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Connection(url) => ApiError::ModelUnavailable(url),
            LlmError::ModelMissing(model) => ApiError::ModelNotFound(model),
            LlmError::Upstream { status, body } => {
                ApiError::Upstream(format!("Ollama returned status {status}: {body}"))
            }
            LlmError::HttpClient(e) | LlmError::ResponseParsing(e) => ApiError::Upstream(e),
        }
    }
}
