//! Application error type mapping to HTTP status codes and `{error}` bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatrelay_core::chat::dispatcher::DispatchError;
use chatrelay_types::llm::LlmError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or empty request input.
    Validation(String),
    /// The LLM provider failed to produce a reply.
    Upstream(LlmError),
    /// No route matched.
    NotFound,
    /// Generic internal error.
    Internal(String),
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        match e {
            DispatchError::EmptyMessage => AppError::Validation(e.user_message().to_string()),
            DispatchError::Llm(e) => AppError::Upstream(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream(e) => {
                tracing::warn!(error = %e, "Provider failure surfaced to web client");
                (StatusCode::BAD_GATEWAY, e.user_message().to_string())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Endpoint not found".to_string()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Upstream(LlmError::RateLimited), StatusCode::BAD_GATEWAY),
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_empty_message_maps_to_validation() {
        let err = AppError::from(DispatchError::EmptyMessage);
        assert!(matches!(err, AppError::Validation(ref m) if m == "Message cannot be empty"));
    }

    #[test]
    fn test_llm_error_maps_to_upstream() {
        let err = AppError::from(DispatchError::Llm(LlmError::Timeout(30)));
        assert!(matches!(err, AppError::Upstream(LlmError::Timeout(30))));
    }
}
