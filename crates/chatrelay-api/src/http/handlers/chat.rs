//! Chat endpoint.
//!
//! POST /api/chat - Send a message, receive the assistant's reply.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::http::extractors::session::WebUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// POST /api/chat - Run one exchange for the requesting web user.
///
/// An empty message is a 400; a provider failure is a 502 and leaves the
/// user's history untouched.
pub async fn chat(
    State(state): State<AppState>,
    WebUser(user): WebUser,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let response = state.web.dispatch(&user, &request.message).await?;

    Ok(Json(ChatResponse {
        response,
        timestamp: super::now(),
    }))
}
