//! Conversation history endpoints for the requesting web user.
//!
//! GET /api/history         - Stored turns, oldest first
//! POST /api/clear-history  - Forget the conversation

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use chatrelay_types::chat::Turn;

use crate::http::extractors::session::WebUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<Turn>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

pub async fn get_history(
    State(state): State<AppState>,
    WebUser(user): WebUser,
) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        history: state.web.history(&user),
        timestamp: super::now(),
    })
}

/// Clearing is unconditional; asking for confirmation is the page's job.
pub async fn clear_history(
    State(state): State<AppState>,
    WebUser(user): WebUser,
) -> Json<MessageResponse> {
    state.web.clear(&user).await;
    Json(MessageResponse {
        message: "History cleared successfully",
        timestamp: super::now(),
    })
}
