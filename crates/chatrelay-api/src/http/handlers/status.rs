//! Status and health endpoints.

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use chatrelay_types::llm::ProviderKind;
use chatrelay_types::status::GatewayStatus;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub discord: GatewayStatus,
    pub provider: ProviderKind,
    pub model: String,
    pub ai_status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/status - Gateway liveness and the active provider. Never fails.
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        discord: state.status.status(),
        provider: state.provider_kind,
        model: state.model().to_string(),
        ai_status: "online",
        timestamp: super::now(),
    })
}

/// GET /health - Process liveness.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
