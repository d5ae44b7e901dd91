//! Settings endpoints for the requesting web user.
//!
//! GET /api/settings   - Current settings (defaults if never saved)
//! POST /api/settings  - Merge the posted fields

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::{DateTime, Utc};
use serde::Serialize;

use chatrelay_types::settings::{Settings, SettingsUpdate};

use crate::http::error::AppError;
use crate::http::extractors::session::WebUser;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SettingsUpdated {
    pub message: &'static str,
    pub settings: Settings,
    pub timestamp: DateTime<Utc>,
}

pub async fn get_settings(State(state): State<AppState>, WebUser(user): WebUser) -> Json<Settings> {
    Json(state.settings.get(&user))
}

pub async fn update_settings(
    State(state): State<AppState>,
    WebUser(user): WebUser,
    payload: Result<Json<SettingsUpdate>, JsonRejection>,
) -> Result<Json<SettingsUpdated>, AppError> {
    let Json(update) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let settings = state.settings.update(&user, update);
    tracing::debug!(user = %user, "Settings updated");

    Ok(Json(SettingsUpdated {
        message: "Settings updated successfully",
        settings,
        timestamp: super::now(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support;
    use chatrelay_types::chat::UserKey;

    #[tokio::test]
    async fn test_defaults_use_configured_model() {
        let state = test_support::state();
        let Json(settings) = get_settings(State(state), WebUser(UserKey::web("s"))).await;
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.bot_name, "Discord AI Bot");
    }

    #[tokio::test]
    async fn test_update_then_get() {
        let state = test_support::state();
        let user = UserKey::web("s");
        let update = SettingsUpdate {
            response_length: Some("long".to_string()),
            typing_indicator: Some(false),
            ..Default::default()
        };

        let Json(updated) = update_settings(State(state.clone()), WebUser(user.clone()), Ok(Json(update)))
            .await
            .unwrap();
        assert_eq!(updated.message, "Settings updated successfully");
        assert_eq!(updated.settings.response_length, "long");

        let Json(settings) = get_settings(State(state), WebUser(user)).await;
        assert!(!settings.typing_indicator);
        assert!(settings.memory_enabled);
    }
}
