//! Conversation export endpoint.
//!
//! GET /api/export - The requesting user's history as a JSON download.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::http::error::AppError;
use crate::http::extractors::session::WebUser;
use crate::state::AppState;

pub async fn export_history(
    State(state): State<AppState>,
    WebUser(user): WebUser,
) -> Result<Response, AppError> {
    let export = state.web.export(&user);
    let body = serde_json::to_string_pretty(&export)
        .map_err(|e| AppError::Internal(format!("Failed to serialize export: {e}")))?;
    let disposition = format!(
        "attachment; filename=\"chat-export-{}.json\"",
        export.export_date.format("%Y-%m-%d")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support;
    use axum::http::StatusCode;
    use chatrelay_types::chat::UserKey;

    #[tokio::test]
    async fn test_export_is_attachment() {
        let state = test_support::state();
        let user = UserKey::web("s");
        state.web.dispatch(&user, "hello").await.unwrap();

        let response = export_history(State(state.clone()), WebUser(user.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap();
        assert!(disposition.starts_with("attachment; filename=\"chat-export-"));
        assert!(disposition.ends_with(".json\""));

        // Exporting does not consume the history.
        assert_eq!(state.web.history(&user).len(), 2);
    }
}
