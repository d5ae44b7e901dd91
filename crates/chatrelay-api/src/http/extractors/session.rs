//! Web user identity from the `X-Session-Id` header.
//!
//! The web page generates a session id and sends it with every request; a
//! request without one is treated as the shared `anonymous` session.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use chatrelay_types::chat::UserKey;

use crate::http::error::AppError;
use crate::state::AppState;

pub const SESSION_HEADER: &str = "x-session-id";

const MAX_SESSION_ID_LEN: usize = 128;

/// The conversation key of the web user making the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebUser(pub UserKey);

impl WebUser {
    /// Parse a raw header value. `None` means no header was sent.
    pub fn from_header(value: Option<&str>) -> Result<Self, AppError> {
        let session_id = value.unwrap_or_default().trim();
        if session_id.len() > MAX_SESSION_ID_LEN
            || !session_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(AppError::Validation(
                "Invalid X-Session-Id header".to_string(),
            ));
        }
        Ok(WebUser(UserKey::web(session_id)))
    }
}

impl FromRequestParts<AppState> for WebUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let value = match parts.headers.get(SESSION_HEADER) {
            Some(v) => Some(v.to_str().map_err(|_| {
                AppError::Validation("Invalid X-Session-Id header".to_string())
            })?),
            None => None,
        };
        WebUser::from_header(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support;
    use axum::http::Request;

    #[test]
    fn test_missing_header_is_anonymous() {
        let user = WebUser::from_header(None).unwrap();
        assert_eq!(user.0.as_str(), "web:anonymous");
    }

    #[test]
    fn test_session_id_is_namespaced() {
        let user = WebUser::from_header(Some("abc-123")).unwrap();
        assert_eq!(user.0.as_str(), "web:abc-123");
    }

    #[test]
    fn test_rejects_odd_characters_and_long_ids() {
        assert!(WebUser::from_header(Some("a b")).is_err());
        assert!(WebUser::from_header(Some("x:y")).is_err());
        assert!(WebUser::from_header(Some(&"a".repeat(200))).is_err());
    }

    #[tokio::test]
    async fn test_extracts_from_request_parts() {
        let state = test_support::state();
        let (mut parts, _) = Request::builder()
            .header("X-Session-Id", "tab42")
            .body(())
            .unwrap()
            .into_parts();

        let user = WebUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.0, UserKey::web("tab42"));
    }
}
