//! Axum router configuration with middleware.
//!
//! JSON routes live under `/api/`; `/health` sits beside them. When the
//! configured web directory exists its files are served for every other
//! path, with `index.html` at `/`. Anything unmatched is a JSON 404.

use axum::Router;
use axum::handler::HandlerWithoutStateExt;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::error::AppError;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let web_dir = state.web_dir.clone();

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/status", get(handlers::status::get_status))
        .route("/stats", get(handlers::stats::get_stats))
        .route("/history", get(handlers::history::get_history))
        .route("/clear-history", post(handlers::history::clear_history))
        .route(
            "/settings",
            get(handlers::settings::get_settings).post(handlers::settings::update_settings),
        )
        .route("/export", get(handlers::export::export_history))
        .fallback(not_found);

    let router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::status::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if web_dir.is_dir() {
        tracing::info!(path = %web_dir.display(), "Static web page serving enabled");
        router.fallback_service(ServeDir::new(&web_dir).not_found_service(not_found.into_service()))
    } else {
        tracing::debug!(path = %web_dir.display(), "Web directory missing, serving API only");
        router.fallback(not_found)
    }
}

/// Fallback for unknown routes.
async fn not_found() -> AppError {
    AppError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    fn api_only_router() -> Router {
        let mut state = test_support::state();
        state.web_dir = "does-not-exist".into();
        build_router(state)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_api_route_is_json_404() {
        let (status, body) = send(api_only_router(), get("/api/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Endpoint not found");
    }

    #[tokio::test]
    async fn test_unknown_top_level_route_is_json_404() {
        let (status, body) = send(api_only_router(), get("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Endpoint not found");
    }

    #[tokio::test]
    async fn test_chat_through_router() {
        let request = Request::post("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-session-id", "abc")
            .body(Body::from(r#"{"message":"hi"}"#))
            .unwrap();
        let (status, body) = send(api_only_router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "echo: hi");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_empty_chat_through_router_is_400() {
        let request = Request::post("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"message":"  "}"#))
            .unwrap();
        let (status, body) = send(api_only_router(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message cannot be empty");
    }

    #[tokio::test]
    async fn test_status_through_router() {
        let (status, body) = send(api_only_router(), get("/api/status")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["discord"], "offline");
        assert_eq!(body["ai_status"], "online");
    }

    #[tokio::test]
    async fn test_health_through_router() {
        let (status, body) = send(api_only_router(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_web_dir_serves_index_and_json_404() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("index.html"), "<html></html>").unwrap();
        let mut state = test_support::state();
        state.web_dir = tmp.path().to_path_buf();
        let router = build_router(state);

        let response = router.clone().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (status, body) = send(router, get("/missing.js")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Endpoint not found");
    }
}
