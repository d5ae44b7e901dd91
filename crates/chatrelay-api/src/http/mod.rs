//! HTTP/JSON API for the web chat page.
//!
//! Axum-based API under `/api/`, CORS open, requests traced. Every error
//! body is `{"error": "..."}`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
