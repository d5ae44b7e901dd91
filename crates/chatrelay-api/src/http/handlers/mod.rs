//! HTTP request handlers for the JSON API.

pub mod chat;
pub mod export;
pub mod history;
pub mod settings;
pub mod stats;
pub mod status;

use chrono::{DateTime, Utc};

/// Timestamp attached to every JSON reply.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now()
}
