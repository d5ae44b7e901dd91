//! Conversation statistics endpoint.
//!
//! GET /api/stats - Totals across every stored conversation.

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_messages: usize,
    pub unique_users: usize,
    pub timestamp: DateTime<Utc>,
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.web.stats();
    Json(StatsResponse {
        total_messages: stats.total_messages,
        unique_users: stats.unique_users,
        timestamp: super::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support;
    use chatrelay_types::chat::UserKey;

    #[tokio::test]
    async fn test_stats_count_both_front_ends() {
        let state = test_support::state();
        state
            .discord
            .dispatch(&UserKey::discord(1), "hi")
            .await
            .unwrap();
        state.web.dispatch(&UserKey::web("s"), "hi").await.unwrap();

        let Json(stats) = get_stats(State(state)).await;
        assert_eq!(stats.total_messages, 4);
        assert_eq!(stats.unique_users, 2);
    }
}
