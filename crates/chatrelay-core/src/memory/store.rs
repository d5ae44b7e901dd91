//! Bounded in-memory conversation store.
//!
//! Each user key maps to an ordered queue of turns capped at
//! `history_limit`; appending past the cap evicts from the head. The map is
//! sharded (`DashMap`), so every operation below is atomic per key while
//! different users never contend on the same lock.

use std::collections::VecDeque;
use std::sync::Arc;

use chatrelay_types::chat::{ConversationExport, ConversationStats, Turn, TurnRole, UserKey};
use dashmap::DashMap;
use tracing::debug;

/// Shared handle to every user's bounded conversation history.
///
/// Cloning is cheap and yields a handle onto the same underlying map; the
/// store is created once at process start and handed to each front-end.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    histories: Arc<DashMap<UserKey, VecDeque<Turn>>>,
    history_limit: usize,
}

impl ConversationStore {
    /// Create an empty store keeping at most `history_limit` turns per user.
    ///
    /// A limit of zero is raised to one.
    pub fn new(history_limit: usize) -> Self {
        Self {
            histories: Arc::new(DashMap::new()),
            history_limit: history_limit.max(1),
        }
    }

    /// Maximum turns kept per user.
    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Append a turn at the tail of `user`'s history, evicting the oldest
    /// turns once the limit is exceeded. Returns the stored turn.
    pub fn append(&self, user: &UserKey, role: TurnRole, content: impl Into<String>) -> Turn {
        let turn = Turn::now(role, content);
        let mut history = self.histories.entry(user.clone()).or_default();
        history.push_back(turn.clone());
        self.evict(user, &mut history);
        turn
    }

    /// Append a user turn and its assistant reply under one entry lock, so
    /// concurrent readers never observe the question without its answer.
    pub fn append_exchange(&self, user: &UserKey, message: &str, reply: &str) {
        let mut history = self.histories.entry(user.clone()).or_default();
        history.push_back(Turn::now(TurnRole::User, message));
        history.push_back(Turn::now(TurnRole::Assistant, reply));
        self.evict(user, &mut history);
    }

    fn evict(&self, user: &UserKey, history: &mut VecDeque<Turn>) {
        let excess = history.len().saturating_sub(self.history_limit);
        if excess > 0 {
            history.drain(..excess);
            debug!(user = %user, evicted = excess, "Evicted oldest turns");
        }
    }

    /// Ordered turns for `user`, oldest first; empty if none exist.
    pub fn get(&self, user: &UserKey) -> Vec<Turn> {
        self.histories
            .get(user)
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Remove every turn for `user`.
    ///
    /// Idempotent. Returns `true` if there was any history to remove.
    pub fn clear(&self, user: &UserKey) -> bool {
        self.histories
            .remove(user)
            .is_some_and(|(_, history)| !history.is_empty())
    }

    /// Snapshot of `user`'s history for download. Does not mutate.
    pub fn export(&self, user: &UserKey) -> ConversationExport {
        ConversationExport::new(self.get(user))
    }

    /// Totals across every stored conversation.
    pub fn stats(&self) -> ConversationStats {
        self.histories
            .iter()
            .fold(ConversationStats::default(), |mut stats, entry| {
                if !entry.value().is_empty() {
                    stats.unique_users += 1;
                    stats.total_messages += entry.value().len();
                }
                stats
            })
    }
}
