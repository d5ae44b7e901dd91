//! Conversation types for chatrelay.
//!
//! These types model the per-user conversation memory: the key a history is
//! stored under, the role-tagged turns it holds, and the snapshots produced
//! for export and statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::llm::MessageRole;

/// Opaque key identifying whose conversation a turn belongs to.
///
/// Keys are namespaced by front-end (`discord:<id>`, `web:<session>`) so a
/// Discord user and a web session never share a history by accident.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserKey(String);

impl UserKey {
    /// Key for a Discord user, from the platform's numeric user id.
    pub fn discord(user_id: u64) -> Self {
        Self(format!("discord:{user_id}"))
    }

    /// Key for a web session. Blank session ids collapse to `anonymous`.
    pub fn web(session_id: &str) -> Self {
        let session_id = session_id.trim();
        if session_id.is_empty() {
            Self("web:anonymous".to_string())
        } else {
            Self(format!("web:{session_id}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who authored a stored turn.
///
/// Only users and the assistant appear in history; the system prompt is
/// added at request-assembly time and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl From<TurnRole> for MessageRole {
    fn from(role: TurnRole) -> Self {
        match role {
            TurnRole::User => MessageRole::User,
            TurnRole::Assistant => MessageRole::Assistant,
        }
    }
}

/// One role-tagged message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Create a turn stamped with the current time.
    pub fn now(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Downloadable snapshot of one user's conversation.
///
/// Serialized with the camelCase field names the web page expects:
/// `{exportDate, totalMessages, conversations}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationExport {
    pub export_date: DateTime<Utc>,
    pub total_messages: usize,
    pub conversations: Vec<Turn>,
}

impl ConversationExport {
    pub fn new(turns: Vec<Turn>) -> Self {
        Self {
            export_date: Utc::now(),
            total_messages: turns.len(),
            conversations: turns,
        }
    }
}

/// Aggregate counts across every stored conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationStats {
    pub total_messages: usize,
    pub unique_users: usize,
}
