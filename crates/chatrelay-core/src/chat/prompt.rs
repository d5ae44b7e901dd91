//! Completion-request assembly from a user's stored history.

use chatrelay_types::chat::UserKey;
use chatrelay_types::llm::{CompletionRequest, Message, MessageRole};

use crate::memory::store::ConversationStore;

/// System prompt for replies posted to Discord.
pub const DISCORD_SYSTEM_PROMPT: &str = "You are a helpful AI assistant in a Discord server. \
Be concise, friendly, and helpful. Keep responses under 2000 characters when possible.";

/// System prompt for replies served to the web page.
pub const WEB_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant in a Discord/web app. Be concise, friendly, and accurate.";

/// Fixed per-front-end request parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptConfig {
    pub system_prompt: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl PromptConfig {
    pub fn discord(model: impl Into<String>, max_tokens: u32, temperature: f64) -> Self {
        Self {
            system_prompt: DISCORD_SYSTEM_PROMPT.to_string(),
            model: model.into(),
            max_tokens,
            temperature: Some(temperature),
        }
    }

    pub fn web(model: impl Into<String>, max_tokens: u32, temperature: f64) -> Self {
        Self {
            system_prompt: WEB_SYSTEM_PROMPT.to_string(),
            model: model.into(),
            max_tokens,
            temperature: Some(temperature),
        }
    }
}

/// Builds the provider payload: system prompt, then the user's history in
/// stored order, then the new message.
///
/// The store's bound is the only truncation applied. The output depends
/// only on the store contents and the inputs.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    store: ConversationStore,
    config: PromptConfig,
}

impl PromptAssembler {
    pub fn new(store: ConversationStore, config: PromptConfig) -> Self {
        Self { store, config }
    }

    pub fn build(&self, user: &UserKey, new_message: &str) -> CompletionRequest {
        let history = self.store.get(user);
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::new(
            MessageRole::System,
            self.config.system_prompt.clone(),
        ));
        messages.extend(
            history
                .into_iter()
                .map(|turn| Message::new(turn.role.into(), turn.content)),
        );
        messages.push(Message::new(MessageRole::User, new_message));

        CompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_types::chat::TurnRole;

    fn assembler(store: &ConversationStore) -> PromptAssembler {
        PromptAssembler::new(store.clone(), PromptConfig::discord("gpt-4o-mini", 1000, 0.7))
    }

    #[test]
    fn test_build_without_history() {
        let store = ConversationStore::new(20);
        let request = assembler(&store).build(&UserKey::discord(1), "hello");

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.messages[0].content, DISCORD_SYSTEM_PROMPT);
        assert_eq!(request.messages[1], Message::new(MessageRole::User, "hello"));
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.max_tokens, 1000);
        assert_eq!(request.temperature, Some(0.7));
    }

    #[test]
    fn test_build_includes_history_in_order() {
        let store = ConversationStore::new(20);
        let user = UserKey::discord(1);
        store.append(&user, TurnRole::User, "q1");
        store.append(&user, TurnRole::Assistant, "a1");

        let request = assembler(&store).build(&user, "q2");
        let roles: Vec<MessageRole> = request.messages.iter().map(|m| m.role).collect();
        let contents: Vec<&str> = request.messages.iter().map(|m| m.content.as_str()).collect();

        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User
            ]
        );
        assert_eq!(&contents[1..], &["q1", "a1", "q2"]);
    }

    #[test]
    fn test_build_is_deterministic_and_read_only() {
        let store = ConversationStore::new(20);
        let user = UserKey::web("s");
        store.append_exchange(&user, "q", "a");
        let assembler = assembler(&store);

        assert_eq!(assembler.build(&user, "next"), assembler.build(&user, "next"));
        assert_eq!(store.get(&user).len(), 2);
    }

    #[test]
    fn test_build_ignores_other_users() {
        let store = ConversationStore::new(20);
        store.append_exchange(&UserKey::discord(2), "theirs", "reply");

        let request = assembler(&store).build(&UserKey::discord(1), "mine");
        assert_eq!(request.messages.len(), 2);
    }

    #[test]
    fn test_web_preset() {
        let config = PromptConfig::web("gemini-1.5-flash", 800, 0.7);
        assert_eq!(config.system_prompt, WEB_SYSTEM_PROMPT);
        assert_eq!(config.max_tokens, 800);
    }
}
