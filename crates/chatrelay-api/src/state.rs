//! Application state wiring the conversation core into both front-ends.
//!
//! One `ConversationStore` and one provider are created at startup; the
//! Discord and web dispatchers share them and differ only in prompt preset.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chatrelay_core::chat::dispatcher::Dispatcher;
use chatrelay_core::chat::prompt::PromptConfig;
use chatrelay_core::llm::box_provider::BoxLlmProvider;
use chatrelay_core::memory::store::ConversationStore;
use chatrelay_core::settings::SettingsStore;
use chatrelay_core::status::StatusReporter;
use chatrelay_types::config::RelayConfig;
use chatrelay_types::llm::ProviderKind;

/// Shared state handed to HTTP handlers and the Discord event handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub discord: Dispatcher,
    pub web: Dispatcher,
    pub settings: SettingsStore,
    pub status: StatusReporter,
    pub provider_kind: ProviderKind,
    pub web_dir: PathBuf,
}

impl AppState {
    /// Wire the store, provider and dispatchers from `config`.
    pub fn new(config: &RelayConfig, provider_kind: ProviderKind, provider: BoxLlmProvider) -> Self {
        let store = ConversationStore::new(config.history_limit);
        let model = provider.model().to_string();

        let discord = Dispatcher::new(
            store,
            Arc::new(provider),
            PromptConfig::discord(&model, config.discord_max_tokens, config.temperature),
            Duration::from_secs(config.request_timeout_secs),
        );
        let web = discord.with_prompt(PromptConfig::web(
            &model,
            config.web_max_tokens,
            config.temperature,
        ));

        Self {
            discord,
            web,
            settings: SettingsStore::new(model),
            status: StatusReporter::new(),
            provider_kind,
            web_dir: config.web_dir.clone(),
        }
    }

    /// Model answering chat requests.
    pub fn model(&self) -> &str {
        self.web.provider().model()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chatrelay_core::llm::provider::LlmProvider;
    use chatrelay_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

    use super::*;

    /// Replies "echo: <last message>", or fails with the given error.
    pub struct MockProvider {
        pub fail: Option<fn() -> LlmError>,
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "gpt-4o-mini"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            if let Some(fail) = self.fail {
                return Err(fail());
            }
            let last = request
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            Ok(CompletionResponse {
                id: "resp-1".to_string(),
                content: format!("echo: {last}"),
                model: "gpt-4o-mini".to_string(),
                usage: Usage::default(),
            })
        }
    }

    pub fn state() -> AppState {
        AppState::new(
            &RelayConfig::default(),
            ProviderKind::OpenAi,
            BoxLlmProvider::new(MockProvider { fail: None }),
        )
    }

    pub fn failing_state(fail: fn() -> LlmError) -> AppState {
        AppState::new(
            &RelayConfig::default(),
            ProviderKind::OpenAi,
            BoxLlmProvider::new(MockProvider { fail: Some(fail) }),
        )
    }
}
