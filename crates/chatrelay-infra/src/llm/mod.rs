//! LLM provider implementations.
//!
//! Contains the concrete implementation of the [`LlmProvider`] trait
//! defined in `chatrelay-core` and a factory ([`create_provider`]) that
//! constructs it from resolved [`ProviderSettings`].
//!
//! [`LlmProvider`]: chatrelay_core::llm::provider::LlmProvider

pub mod openai_compat;

use chatrelay_core::llm::box_provider::BoxLlmProvider;
use chatrelay_types::config::ProviderSettings;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::defaults_for;

/// Create a [`BoxLlmProvider`] for the configured provider and model.
pub fn create_provider(settings: &ProviderSettings) -> BoxLlmProvider {
    let config = defaults_for(settings.kind, settings.api_key.clone(), &settings.model);
    tracing::info!(
        provider = %settings.kind,
        model = %settings.model,
        base_url = %config.base_url,
        "Configured LLM provider"
    );
    BoxLlmProvider::new(OpenAiCompatibleProvider::new(config))
}
