//! Configuration and per-provider defaults for OpenAI-compatible providers.
//!
//! Each provider that speaks the OpenAI chat completions protocol gets a
//! factory function returning an [`OpenAiCompatConfig`] with the correct
//! base URL.

use chatrelay_types::llm::ProviderKind;
use secrecy::SecretString;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Provider name (e.g., "openai", "gemini").
    pub provider_name: String,
    /// Base URL for the API.
    pub base_url: String,
    pub api_key: SecretString,
    /// Model identifier (e.g., "gpt-4o-mini", "gemini-1.5-flash").
    pub model: String,
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: ProviderKind::OpenAi.to_string(),
        base_url: OPENAI_BASE_URL.into(),
        api_key,
        model: model.into(),
    }
}

/// Google Gemini default configuration (OpenAI-compatible beta endpoint).
///
/// Base URL: `https://generativelanguage.googleapis.com/v1beta/openai`
pub fn gemini_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: ProviderKind::Gemini.to_string(),
        base_url: GEMINI_BASE_URL.into(),
        api_key,
        model: model.into(),
    }
}

/// Defaults for the given provider kind.
pub fn defaults_for(kind: ProviderKind, api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    match kind {
        ProviderKind::OpenAi => openai_defaults(api_key, model),
        ProviderKind::Gemini => gemini_defaults(api_key, model),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_defaults() {
        let config = openai_defaults(SecretString::from("sk-test"), "gpt-4o-mini");
        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn test_gemini_defaults() {
        let config = gemini_defaults(SecretString::from("g-key"), "gemini-1.5-flash");
        assert_eq!(config.provider_name, "gemini");
        assert_eq!(
            config.base_url,
            "https://generativelanguage.googleapis.com/v1beta/openai"
        );
    }

    #[test]
    fn test_defaults_for_dispatches_on_kind() {
        let config = defaults_for(ProviderKind::Gemini, SecretString::from("k"), "gemini-1.5-pro");
        assert_eq!(config.base_url, GEMINI_BASE_URL);
        assert_eq!(config.model, "gemini-1.5-pro");
    }
}
