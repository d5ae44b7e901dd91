//! Configuration types for chatrelay.
//!
//! `RelayConfig` is the deserialized form of `chatrelay.toml` after
//! environment overrides have been applied. Every non-secret field has a
//! default so an empty file (or no file at all) yields a usable config once
//! the provider API key is supplied.

use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::llm::ProviderKind;

/// Discord rejects messages longer than this many characters.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// Top-level configuration.
///
/// Secrets are wrapped in [`SecretString`] so `Debug` output redacts them.
#[derive(Debug, Deserialize)]
pub struct RelayConfig {
    /// Provider name as written by the user; normalized by the loader.
    #[serde(default = "default_ai_provider")]
    pub ai_provider: String,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Maximum turns kept per user (user and assistant turns both count).
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Upper bound on a single provider call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Completion budget for Discord replies.
    #[serde(default = "default_discord_max_tokens")]
    pub discord_max_tokens: u32,

    /// Completion budget for web replies.
    #[serde(default = "default_web_max_tokens")]
    pub web_max_tokens: u32,

    /// Address the HTTP API listens on.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Directory with the static web page; served only when it exists.
    #[serde(default = "default_web_dir")]
    pub web_dir: PathBuf,

    /// Log file appended to alongside the console; empty disables it.
    #[serde(default = "default_log_file")]
    pub log_file: String,

    #[serde(default)]
    pub discord_token: Option<SecretString>,

    #[serde(default)]
    pub openai_api_key: Option<SecretString>,

    #[serde(default)]
    pub gemini_api_key: Option<SecretString>,
}

fn default_ai_provider() -> String {
    "openai".to_string()
}

fn default_openai_model() -> String {
    ProviderKind::OpenAi.default_model().to_string()
}

fn default_gemini_model() -> String {
    ProviderKind::Gemini.default_model().to_string()
}

fn default_history_limit() -> usize {
    20
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_temperature() -> f64 {
    0.7
}

fn default_discord_max_tokens() -> u32 {
    1000
}

fn default_web_max_tokens() -> u32 {
    800
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_web_dir() -> PathBuf {
    PathBuf::from("web")
}

fn default_log_file() -> String {
    "bot.log".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            ai_provider: default_ai_provider(),
            openai_model: default_openai_model(),
            gemini_model: default_gemini_model(),
            history_limit: default_history_limit(),
            request_timeout_secs: default_request_timeout_secs(),
            temperature: default_temperature(),
            discord_max_tokens: default_discord_max_tokens(),
            web_max_tokens: default_web_max_tokens(),
            bind: default_bind(),
            web_dir: default_web_dir(),
            log_file: default_log_file(),
            discord_token: None,
            openai_api_key: None,
            gemini_api_key: None,
        }
    }
}

/// The provider selection resolved from a [`RelayConfig`].
#[derive(Debug)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub model: String,
    pub api_key: SecretString,
}

impl RelayConfig {
    /// Parsed provider kind. The loader normalizes `ai_provider`, so this
    /// only fails on a config that bypassed it.
    pub fn provider_kind(&self) -> Result<ProviderKind, ConfigError> {
        self.ai_provider
            .parse()
            .map_err(|message| ConfigError::Invalid {
                field: "ai_provider",
                message,
            })
    }

    /// Model configured for the given provider.
    pub fn model_for(&self, kind: ProviderKind) -> &str {
        match kind {
            ProviderKind::OpenAi => &self.openai_model,
            ProviderKind::Gemini => &self.gemini_model,
        }
    }

    /// Resolve provider, model and API key; the key for the selected
    /// provider is mandatory.
    pub fn provider_settings(&self) -> Result<ProviderSettings, ConfigError> {
        let kind = self.provider_kind()?;
        let api_key = match kind {
            ProviderKind::OpenAi => self
                .openai_api_key
                .clone()
                .ok_or(ConfigError::MissingSecret("OPENAI_API_KEY"))?,
            ProviderKind::Gemini => self
                .gemini_api_key
                .clone()
                .ok_or(ConfigError::MissingSecret("GEMINI_API_KEY"))?,
        };
        Ok(ProviderSettings {
            kind,
            model: self.model_for(kind).to_string(),
            api_key,
        })
    }

    /// Discord bot token, required only when the gateway is started.
    pub fn require_discord_token(&self) -> Result<&SecretString, ConfigError> {
        self.discord_token
            .as_ref()
            .ok_or(ConfigError::MissingSecret("DISCORD_TOKEN"))
    }

    /// Log file path, or `None` when file logging is disabled.
    pub fn log_file_path(&self) -> Option<PathBuf> {
        let trimmed = self.log_file.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_relay_config_default_values() {
        let config = RelayConfig::default();
        assert_eq!(config.ai_provider, "openai");
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.discord_max_tokens, 1000);
        assert_eq!(config.web_max_tokens, 800);
        assert_eq!(config.bind, "0.0.0.0:5000");
        assert_eq!(config.log_file_path(), Some(PathBuf::from("bot.log")));
    }

    #[test]
    fn test_relay_config_deserialize_with_defaults() {
        let config: RelayConfig = toml::from_str("").unwrap();
        assert_eq!(config.history_limit, 20);
        assert!(config.discord_token.is_none());
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_relay_config_deserialize_with_values() {
        let toml_str = r#"
ai_provider = "gemini"
gemini_model = "gemini-1.5-pro"
history_limit = 8
log_file = ""
gemini_api_key = "g-key"
"#;
        let config: RelayConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider_kind().unwrap(), ProviderKind::Gemini);
        assert_eq!(config.history_limit, 8);
        assert!(config.log_file_path().is_none());

        let settings = config.provider_settings().unwrap();
        assert_eq!(settings.kind, ProviderKind::Gemini);
        assert_eq!(settings.model, "gemini-1.5-pro");
        assert_eq!(settings.api_key.expose_secret(), "g-key");
    }

    #[test]
    fn test_provider_settings_requires_matching_key() {
        let config = RelayConfig {
            gemini_api_key: Some(SecretString::from("unused")),
            ..RelayConfig::default()
        };
        let err = config.provider_settings().unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecret("OPENAI_API_KEY")));
    }

    #[test]
    fn test_require_discord_token() {
        let config = RelayConfig::default();
        assert!(config.require_discord_token().is_err());

        let config = RelayConfig {
            discord_token: Some(SecretString::from("token")),
            ..RelayConfig::default()
        };
        assert_eq!(config.require_discord_token().unwrap().expose_secret(), "token");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = RelayConfig {
            openai_api_key: Some(SecretString::from("sk-very-secret")),
            ..RelayConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-very-secret"));
    }
}
