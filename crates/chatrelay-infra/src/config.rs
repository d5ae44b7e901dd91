//! Configuration loader for chatrelay.
//!
//! Layers, later wins:
//! 1. `.env` in the working directory, loaded into the process environment
//! 2. `chatrelay.toml` (missing file means defaults; malformed file is an error)
//! 3. environment overrides (`DISCORD_TOKEN`, `AI_PROVIDER`, `OPENAI_API_KEY`, ...)
//!
//! The result is normalized: an unknown provider falls back to `openai` and
//! an unknown model falls back to the provider default, each with a warning.

use std::net::SocketAddr;
use std::path::Path;

use chatrelay_types::config::RelayConfig;
use chatrelay_types::error::ConfigError;
use chatrelay_types::llm::ProviderKind;
use secrecy::SecretString;

/// Environment variable overriding the HTTP bind address.
pub const BIND_ENV: &str = "CHATRELAY_BIND";

/// Load `.env` from the working directory, if present.
///
/// Variables already set in the environment take precedence.
pub fn load_dotenv() {
    match dotenv::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => tracing::debug!("No .env file found"),
        Err(err) => tracing::warn!("Failed to load .env: {err}"),
    }
}

/// The config file with environment overrides applied, not yet normalized.
///
/// Split from [`finalize`] so the caller can install logging (which needs
/// `log_file`) before fallback warnings are emitted.
pub async fn read_layered(path: &Path) -> Result<RelayConfig, ConfigError> {
    let mut config = read_config_file(path).await?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Normalize provider/model choices, then validate.
pub fn finalize(config: &mut RelayConfig) -> Result<(), ConfigError> {
    normalize(config);
    validate(config)
}

async fn read_config_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(RelayConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str::<RelayConfig>(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// Overlay environment variables onto `config`. Blank values are ignored.
pub fn apply_env_overrides(config: &mut RelayConfig, lookup: impl Fn(&str) -> Option<String>) {
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = var("AI_PROVIDER") {
        config.ai_provider = v;
    }
    if let Some(v) = var("OPENAI_MODEL") {
        config.openai_model = v;
    }
    if let Some(v) = var("GEMINI_MODEL") {
        config.gemini_model = v;
    }
    if let Some(v) = var(BIND_ENV) {
        config.bind = v;
    }
    if let Some(v) = var("DISCORD_TOKEN") {
        config.discord_token = Some(SecretString::from(v));
    }
    if let Some(v) = var("OPENAI_API_KEY") {
        config.openai_api_key = Some(SecretString::from(v));
    }
    if let Some(v) = var("GEMINI_API_KEY") {
        config.gemini_api_key = Some(SecretString::from(v));
    }
}

/// Replace unusable provider/model choices with defaults.
pub fn normalize(config: &mut RelayConfig) {
    let kind = match config.ai_provider.parse::<ProviderKind>() {
        Ok(kind) => kind,
        Err(err) => {
            tracing::warn!("{err}, falling back to 'openai'");
            ProviderKind::OpenAi
        }
    };
    config.ai_provider = kind.to_string();

    for kind in [ProviderKind::OpenAi, ProviderKind::Gemini] {
        let model = match kind {
            ProviderKind::OpenAi => &mut config.openai_model,
            ProviderKind::Gemini => &mut config.gemini_model,
        };
        let trimmed = model.trim();
        if !kind.is_allowed_model(trimmed) {
            tracing::warn!(
                "Invalid {kind} model '{trimmed}', falling back to '{}'",
                kind.default_model()
            );
            *model = kind.default_model().to_string();
        } else if trimmed.len() != model.len() {
            *model = trimmed.to_string();
        }
    }
}

fn validate(config: &RelayConfig) -> Result<(), ConfigError> {
    if config.history_limit == 0 {
        return Err(ConfigError::Invalid {
            field: "history_limit",
            message: "must be at least 1".to_string(),
        });
    }
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            field: "request_timeout_secs",
            message: "must be at least 1".to_string(),
        });
    }
    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ConfigError::Invalid {
            field: "temperature",
            message: format!("{} is outside 0.0..=2.0", config.temperature),
        });
    }
    config
        .bind
        .parse::<SocketAddr>()
        .map_err(|err| ConfigError::Invalid {
            field: "bind",
            message: format!("'{}': {err}", config.bind),
        })?;
    Ok(())
}
