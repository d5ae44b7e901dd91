use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("{0} is required")]
    MissingSecret(&'static str),

    #[error("invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_secret_display() {
        let err = ConfigError::MissingSecret("DISCORD_TOKEN");
        assert_eq!(err.to_string(), "DISCORD_TOKEN is required");
    }

    #[test]
    fn test_invalid_display() {
        let err = ConfigError::Invalid {
            field: "history_limit",
            message: "must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for history_limit: must be at least 1"
        );
    }
}
