//! Per-user web settings.
//!
//! The web page keeps its own copy in browser storage; the server holds the
//! same shape so a fresh page load can fetch defaults and push changes.

use serde::{Deserialize, Serialize};

/// Settings object exchanged with the web page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub bot_name: String,
    pub response_style: String,
    pub model: String,
    pub response_length: String,
    pub memory_enabled: bool,
    pub typing_indicator: bool,
    pub auto_scroll: bool,
}

impl Settings {
    /// Defaults shown to a user who has never saved settings.
    pub fn defaults_for_model(model: &str) -> Self {
        Self {
            bot_name: "Discord AI Bot".to_string(),
            response_style: "friendly".to_string(),
            model: model.to_string(),
            response_length: "medium".to_string(),
            memory_enabled: true,
            typing_indicator: true,
            auto_scroll: true,
        }
    }

    /// Overlay the fields present in `update`.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(v) = update.bot_name {
            self.bot_name = v;
        }
        if let Some(v) = update.response_style {
            self.response_style = v;
        }
        if let Some(v) = update.model {
            self.model = v;
        }
        if let Some(v) = update.response_length {
            self.response_length = v;
        }
        if let Some(v) = update.memory_enabled {
            self.memory_enabled = v;
        }
        if let Some(v) = update.typing_indicator {
            self.typing_indicator = v;
        }
        if let Some(v) = update.auto_scroll {
            self.auto_scroll = v;
        }
    }
}

/// Partial settings posted by the web page. Absent fields are left as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdate {
    pub bot_name: Option<String>,
    pub response_style: Option<String>,
    pub model: Option<String>,
    pub response_length: Option<String>,
    pub memory_enabled: Option<bool>,
    pub typing_indicator: Option<bool>,
    pub auto_scroll: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::defaults_for_model("gpt-4o-mini");
        assert_eq!(s.bot_name, "Discord AI Bot");
        assert_eq!(s.model, "gpt-4o-mini");
        assert!(s.memory_enabled);
    }

    #[test]
    fn test_apply_partial_update() {
        let mut s = Settings::defaults_for_model("gpt-4o-mini");
        let update: SettingsUpdate =
            serde_json::from_str(r#"{"bot_name":"Robo","auto_scroll":false}"#).unwrap();
        s.apply(update);
        assert_eq!(s.bot_name, "Robo");
        assert!(!s.auto_scroll);
        assert_eq!(s.response_style, "friendly");
    }

    #[test]
    fn test_update_ignores_unknown_fields() {
        let update: SettingsUpdate =
            serde_json::from_str(r#"{"theme":"dark","memory_enabled":false}"#).unwrap();
        assert_eq!(update.memory_enabled, Some(false));
        assert!(update.bot_name.is_none());
    }
}
