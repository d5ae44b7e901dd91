//! Per-user settings for the web front-end, held in memory.

use std::sync::Arc;

use chatrelay_types::chat::UserKey;
use chatrelay_types::settings::{Settings, SettingsUpdate};
use dashmap::DashMap;

/// Settings keyed by web user; users who never saved get the defaults.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    settings: Arc<DashMap<UserKey, Settings>>,
    default_model: String,
}

impl SettingsStore {
    pub fn new(default_model: impl Into<String>) -> Self {
        Self {
            settings: Arc::new(DashMap::new()),
            default_model: default_model.into(),
        }
    }

    pub fn get(&self, user: &UserKey) -> Settings {
        self.settings
            .get(user)
            .map(|s| s.clone())
            .unwrap_or_else(|| Settings::defaults_for_model(&self.default_model))
    }

    /// Merge `update` into the user's settings and return the result.
    pub fn update(&self, user: &UserKey, update: SettingsUpdate) -> Settings {
        let mut entry = self
            .settings
            .entry(user.clone())
            .or_insert_with(|| Settings::defaults_for_model(&self.default_model));
        entry.apply(update);
        entry.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_user_gets_defaults() {
        let store = SettingsStore::new("gpt-4o-mini");
        let settings = store.get(&UserKey::web("s"));
        assert_eq!(settings, Settings::defaults_for_model("gpt-4o-mini"));
    }

    #[test]
    fn test_update_merges_and_persists() {
        let store = SettingsStore::new("gpt-4o-mini");
        let user = UserKey::web("s");
        let updated = store.update(
            &user,
            SettingsUpdate {
                bot_name: Some("Helper".to_string()),
                auto_scroll: Some(false),
                ..Default::default()
            },
        );

        assert_eq!(updated.bot_name, "Helper");
        assert!(!updated.auto_scroll);
        assert_eq!(updated.response_style, "friendly");
        assert_eq!(store.get(&user), updated);
        assert_eq!(store.get(&UserKey::web("other")).bot_name, "Discord AI Bot");
    }
}
