//! Registry of setting handlers.

use std::collections::HashMap;

use super::handlers::{HistoryFileHandler, TextSetting, TierTimeoutHandler};
use super::SettingHandler;

/// Registry of all available setting handlers.
pub struct SettingRegistry {
    handlers: HashMap<&'static str, Box<dyn SettingHandler>>,
    /// Keys in display order for `plugchat set` output.
    display_order: Vec<&'static str>,
}

impl SettingRegistry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
            display_order: Vec::new(),
        };

        registry.register(Box::new(HistoryFileHandler));
        registry.register(Box::new(TierTimeoutHandler));
        registry.register(Box::new(TextSetting::api_key(
            "openweather-api-key",
            "plugchat set openweather-api-key 0123456789abcdef",
            |config| &mut config.weather.openweather_api_key,
        )));
        registry.register(Box::new(TextSetting::base_url(
            "openweather-base-url",
            "plugchat set openweather-base-url https://api.openweathermap.org/data/2.5",
            |config| &mut config.weather.openweather_base_url,
        )));
        registry.register(Box::new(TextSetting::base_url(
            "wttr-base-url",
            "plugchat set wttr-base-url https://wttr.in",
            |config| &mut config.weather.wttr_base_url,
        )));
        registry.register(Box::new(TextSetting::api_key(
            "merriam-webster-api-key",
            "plugchat set merriam-webster-api-key 01234567-89ab-cdef",
            |config| &mut config.dictionary.merriam_webster_api_key,
        )));
        registry.register(Box::new(TextSetting::base_url(
            "free-dictionary-base-url",
            "plugchat set free-dictionary-base-url https://api.dictionaryapi.dev/api/v2/entries/en",
            |config| &mut config.dictionary.free_dictionary_base_url,
        )));
        registry.register(Box::new(TextSetting::base_url(
            "merriam-webster-base-url",
            "plugchat set merriam-webster-base-url https://www.dictionaryapi.com/api/v3/references/collegiate/json",
            |config| &mut config.dictionary.merriam_webster_base_url,
        )));

        registry
    }

    fn register(&mut self, handler: Box<dyn SettingHandler>) {
        let key = handler.key();
        self.display_order.push(key);
        self.handlers.insert(key, handler);
    }

    /// Get a handler by key.
    pub fn get(&self, key: &str) -> Option<&dyn SettingHandler> {
        self.handlers.get(key).map(|h| h.as_ref())
    }

    /// Get all keys in display order.
    pub fn keys_display_order(&self) -> &[&'static str] {
        &self.display_order
    }
}

impl Default for SettingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{apply_set, apply_unset, SettingError};
    use super::*;
    use crate::core::config::Config;
    use tempfile::TempDir;

    #[test]
    fn every_key_is_registered_once() {
        let registry = SettingRegistry::new();
        let keys = registry.keys_display_order();
        assert_eq!(keys.len(), 8);
        for key in keys {
            assert_eq!(registry.get(key).map(|h| h.key()), Some(*key));
        }
    }

    #[test]
    fn set_and_unset_round_trip_through_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        let registry = SettingRegistry::new();

        apply_set(
            &registry,
            &config_path,
            "merriam-webster-api-key",
            &["abcd-1234".to_string()],
        )
        .expect("set failed");
        let loaded = Config::load_from_path(&config_path).expect("load failed");
        assert_eq!(
            loaded.dictionary.merriam_webster_api_key.as_deref(),
            Some("abcd-1234")
        );

        apply_unset(&registry, &config_path, "merriam-webster-api-key").expect("unset failed");
        let loaded = Config::load_from_path(&config_path).expect("load failed");
        assert_eq!(loaded.dictionary.merriam_webster_api_key, None);
    }

    #[test]
    fn invalid_value_is_not_saved() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        let registry = SettingRegistry::new();

        let err = apply_set(&registry, &config_path, "tier-timeout", &["never".to_string()])
            .expect_err("should reject");
        assert!(matches!(err, SettingError::InvalidValue { .. }));
        assert!(!config_path.exists());
    }

    #[test]
    fn unknown_key_is_reported() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let registry = SettingRegistry::new();
        assert_eq!(
            apply_unset(&registry, &temp_dir.path().join("c.toml"), "theme"),
            Err(SettingError::UnknownKey("theme".to_string()))
        );
    }
}
