//! Setting handlers, one per configuration key.

use std::path::PathBuf;

use super::{SettingError, SettingHandler};
use crate::core::config::data::{path_display, Config};
use crate::core::config::printing::mask_secret;

type Slot = fn(&mut Config) -> &mut Option<String>;

fn success_set(key: &str, value: &str) -> String {
    format!("✅ Set {key} to: {value}")
}

fn success_unset(key: &str) -> String {
    format!("✅ Unset {key}")
}

/// Free-form single-word value stored in an optional string field.
pub struct TextSetting {
    key: &'static str,
    example: &'static str,
    slot: Slot,
    secret: bool,
    url: bool,
}

impl TextSetting {
    pub const fn api_key(key: &'static str, example: &'static str, slot: Slot) -> Self {
        Self {
            key,
            example,
            slot,
            secret: true,
            url: false,
        }
    }

    pub const fn base_url(key: &'static str, example: &'static str, slot: Slot) -> Self {
        Self {
            key,
            example,
            slot,
            secret: false,
            url: true,
        }
    }
}

impl SettingHandler for TextSetting {
    fn key(&self) -> &'static str {
        self.key
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let value = args.join(" ").trim().to_string();
        if value.is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "Provide a value for this setting:",
                example: self.example,
            });
        }
        if self.url && !(value.starts_with("http://") || value.starts_with("https://")) {
            return Err(SettingError::InvalidValue {
                key: self.key,
                input: value,
                expected: "an http:// or https:// URL",
            });
        }

        let display = if self.secret {
            mask_secret(&value)
        } else {
            value.clone()
        };
        *(self.slot)(config) = Some(value);
        Ok(success_set(self.key, &display))
    }

    fn unset(&self, config: &mut Config) -> String {
        *(self.slot)(config) = None;
        success_unset(self.key)
    }
}

/// Handler for the `tier-timeout` setting, in whole seconds.
pub struct TierTimeoutHandler;

impl SettingHandler for TierTimeoutHandler {
    fn key(&self) -> &'static str {
        "tier-timeout"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(raw) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To set the provider timeout, give a number of seconds:",
                example: "plugchat set tier-timeout 8",
            });
        };
        let secs = raw
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| SettingError::InvalidValue {
                key: "tier-timeout",
                input: raw.clone(),
                expected: "a whole number of seconds greater than zero",
            })?;

        config.tier_timeout_secs = Some(secs);
        Ok(success_set(self.key(), &format!("{secs}s")))
    }

    fn unset(&self, config: &mut Config) -> String {
        config.tier_timeout_secs = None;
        format!(
            "✅ Unset tier-timeout (will use default: {}s)",
            Config::default().tier_timeout().as_secs()
        )
    }
}

/// Handler for the `history-file` setting.
pub struct HistoryFileHandler;

impl SettingHandler for HistoryFileHandler {
    fn key(&self) -> &'static str {
        "history-file"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let value = args.join(" ");
        if value.trim().is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "To move the chat history, give a file path:",
                example: "plugchat set history-file ~/notes/chat.json",
            });
        }

        let path = PathBuf::from(value.trim());
        let message = success_set(self.key(), &path_display(&path));
        config.history_file = Some(path);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> String {
        config.history_file = None;
        "✅ Unset history-file (will use the platform data directory)".to_string()
    }
}
