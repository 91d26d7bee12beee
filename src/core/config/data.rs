use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::plugins::dictionary::{
    DictionarySettings, DEFAULT_FREE_DICTIONARY_BASE_URL, DEFAULT_MERRIAM_WEBSTER_BASE_URL,
};
use crate::plugins::weather::{
    WeatherSettings, DEFAULT_OPENWEATHER_BASE_URL, DEFAULT_WTTR_BASE_URL,
};

pub const DEFAULT_TIER_TIMEOUT_SECS: u64 = 5;

pub const OPENWEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const MERRIAM_WEBSTER_API_KEY_ENV: &str = "MERRIAM_WEBSTER_API_KEY";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: Option<String>,
    pub wttr_base_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct DictionaryConfig {
    pub free_dictionary_base_url: Option<String>,
    pub merriam_webster_api_key: Option<String>,
    pub merriam_webster_base_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Transcript location; the platform data directory when unset
    pub history_file: Option<PathBuf>,
    /// Deadline for each live provider request, in seconds
    pub tier_timeout_secs: Option<u64>,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

/// A configured value wins; blank strings count as unset.
fn configured_or_env(
    configured: Option<&String>,
    env_key: &str,
    env: &dyn Fn(&str) -> Option<String>,
) -> Option<String> {
    configured
        .filter(|value| !value.trim().is_empty())
        .cloned()
        .or_else(|| env(env_key).filter(|value| !value.trim().is_empty()))
}

impl Config {
    pub fn tier_timeout(&self) -> Duration {
        Duration::from_secs(
            self.tier_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIER_TIMEOUT_SECS),
        )
    }

    pub fn weather_settings(&self) -> WeatherSettings {
        self.weather_settings_with_env(&|key| std::env::var(key).ok())
    }

    pub fn dictionary_settings(&self) -> DictionarySettings {
        self.dictionary_settings_with_env(&|key| std::env::var(key).ok())
    }

    pub(crate) fn weather_settings_with_env(
        &self,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> WeatherSettings {
        WeatherSettings {
            openweather_api_key: configured_or_env(
                self.weather.openweather_api_key.as_ref(),
                OPENWEATHER_API_KEY_ENV,
                env,
            ),
            openweather_base_url: self
                .weather
                .openweather_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENWEATHER_BASE_URL.to_string()),
            wttr_base_url: self
                .weather
                .wttr_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_WTTR_BASE_URL.to_string()),
        }
    }

    pub(crate) fn dictionary_settings_with_env(
        &self,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> DictionarySettings {
        DictionarySettings {
            free_dictionary_base_url: self
                .dictionary
                .free_dictionary_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_FREE_DICTIONARY_BASE_URL.to_string()),
            merriam_webster_api_key: configured_or_env(
                self.dictionary.merriam_webster_api_key.as_ref(),
                MERRIAM_WEBSTER_API_KEY_ENV,
                env,
            ),
            merriam_webster_base_url: self
                .dictionary
                .merriam_webster_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_MERRIAM_WEBSTER_BASE_URL.to_string()),
        }
    }
}
