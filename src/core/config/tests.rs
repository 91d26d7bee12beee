use super::data::{
    Config, DictionaryConfig, WeatherConfig, MERRIAM_WEBSTER_API_KEY_ENV, OPENWEATHER_API_KEY_ENV,
};
use super::io::ConfigError;
use super::printing::mask_secret;
use crate::plugins::dictionary::DEFAULT_FREE_DICTIONARY_BASE_URL;
use crate::plugins::weather::DEFAULT_WTTR_BASE_URL;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config {
        history_file: Some(PathBuf::from("/tmp/plugchat-history.json")),
        tier_timeout_secs: Some(9),
        weather: WeatherConfig {
            openweather_api_key: Some("owm-key".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    config
        .save_to_path(&config_path)
        .expect("Failed to save config");
    let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded, config);

    let value = Config::mutate_at(&config_path, |config| {
        config.weather.openweather_api_key = None;
        config.dictionary.merriam_webster_api_key = Some("mw-key".to_string());
        Ok(42)
    })
    .expect("Failed to mutate config");
    assert_eq!(value, 42);

    let reloaded = Config::load_from_path(&config_path).expect("Failed to reload config");
    assert_eq!(reloaded.weather.openweather_api_key, None);
    assert_eq!(
        reloaded.dictionary.merriam_webster_api_key.as_deref(),
        Some("mw-key")
    );
    assert_eq!(reloaded.tier_timeout_secs, Some(9));
}

#[test]
fn failed_mutation_leaves_file_untouched() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");

    let result: Result<(), _> = Config::mutate_at(&config_path, |config| {
        config.tier_timeout_secs = Some(1);
        Err("rejected".into())
    });
    assert!(result.is_err());
    assert!(!config_path.exists());
}

#[test]
fn test_invalid_toml_reports_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "tier_timeout_secs = \"soon\"").expect("write failed");

    let err = Config::load_from_path(&config_path).expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_sections_parse_from_toml() {
    let config: Config = toml::from_str(
        r#"
        tier_timeout_secs = 3

        [weather]
        wttr_base_url = "http://localhost:9000"

        [dictionary]
        merriam_webster_api_key = "abc"
        "#,
    )
    .expect("parse failed");

    assert_eq!(config.tier_timeout(), Duration::from_secs(3));
    assert_eq!(
        config.weather.wttr_base_url.as_deref(),
        Some("http://localhost:9000")
    );
    assert_eq!(
        config.dictionary,
        DictionaryConfig {
            merriam_webster_api_key: Some("abc".to_string()),
            ..Default::default()
        }
    );
}

#[test]
fn test_tier_timeout_defaults_and_rejects_zero() {
    assert_eq!(Config::default().tier_timeout(), Duration::from_secs(5));
    let zero = Config {
        tier_timeout_secs: Some(0),
        ..Default::default()
    };
    assert_eq!(zero.tier_timeout(), Duration::from_secs(5));
}

#[test]
fn test_settings_fall_back_to_defaults() {
    let config = Config::default();

    let weather = config.weather_settings_with_env(&no_env);
    assert_eq!(weather.openweather_api_key, None);
    assert_eq!(weather.wttr_base_url, DEFAULT_WTTR_BASE_URL);

    let dictionary = config.dictionary_settings_with_env(&no_env);
    assert_eq!(dictionary.merriam_webster_api_key, None);
    assert_eq!(
        dictionary.free_dictionary_base_url,
        DEFAULT_FREE_DICTIONARY_BASE_URL
    );
}

#[test]
fn test_api_keys_fall_back_to_environment() {
    let env = |key: &str| match key {
        OPENWEATHER_API_KEY_ENV => Some("env-owm".to_string()),
        MERRIAM_WEBSTER_API_KEY_ENV => Some("env-mw".to_string()),
        _ => None,
    };

    let config = Config {
        weather: WeatherConfig {
            openweather_api_key: Some("  ".to_string()),
            ..Default::default()
        },
        dictionary: DictionaryConfig {
            merriam_webster_api_key: Some("file-mw".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };

    assert_eq!(
        config.weather_settings_with_env(&env).openweather_api_key.as_deref(),
        Some("env-owm"),
        "blank configured key defers to the environment"
    );
    assert_eq!(
        config
            .dictionary_settings_with_env(&env)
            .merriam_webster_api_key
            .as_deref(),
        Some("file-mw"),
        "configured key wins over the environment"
    );
}

#[test]
fn test_history_path_prefers_configured_file() {
    let config = Config {
        history_file: Some(PathBuf::from("/var/tmp/chat.json")),
        ..Default::default()
    };
    assert_eq!(config.history_path(), Some(PathBuf::from("/var/tmp/chat.json")));
}

#[test]
fn test_mask_secret() {
    assert_eq!(mask_secret("abc"), "****");
    assert_eq!(mask_secret("abcdef123"), "****f123");
}
