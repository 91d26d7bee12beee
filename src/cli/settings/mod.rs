//! Settings management for CLI set/unset commands.
//!
//! Each configuration key has a [`SettingHandler`] that validates input and
//! applies it to a [`Config`]. Loading and saving the file is left to the
//! caller so handlers stay pure.

pub mod error;
pub mod handlers;
pub mod registry;

pub use error::SettingError;
pub use registry::SettingRegistry;

use std::path::Path;

use crate::core::config::data::Config;

/// Trait for handling a configuration setting.
pub trait SettingHandler: Send + Sync {
    /// Returns the configuration key this handler manages.
    fn key(&self) -> &'static str;

    /// Set the configuration value from the words following the key.
    ///
    /// Returns a success message to display.
    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError>;

    /// Unset (clear) the configuration value.
    fn unset(&self, config: &mut Config) -> String;
}

/// Loads the config at `config_path`, applies `key`'s setter and saves it.
pub fn apply_set(
    registry: &SettingRegistry,
    config_path: &Path,
    key: &str,
    args: &[String],
) -> Result<String, SettingError> {
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;

    let mut config = Config::load_from_path(config_path)
        .map_err(|err| SettingError::ConfigError(err.to_string()))?;
    let message = handler.set(args, &mut config)?;
    config
        .save_to_path(config_path)
        .map_err(|err| SettingError::ConfigError(err.to_string()))?;
    Ok(message)
}

pub fn apply_unset(
    registry: &SettingRegistry,
    config_path: &Path,
    key: &str,
) -> Result<String, SettingError> {
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;

    Config::mutate_at(config_path, |config| Ok(handler.unset(config)))
        .map_err(|err| SettingError::ConfigError(err.to_string()))
}
