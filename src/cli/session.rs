//! Builds the runtime pieces shared by every command that talks to skills.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::core::config::Config;
use crate::core::dispatch::Dispatcher;
use crate::core::history::MessageStore;
use crate::plugins::registry::Registry;
use crate::plugins::PluginContext;
use crate::transport::{HttpFetch, OfflineFetcher, ReqwestFetcher};

pub struct SessionOptions {
    pub config_path: Option<PathBuf>,
    pub offline: bool,
    pub no_history: bool,
}

pub struct Session {
    pub dispatcher: Dispatcher,
    /// The file backing the transcript; `None` when it lives in memory.
    pub history_path: Option<PathBuf>,
}

/// Resolves `--config`, falling back to the platform default.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf, Box<dyn Error>> {
    explicit
        .or_else(Config::default_config_path)
        .ok_or_else(|| "Could not determine a config directory; pass --config <path>".into())
}

pub fn load_config(explicit: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = resolve_config_path(explicit)?;
    let config = Config::load_from_path(&path)?;
    debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

impl Session {
    pub fn start(options: SessionOptions) -> Result<Self, Box<dyn Error>> {
        let config = load_config(options.config_path)?;
        let tier_timeout = config.tier_timeout();

        let fetcher: Arc<dyn HttpFetch> = if options.offline {
            info!("offline mode, live providers disabled");
            Arc::new(OfflineFetcher)
        } else {
            Arc::new(ReqwestFetcher::with_connect_timeout(tier_timeout)?)
        };

        let registry = Registry::builtin(
            PluginContext::new(fetcher, tier_timeout),
            config.weather_settings(),
            config.dictionary_settings(),
        );

        let store = if options.no_history {
            MessageStore::in_memory()
        } else {
            match config.history_path() {
                Some(path) => MessageStore::open(path),
                None => MessageStore::in_memory(),
            }
        };

        let history_path = store.path().map(|path| path.to_path_buf());
        let dispatcher = Dispatcher::new(Arc::new(registry), Arc::new(Mutex::new(store)));
        Ok(Self {
            dispatcher,
            history_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(config_path: PathBuf, no_history: bool) -> SessionOptions {
        SessionOptions {
            config_path: Some(config_path),
            offline: true,
            no_history,
        }
    }

    #[test]
    fn history_path_comes_from_config() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        let history = temp_dir.path().join("chat.json");
        Config {
            history_file: Some(history.clone()),
            ..Config::default()
        }
        .save_to_path(&config_path)
        .expect("save failed");

        let session = Session::start(options(config_path.clone(), false)).expect("start failed");
        assert_eq!(session.history_path, Some(history));

        let session = Session::start(options(config_path, true)).expect("start failed");
        assert_eq!(session.history_path, None);
    }
}
