use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "plugchat=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Diagnostics go to stderr, or are appended
/// to `log_file` when one is given, so stdout stays reserved for chat output.
pub fn init(log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let installed = |result: Result<(), Box<dyn std::error::Error + Send + Sync>>| {
        result.map_err(|err| -> Box<dyn std::error::Error> { err })
    };
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());

    match log_file {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            installed(
                builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init(),
            )?;
        }
        None => {
            installed(builder.with_writer(std::io::stderr).try_init())?;
        }
    }

    Ok(())
}
