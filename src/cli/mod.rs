//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod chat;
pub mod say;
pub mod session;
pub mod settings;

#[cfg(test)]
mod tests;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::chat::run_chat;
use crate::cli::say::run_say;
use crate::cli::session::{load_config, resolve_config_path, Session, SessionOptions};
use crate::cli::settings::{apply_set, apply_unset, SettingRegistry};
use crate::logging;
use crate::render::render_skills;

#[derive(Parser)]
#[command(name = "plugchat")]
#[command(about = "A terminal chat assistant with weather, calculator and dictionary skills")]
#[command(
    long_about = "Plugchat routes each chat message to a built-in skill when one recognizes it, \
and answers conversationally otherwise. Live providers are tried first; when they fail the \
weather and dictionary skills fall back to offline data.\n\n\
Skills:\n\
  /weather <city>   Current conditions (also: \"weather in Paris\")\n\
  /calc <expr>      Arithmetic and math functions (also: \"calculate 2+2\")\n\
  /define <word>    Dictionary lookup (also: \"what does serendipity mean\")\n\n\
Environment Variables (fallback if not configured):\n\
  OPENWEATHER_API_KEY       Enables the OpenWeatherMap provider\n\
  MERRIAM_WEBSTER_API_KEY   Enables the Merriam-Webster provider\n\
  RUST_LOG                  Log filter (default: plugchat=warn)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file to use instead of the platform default
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip live providers and answer from offline data only
    #[arg(long, global = true)]
    pub offline: bool,

    /// Keep this session's messages in memory only
    #[arg(long, global = true)]
    pub no_history: bool,

    /// Write logs to the specified file instead of stderr
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive chat (default)
    Chat,
    /// Send a single message and print the reply
    Say {
        /// Message text (can be multiple words)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// List the available skills
    Skills,
    /// Delete the saved chat history
    Clear,
    /// Set configuration values, or show them all when no key is given
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

impl Args {
    /// `skills` and `clear` never fetch. `clear` always opens the history
    /// file, since clearing an in-memory store would leave the file intact.
    fn session_options(&self) -> SessionOptions {
        let command = self.command.as_ref();
        SessionOptions {
            config_path: self.config.clone(),
            offline: self.offline || matches!(command, Some(Commands::Skills | Commands::Clear)),
            no_history: match command {
                Some(Commands::Clear) => false,
                Some(Commands::Skills) => true,
                _ => self.no_history,
            },
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.log.as_deref())?;

    let options = args.session_options();
    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let session = Session::start(options)?;
            run_chat(&session.dispatcher).await
        }
        Commands::Say { text } => {
            let session = Session::start(options)?;
            run_say(&session.dispatcher, text).await
        }
        Commands::Skills => {
            let session = Session::start(options)?;
            for line in render_skills(session.dispatcher.registry()) {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Clear => {
            let session = Session::start(options)?;
            session.dispatcher.clear().await;
            match session.history_path {
                Some(path) => println!("✅ Chat history cleared ({})", path.display()),
                None => println!("⚠️  No history file location is available; nothing to clear"),
            }
            Ok(())
        }
        Commands::Set { key: None, .. } => {
            load_config(args.config)?.print_all();
            Ok(())
        }
        Commands::Set {
            key: Some(key),
            value,
        } => {
            let path = resolve_config_path(args.config)?;
            match apply_set(&SettingRegistry::new(), &path, &key, &value) {
                Ok(message) => {
                    println!("{message}");
                    Ok(())
                }
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
        }
        Commands::Unset { key } => {
            let path = resolve_config_path(args.config)?;
            match apply_unset(&SettingRegistry::new(), &path, &key) {
                Ok(message) => {
                    println!("{message}");
                    Ok(())
                }
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
        }
    }
}
