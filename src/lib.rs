//! Plugchat is a terminal chat assistant that hands recognizable requests to
//! built-in skills.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`plugins`] defines the skill contract, the weather, calculator and
//!   dictionary skills with their provider cascades, the registry that routes
//!   input to them, and the engine that normalizes their outcomes.
//! - [`core`] owns the transcript: messages, the persisted history store,
//!   the single-slot dispatcher, and configuration.
//! - [`transport`] is the HTTP seam the live providers fetch through.
//! - [`render`] turns transcript entries into plain text lines.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod cli;
pub mod core;
pub mod logging;
pub mod plugins;
pub mod render;
pub mod transport;
