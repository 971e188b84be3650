//! esrun CLI - run esbuild through the Electron and Preact presets.
//!
//! - [`cli`] - clap argument definitions
//! - [`config`] - layering of config file, environment and flags into an override
//! - [`commands`] - `build` and `serve`
//! - [`error`] - CLI errors and their miette rendering
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines on stderr

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
