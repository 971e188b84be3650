//! Error handling for the esrun CLI.
//!
//! Library errors convert into [`CliError`] through `#[from]`, and
//! [`cli_error_to_miette`] turns the final error into a report with a hint
//! where one helps.

use std::path::PathBuf;

use esrun_runner::{BundlerError, PresetError, ResolveError, RunnerError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Runner rejected the call or the bundler failed underneath it
    #[error(transparent)]
    Runner(#[from] RunnerError),

    /// esbuild could not be located or started
    #[error(transparent)]
    Bundler(#[from] BundlerError),

    /// A preset's base configuration could not be assembled
    #[error(transparent)]
    Preset(#[from] PresetError),

    /// Override file or environment could not be read
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        CliError::Config(Box::new(err))
    }
}

/// Convert a CLI error into a miette report.
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    match err {
        CliError::Runner(err @ RunnerError::MissingRequiredOverride { .. }) => miette::miette!(
            "{}\n\nHint: pass entry points as arguments, e.g. `esrun build --preset electron src/main.ts`",
            err
        ),
        CliError::Runner(RunnerError::Bundler(e)) | CliError::Bundler(e) => {
            bundler_error_to_miette(e)
        }
        CliError::Preset(e) => preset_error_to_miette(e),
        CliError::ConfigNotFound(path) => miette::miette!(
            "Config file not found: {}\n\nHint: create esrun.config.json or pass --config <path>",
            path.display()
        ),
        _ => miette::miette!("{}", err),
    }
}

fn preset_error_to_miette(err: PresetError) -> miette::Report {
    match &err {
        PresetError::Resolve(ResolveError::NotFound { specifier, .. })
            if specifier.starts_with("preact") =>
        {
            miette::miette!(
                "{}\n\nHint: install preact in the project (`npm install preact`)",
                err
            )
        }
        PresetError::WriteShim { .. } => miette::miette!(
            "{}\n\nHint: make sure the project's node_modules directory is writable",
            err
        ),
        _ => miette::miette!("{}", err),
    }
}

fn bundler_error_to_miette(err: BundlerError) -> miette::Report {
    match err {
        BundlerError::BinaryNotFound { searched_from } => miette::miette!(
            "esbuild executable not found (searched from {})\n\nHint: run `npm install esbuild` or set ESBUILD_BINARY_PATH",
            searched_from.display()
        ),
        BundlerError::UnsupportedPlugin { name } => miette::miette!(
            "plugin '{}' cannot be passed to the esbuild command line\n\nHint: only the alias plugin is supported by esrun",
            name
        ),
        _ => miette::miette!("{}", err),
    }
}
