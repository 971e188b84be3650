//! Error types for runners, bundler backends and module resolution.

use std::path::PathBuf;

use esrun_config::BuildOptionKey;
use thiserror::Error;

pub type BundlerResult<T> = std::result::Result<T, BundlerError>;

pub type RunnerResult<T> = std::result::Result<T, RunnerError>;

/// Failures reported by a [`Bundler`](crate::Bundler) implementation.
#[derive(Debug, Error)]
pub enum BundlerError {
    #[error("esbuild executable not found (searched from {})", .searched_from.display())]
    BinaryNotFound { searched_from: PathBuf },

    #[error("failed to start {}: {source}", .binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("build failed{}:\n{stderr}", .status.map(|code| format!(" with exit code {code}")).unwrap_or_default())]
    BuildFailed { status: Option<i32>, stderr: String },

    #[error("dev server exited{}:\n{stderr}", .status.map(|code| format!(" with exit code {code}")).unwrap_or_default())]
    ServerExited { status: Option<i32>, stderr: String },

    #[error("plugin '{name}' cannot be passed to the esbuild command line")]
    UnsupportedPlugin { name: String },

    #[error("option '{name}' cannot be passed to the esbuild command line: {reason}")]
    UnsupportedOption { name: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to resolve a module specifier to a file.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot resolve '{specifier}' from {}: {reason}", .base.display())]
    NotFound {
        specifier: String,
        base: PathBuf,
        reason: String,
    },

    #[error("resolver task failed: {0}")]
    Join(String),
}

/// Errors returned from running a [`BuildRunner`](crate::BuildRunner) or
/// [`DevServer`](crate::DevServer).
#[derive(Debug, Error)]
pub enum RunnerError {
    /// One or more required override keys were absent; nothing was delegated.
    #[error(
        "This build runner must be called with an override config containing the following fields: {}",
        join_keys(.missing)
    )]
    MissingRequiredOverride { missing: Vec<BuildOptionKey> },

    #[error(transparent)]
    Bundler(#[from] BundlerError),
}

/// Failure to assemble a preset's base configuration.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("cannot write the Preact shim to {}: {source}", .path.display())]
    WriteShim {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn join_keys(keys: &[BuildOptionKey]) -> String {
    keys.iter()
        .map(BuildOptionKey::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
