//! [`Bundler`] backed by the esbuild executable.

mod args;
mod binary;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use esrun_config::BuildOptions;
use tokio::process::Command;
use tracing::{debug, info};

use crate::bundler::{BuildOutcome, Bundler, ServeOptions, ServeOutcome, ServerHandle};
use crate::error::{BundlerError, BundlerResult};

pub use args::cli_args;
pub use binary::{BINARY_PATH_ENV, find_in_node_modules, locate};

/// Runs esbuild as a child process in a project directory.
#[derive(Debug, Clone)]
pub struct EsbuildCli {
    binary: PathBuf,
    cwd: PathBuf,
}

impl EsbuildCli {
    pub fn new(binary: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            cwd: cwd.into(),
        }
    }

    /// Locate esbuild for the project at `cwd` (see [`locate`]).
    pub fn discover(cwd: impl Into<PathBuf>) -> BundlerResult<Self> {
        let cwd = cwd.into();
        let binary = locate(&cwd)?;
        Ok(Self { binary, cwd })
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    fn command(&self, args: &[String]) -> Command {
        let mut command = Command::new(&self.binary);
        command.args(args).current_dir(&self.cwd);
        command
    }

    fn spawn_error(&self, source: std::io::Error) -> BundlerError {
        BundlerError::Spawn {
            binary: self.binary.clone(),
            source,
        }
    }
}

#[async_trait]
impl Bundler for EsbuildCli {
    async fn build(&self, options: BuildOptions) -> BundlerResult<BuildOutcome> {
        let args = cli_args(&options)?;
        info!(
            entries = options.entry_points.as_ref().map_or(0, Vec::len),
            "running esbuild"
        );
        debug!(?args, "esbuild arguments");

        let start = Instant::now();
        let output = self
            .command(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(BundlerError::BuildFailed {
                status: output.status.code(),
                stderr,
            });
        }

        let outcome = BuildOutcome {
            warnings: parse_warnings(&stderr),
            elapsed: start.elapsed(),
        };
        info!(
            warnings = outcome.warnings.len(),
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "esbuild finished"
        );
        Ok(outcome)
    }

    async fn serve(
        &self,
        serve: ServeOptions,
        options: BuildOptions,
    ) -> BundlerResult<ServeOutcome> {
        let mut args = cli_args(&options)?;
        args.push(format!("--serve={serve}"));
        debug!(?args, "esbuild arguments");

        let child = self
            .command(&args)
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;
        info!(address = %serve, pid = child.id(), "esbuild serving");

        Ok(ServeOutcome {
            host: serve.host,
            port: serve.port,
            handle: ServerHandle::from_child(child),
        })
    }
}

/// Warning headlines from esbuild's stderr (`▲ [WARNING] ...`).
fn parse_warnings(stderr: &str) -> Vec<String> {
    stderr
        .lines()
        .filter_map(|line| line.split_once("[WARNING]"))
        .map(|(_, message)| message.trim().to_string())
        .collect()
}
