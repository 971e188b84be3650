//! The bundler seam runners delegate to.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use esrun_config::BuildOptions;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr};
use tokio::task::JoinHandle;

use crate::error::{BundlerError, BundlerResult};

/// Host every dev server listens on.
pub const DEV_SERVER_HOST: &str = "localhost";

/// Port every dev server listens on.
pub const DEV_SERVER_PORT: u16 = 6969;

/// Listen address handed to [`Bundler::serve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            host: DEV_SERVER_HOST.to_string(),
            port: DEV_SERVER_PORT,
        }
    }
}

impl fmt::Display for ServeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Result of a finished build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOutcome {
    /// Warnings the bundler reported while still succeeding
    pub warnings: Vec<String>,
    pub elapsed: Duration,
}

/// A running dev server.
#[derive(Debug)]
pub struct ServeOutcome {
    pub host: String,
    pub port: u16,
    pub handle: ServerHandle,
}

impl ServeOutcome {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Lines of server stderr kept for the exit error.
const STDERR_TAIL_LINES: usize = 20;

/// Owns the server process, if the bundler runs one.
///
/// Dropping the handle kills the process. When the child's stderr is piped,
/// it is echoed to this process's stderr and the last lines are kept so an
/// unexpected exit can report them.
#[derive(Debug)]
pub struct ServerHandle {
    child: Option<Child>,
    stderr_tail: Option<JoinHandle<String>>,
}

impl ServerHandle {
    /// A handle with no process behind it (in-process or test bundlers).
    pub fn detached() -> Self {
        Self {
            child: None,
            stderr_tail: None,
        }
    }

    /// Must be called inside a tokio runtime when the child's stderr is piped.
    pub fn from_child(mut child: Child) -> Self {
        let stderr_tail = child.stderr.take().map(|stderr| tokio::spawn(echo_stderr(stderr)));
        Self {
            child: Some(child),
            stderr_tail,
        }
    }

    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().and_then(Child::id)
    }

    /// Wait for the server to exit on its own.
    ///
    /// A detached handle never exits, so this only returns for a real process.
    pub async fn wait(&mut self) -> BundlerResult<()> {
        let Some(child) = self.child.as_mut() else {
            return std::future::pending().await;
        };

        let status = child.wait().await?;
        if status.success() {
            return Ok(());
        }

        let stderr = match self.stderr_tail.take() {
            Some(task) => task.await.unwrap_or_default(),
            None => String::new(),
        };
        Err(BundlerError::ServerExited {
            status: status.code(),
            stderr,
        })
    }

    /// Kill the server and reap it.
    pub async fn stop(mut self) -> BundlerResult<()> {
        if let Some(mut child) = self.child.take() {
            child.kill().await?;
        }
        if let Some(task) = self.stderr_tail.take() {
            task.abort();
        }
        Ok(())
    }
}

async fn echo_stderr(stderr: ChildStderr) -> String {
    let mut lines = BufReader::new(stderr).lines();
    let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);

    while let Ok(Some(line)) = lines.next_line().await {
        eprintln!("{line}");
        if tail.len() == STDERR_TAIL_LINES {
            tail.pop_front();
        }
        tail.push_back(line);
    }

    Vec::from(tail).join("\n")
}

/// The external bundler.
///
/// Implementations own every side effect: reading sources, writing output,
/// listening on the network. Errors are returned as-is to the runner's caller.
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn build(&self, options: BuildOptions) -> BundlerResult<BuildOutcome>;

    async fn serve(&self, serve: ServeOptions, options: BuildOptions)
    -> BundlerResult<ServeOutcome>;
}
