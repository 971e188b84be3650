//! Command implementations.
//!
//! - [`build`] - one-shot build through a preset
//! - [`serve`] - dev server through a preset

pub mod build;
pub mod serve;

pub use build::execute as build_execute;
pub use serve::execute as serve_execute;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use esrun_runner::{Bundler, EsbuildCli, ModuleResolver};

use crate::error::{CliError, Result};

/// Project directory: `--cwd` (relative to the current directory) or the
/// current directory itself.
pub(crate) fn project_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    let dir = match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => current.join(path),
        None => current,
    };

    if !dir.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "project directory does not exist: {}",
            dir.display()
        )));
    }
    Ok(dir)
}

/// esbuild and a resolver for the project at `cwd`.
pub(crate) fn backend(cwd: &Path) -> Result<(Arc<dyn Bundler>, ModuleResolver)> {
    let esbuild = EsbuildCli::discover(cwd)?;
    tracing::debug!(binary = %esbuild.binary().display(), "esbuild located");
    Ok((Arc::new(esbuild), ModuleResolver::new(cwd)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_project_dir_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = project_dir(Some(dir.path().join("missing").as_path())).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn absolute_project_dir_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(project_dir(Some(dir.path())).unwrap(), dir.path());
    }
}
