//! Locating the esbuild executable.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BundlerError, BundlerResult};

/// Environment variable esbuild itself honors for a custom binary location.
pub const BINARY_PATH_ENV: &str = "ESBUILD_BINARY_PATH";

#[cfg(windows)]
const BINARY_NAME: &str = "esbuild.exe";
#[cfg(not(windows))]
const BINARY_NAME: &str = "esbuild";

/// Find the esbuild binary for a project rooted at `cwd`.
///
/// Search order: `ESBUILD_BINARY_PATH`, the nearest
/// `node_modules/.bin/esbuild` at or above `cwd`, then `PATH`.
pub fn locate(cwd: &Path) -> BundlerResult<PathBuf> {
    if let Some(explicit) = env::var_os(BINARY_PATH_ENV).filter(|v| !v.is_empty()) {
        let path = PathBuf::from(explicit);
        debug!(path = %path.display(), "using esbuild from {BINARY_PATH_ENV}");
        return Ok(path);
    }

    if let Some(path) = find_in_node_modules(cwd) {
        debug!(path = %path.display(), "using project esbuild");
        return Ok(path);
    }

    if let Some(path) = find_on_path() {
        debug!(path = %path.display(), "using esbuild from PATH");
        return Ok(path);
    }

    Err(BundlerError::BinaryNotFound {
        searched_from: cwd.to_path_buf(),
    })
}

/// Nearest `node_modules/.bin/esbuild` walking up from `start`.
pub fn find_in_node_modules(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join("node_modules").join(".bin").join(BINARY_NAME))
        .find(|candidate| candidate.is_file())
}

fn find_on_path() -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(BINARY_NAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_binary_in_ancestor_node_modules() {
        let root = tempfile::tempdir().unwrap();
        let bin_dir = root.path().join("node_modules").join(".bin");
        fs::create_dir_all(&bin_dir).unwrap();
        fs::write(bin_dir.join(BINARY_NAME), "").unwrap();

        let nested = root.path().join("packages").join("app");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_in_node_modules(&nested),
            Some(bin_dir.join(BINARY_NAME))
        );
    }

    #[test]
    fn nearest_node_modules_wins() {
        let root = tempfile::tempdir().unwrap();
        let app = root.path().join("app");
        for dir in [root.path(), app.as_path()] {
            let bin_dir = dir.join("node_modules").join(".bin");
            fs::create_dir_all(&bin_dir).unwrap();
            fs::write(bin_dir.join(BINARY_NAME), "").unwrap();
        }

        assert_eq!(
            find_in_node_modules(&app),
            Some(app.join("node_modules").join(".bin").join(BINARY_NAME))
        );
    }
}
