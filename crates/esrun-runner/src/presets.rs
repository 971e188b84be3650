//! Ready-made runners for Electron and Preact projects.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use esrun_config::{BuildOptionKey, BuildOptions, Format, Platform, PluginDescriptor};
use indexmap::IndexMap;
use tracing::debug;

use crate::bundler::Bundler;
use crate::error::{PresetError, ResolveError};
use crate::resolve::ModuleResolver;
use crate::runner::{BuildRunner, DevServer};

/// Shim that provides Preact's `h` and `Fragment` to JSX output.
pub const PREACT_SHIM_SOURCE: &str = include_str!("../shims/preact-shim.js");

/// Where the shim is written, relative to the project directory.
///
/// It has to live inside the project so that its `preact` import resolves to
/// the project's own copy.
pub const PREACT_SHIM_PATH: &str = "node_modules/.cache/esrun/preact-shim.js";

/// Defaults for an Electron main/preload bundle.
///
/// Leaves `entryPoints` unset. Electron apps usually have a main script and a
/// preload script, and their paths differ between projects.
pub fn electron_base_config() -> BuildOptions {
    BuildOptions {
        bundle: Some(true),
        external: Some(vec!["electron".to_string()]),
        format: Some(Format::Esm),
        minify: Some(true),
        outdir: Some(PathBuf::from("dist/electron")),
        platform: Some(Platform::Node),
        target: Some(vec!["node16".to_string()]),
        ..Default::default()
    }
}

/// Build runner for Electron. Every call must set `entryPoints`.
pub fn electron_build_runner(bundler: Arc<dyn Bundler>) -> BuildRunner {
    BuildRunner::new(bundler, electron_base_config())
        .with_required_overrides([BuildOptionKey::EntryPoints])
}

/// Dev server for Electron. Every call must set `entryPoints`.
pub fn electron_dev_server(bundler: Arc<dyn Bundler>) -> DevServer {
    DevServer::new(bundler, electron_base_config())
        .with_required_overrides([BuildOptionKey::EntryPoints])
}

/// Import redirects that let React code run on `preact/compat`.
pub async fn preact_aliases(
    resolver: &ModuleResolver,
) -> Result<IndexMap<String, PathBuf>, ResolveError> {
    let (compat, test_utils) = tokio::try_join!(
        resolver.resolve_to_absolute("preact/compat"),
        resolver.resolve_to_absolute("preact/test-utils"),
    )?;

    Ok(IndexMap::from([
        ("react".to_string(), compat.clone()),
        ("react-dom".to_string(), compat),
        ("react-dom/test-utils".to_string(), test_utils),
    ]))
}

/// Write the Preact shim into `project` and return its absolute path.
///
/// An up-to-date shim is left alone so its modification time stays put.
pub async fn write_preact_shim(project: &Path) -> Result<PathBuf, PresetError> {
    let path = project.join(PREACT_SHIM_PATH);
    if tokio::fs::read_to_string(&path).await.ok().as_deref() == Some(PREACT_SHIM_SOURCE) {
        return Ok(path);
    }

    let write_error = |source| PresetError::WriteShim {
        path: path.clone(),
        source,
    };

    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await.map_err(write_error)?;
    }
    tokio::fs::write(&path, PREACT_SHIM_SOURCE)
        .await
        .map_err(write_error)?;
    debug!(path = %path.display(), "wrote preact shim");
    Ok(path)
}

/// Defaults for a Preact app in the project at `resolver.base()`.
///
/// Every default may be overridden, e.g. `entryPoints` for projects that are
/// not TypeScript or `inject` when other shims are needed. Options such as
/// `minify` or `sourcemap` can be added per call.
pub async fn preact_base_config(resolver: &ModuleResolver) -> Result<BuildOptions, PresetError> {
    let aliases = preact_aliases(resolver).await?;
    let shim = write_preact_shim(resolver.base()).await?;

    Ok(BuildOptions {
        bundle: Some(true),
        define: Some(IndexMap::from([(
            "process.env.NODE_ENV".to_string(),
            "'production'".to_string(),
        )])),
        entry_points: Some(vec!["src/index.tsx".to_string()]),
        external: Some(vec!["react".to_string()]),
        format: Some(Format::Esm),
        inject: Some(vec![shim]),
        outdir: Some(PathBuf::from("dist")),
        plugins: Some(vec![PluginDescriptor::Alias { aliases }]),
        target: Some(vec!["esnext".to_string()]),
        ..Default::default()
    })
}

/// Build runner for Preact. No override keys are required.
pub async fn preact_build_runner(
    bundler: Arc<dyn Bundler>,
    resolver: &ModuleResolver,
) -> Result<BuildRunner, PresetError> {
    Ok(BuildRunner::new(bundler, preact_base_config(resolver).await?))
}

/// Dev server for Preact. No override keys are required.
pub async fn preact_dev_server(
    bundler: Arc<dyn Bundler>,
    resolver: &ModuleResolver,
) -> Result<DevServer, PresetError> {
    Ok(DevServer::new(bundler, preact_base_config(resolver).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn electron_base_has_no_entry_points() {
        let base = electron_base_config();
        assert!(!base.has(&BuildOptionKey::EntryPoints));
        assert_eq!(base.platform, Some(Platform::Node));
        assert_eq!(base.external, Some(vec!["electron".to_string()]));
    }

    #[tokio::test]
    async fn shim_is_written_into_the_project() {
        let project = tempfile::tempdir().unwrap();

        let path = write_preact_shim(project.path()).await.unwrap();
        assert_eq!(path, project.path().join(PREACT_SHIM_PATH));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), PREACT_SHIM_SOURCE);

        // a second write keeps the existing file
        let again = write_preact_shim(project.path()).await.unwrap();
        assert_eq!(again, path);
    }

    #[tokio::test]
    async fn stale_shim_is_replaced() {
        let project = tempfile::tempdir().unwrap();
        let path = project.path().join(PREACT_SHIM_PATH);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "export {}\n").unwrap();

        write_preact_shim(project.path()).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), PREACT_SHIM_SOURCE);
    }
}
