//! Node-style module resolution to absolute paths.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use oxc_resolver::{ResolveOptions, Resolver};
use tracing::debug;

use crate::error::ResolveError;

/// Resolves module specifiers the way `require.resolve` would from `base`.
///
/// Relative specifiers are resolved against `base`; bare specifiers walk up
/// through `node_modules` directories honoring `package.json` `exports` with
/// the CommonJS conditions.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    resolver: Arc<Resolver>,
    base: PathBuf,
}

impl ModuleResolver {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let resolver = Resolver::new(ResolveOptions {
            condition_names: vec!["node".into(), "require".into(), "default".into()],
            extensions: vec![".js".into(), ".json".into(), ".node".into()],
            ..Default::default()
        });

        Self {
            resolver: Arc::new(resolver),
            base: base.into(),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve `specifier` to an absolute file path.
    ///
    /// # Errors
    ///
    /// [`ResolveError::NotFound`] when no file matches.
    pub async fn resolve_to_absolute(&self, specifier: &str) -> Result<PathBuf, ResolveError> {
        let resolver = Arc::clone(&self.resolver);
        let base = self.base.clone();
        let owned = specifier.to_string();

        let resolved = tokio::task::spawn_blocking(move || {
            resolver
                .resolve(&base, &owned)
                .map(|resolution| resolution.path().to_path_buf())
                .map_err(|e| ResolveError::NotFound {
                    specifier: owned,
                    base,
                    reason: e.to_string(),
                })
        })
        .await
        .map_err(|e| ResolveError::Join(e.to_string()))??;

        debug!(specifier, path = %resolved.display(), "resolved module");
        Ok(resolved)
    }
}
