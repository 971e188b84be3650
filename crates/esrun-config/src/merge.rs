//! Override merging for build options.
//!
//! Merge semantics:
//! - Fields set in the override replace the base value wholesale
//! - Fields only set in the base are kept
//! - A `null` in the override clears the base value but keeps the key present
//! - `plugins`: base list followed by override list (never replaced)
//! - Passthrough options shadow per key

use tracing::trace;

use indexmap::IndexSet;

use crate::options::{BuildOptionKey, BuildOptions};

/// Layer `overrides` on top of `config`.
///
/// Both inputs are left untouched; the result owns its own copies, including
/// the plugin list, which is always present (possibly empty).
///
/// # Example
///
/// ```
/// use esrun_config::{combine_configs, BuildOptions, PluginDescriptor};
/// use serde_json::Value;
///
/// let base = BuildOptions::default()
///     .with_outdir("dist")
///     .with_plugin(PluginDescriptor::named("first", Value::Null));
/// let overrides = BuildOptions::default()
///     .with_entry_points(["src/main.ts"])
///     .with_plugin(PluginDescriptor::named("second", Value::Null));
///
/// let merged = combine_configs(&base, &overrides);
/// let names: Vec<_> = merged.plugins().iter().map(|p| p.name()).collect();
/// assert_eq!(names, ["first", "second"]);
/// assert_eq!(merged.outdir, base.outdir);
/// assert_eq!(merged.entry_points, overrides.entry_points);
/// ```
pub fn combine_configs(config: &BuildOptions, overrides: &BuildOptions) -> BuildOptions {
    let mut plugins = config.plugins().to_vec();
    plugins.extend_from_slice(overrides.plugins());

    let mut extra = config.extra.clone();
    for (name, value) in &overrides.extra {
        extra.insert(name.clone(), value.clone());
    }

    trace!(
        plugins = plugins.len(),
        overridden = overrides.present_keys().len(),
        "combined build options"
    );

    let cleared = |key: BuildOptionKey| overrides.null_keys.contains(&key);

    let null_keys: IndexSet<BuildOptionKey> = BuildOptionKey::NAMED
        .iter()
        .filter(|key| **key != BuildOptionKey::Plugins)
        .filter(|key| {
            overrides.null_keys.contains(*key)
                || (config.null_keys.contains(*key) && !overrides.has(key))
        })
        .cloned()
        .collect();

    BuildOptions {
        entry_points: pick(
            &config.entry_points,
            &overrides.entry_points,
            cleared(BuildOptionKey::EntryPoints),
        ),
        outdir: pick(
            &config.outdir,
            &overrides.outdir,
            cleared(BuildOptionKey::Outdir),
        ),
        outfile: pick(
            &config.outfile,
            &overrides.outfile,
            cleared(BuildOptionKey::Outfile),
        ),
        bundle: pick(
            &config.bundle,
            &overrides.bundle,
            cleared(BuildOptionKey::Bundle),
        ),
        minify: pick(
            &config.minify,
            &overrides.minify,
            cleared(BuildOptionKey::Minify),
        ),
        sourcemap: pick(
            &config.sourcemap,
            &overrides.sourcemap,
            cleared(BuildOptionKey::Sourcemap),
        ),
        splitting: pick(
            &config.splitting,
            &overrides.splitting,
            cleared(BuildOptionKey::Splitting),
        ),
        format: pick(
            &config.format,
            &overrides.format,
            cleared(BuildOptionKey::Format),
        ),
        platform: pick(
            &config.platform,
            &overrides.platform,
            cleared(BuildOptionKey::Platform),
        ),
        target: pick(
            &config.target,
            &overrides.target,
            cleared(BuildOptionKey::Target),
        ),
        external: pick(
            &config.external,
            &overrides.external,
            cleared(BuildOptionKey::External),
        ),
        define: pick(
            &config.define,
            &overrides.define,
            cleared(BuildOptionKey::Define),
        ),
        inject: pick(
            &config.inject,
            &overrides.inject,
            cleared(BuildOptionKey::Inject),
        ),
        alias: pick(
            &config.alias,
            &overrides.alias,
            cleared(BuildOptionKey::Alias),
        ),
        loader: pick(
            &config.loader,
            &overrides.loader,
            cleared(BuildOptionKey::Loader),
        ),
        metafile: pick(
            &config.metafile,
            &overrides.metafile,
            cleared(BuildOptionKey::Metafile),
        ),
        tsconfig: pick(
            &config.tsconfig,
            &overrides.tsconfig,
            cleared(BuildOptionKey::Tsconfig),
        ),
        write: pick(
            &config.write,
            &overrides.write,
            cleared(BuildOptionKey::Write),
        ),
        log_level: pick(
            &config.log_level,
            &overrides.log_level,
            cleared(BuildOptionKey::LogLevel),
        ),
        plugins: Some(plugins),
        extra,
        null_keys,
    }
}

fn pick<T: Clone>(base: &Option<T>, overrides: &Option<T>, cleared: bool) -> Option<T> {
    if cleared {
        return None;
    }
    overrides.as_ref().or(base.as_ref()).cloned()
}
