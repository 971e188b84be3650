//! Override loading for `esrun build` and `esrun serve`.
//!
//! Sources, lowest to highest priority:
//! 1. `esrun.config.json` in the project directory, or the `--config` file
//! 2. `ESRUN_*` environment variables (`ESRUN_OUTDIR=out`, `ESRUN_MINIFY=false`)
//! 3. Command-line flags
//!
//! Only keys that a source actually supplies end up in the override, so the
//! preset's base configuration keeps everything else.

use std::path::{Path, PathBuf};

use esrun_config::{BuildOptionKey, BuildOptions, SourceMap};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use tracing::debug;

use crate::cli::RunArgs;
use crate::error::{CliError, Result};

pub const CONFIG_FILE: &str = "esrun.config.json";
pub const ENV_PREFIX: &str = "ESRUN_";

/// Build the override configuration for one invocation.
pub fn load_overrides(args: &RunArgs, cwd: &Path) -> Result<BuildOptions> {
    let mut figment = Figment::new();

    if let Some(path) = config_file(args, cwd)? {
        debug!(path = %path.display(), "loading override file");
        figment = figment.merge(Json::file(path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).map(|key| option_name(key.as_str()).into()));
    figment = figment.merge(Serialized::defaults(from_run_args(args)));

    let overrides: BuildOptions = figment.extract()?;
    debug!(keys = ?overrides.present_keys(), "override configuration");
    Ok(overrides)
}

/// The explicit `--config` file, or `esrun.config.json` when it exists.
fn config_file(args: &RunArgs, cwd: &Path) -> Result<Option<PathBuf>> {
    match &args.config {
        Some(path) => {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                cwd.join(path)
            };
            if !path.is_file() {
                return Err(CliError::ConfigNotFound(path));
            }
            Ok(Some(path))
        }
        None => {
            let default_path = cwd.join(CONFIG_FILE);
            Ok(default_path.is_file().then_some(default_path))
        }
    }
}

/// Map a lowercased env key back to the option's camelCase name.
fn option_name(env_key: &str) -> String {
    BuildOptionKey::NAMED
        .iter()
        .map(BuildOptionKey::as_str)
        .find(|name| name.eq_ignore_ascii_case(env_key))
        .map_or_else(|| env_key.to_string(), str::to_string)
}

/// Override holding only the flags the user passed.
fn from_run_args(args: &RunArgs) -> BuildOptions {
    let minify = if args.minify {
        Some(true)
    } else if args.no_minify {
        Some(false)
    } else {
        None
    };

    BuildOptions {
        entry_points: (!args.entry.is_empty()).then(|| args.entry.clone()),
        outdir: args.outdir.clone(),
        minify,
        sourcemap: args.sourcemap.then_some(SourceMap::Enabled(true)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Preset;
    use serial_test::serial;
    use std::fs;

    fn run_args() -> RunArgs {
        RunArgs {
            preset: Preset::Electron,
            entry: Vec::new(),
            outdir: None,
            minify: false,
            no_minify: false,
            sourcemap: false,
            config: None,
            cwd: None,
        }
    }

    #[test]
    #[serial]
    fn no_sources_means_empty_override() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = load_overrides(&run_args(), dir.path()).unwrap();
        assert!(overrides.present_keys().is_empty());
    }

    #[test]
    #[serial]
    fn flags_only_set_supplied_keys() {
        let dir = tempfile::tempdir().unwrap();
        let args = RunArgs {
            entry: vec!["src/main.ts".to_string()],
            no_minify: true,
            ..run_args()
        };

        let overrides = load_overrides(&args, dir.path()).unwrap();
        assert_eq!(
            overrides.present_keys(),
            vec![BuildOptionKey::EntryPoints, BuildOptionKey::Minify]
        );
        assert_eq!(overrides.minify, Some(false));
    }

    #[test]
    #[serial]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "entryPoints": ["src/file.ts"], "outdir": "from-file", "logLevel": "warning" }"#,
        )
        .unwrap();

        let args = RunArgs {
            outdir: Some(PathBuf::from("from-flag")),
            ..run_args()
        };
        let overrides = load_overrides(&args, dir.path()).unwrap();

        assert_eq!(overrides.entry_points, Some(vec!["src/file.ts".to_string()]));
        assert_eq!(overrides.outdir, Some(PathBuf::from("from-flag")));
        assert!(overrides.has(&BuildOptionKey::LogLevel));
    }

    #[test]
    #[serial]
    fn null_in_config_file_counts_as_supplied() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), r#"{ "entryPoints": null }"#).unwrap();

        let overrides = load_overrides(&run_args(), dir.path()).unwrap();
        assert_eq!(overrides.entry_points, None);
        assert!(overrides.has(&BuildOptionKey::EntryPoints));
    }

    #[test]
    #[serial]
    fn env_maps_to_camel_case_options() {
        let dir = tempfile::tempdir().unwrap();
        unsafe {
            std::env::set_var("ESRUN_OUTDIR", "env-out");
            std::env::set_var("ESRUN_LOGLEVEL", "warning");
        }

        let result = load_overrides(&run_args(), dir.path());

        unsafe {
            std::env::remove_var("ESRUN_OUTDIR");
            std::env::remove_var("ESRUN_LOGLEVEL");
        }

        let overrides = result.unwrap();
        assert_eq!(overrides.outdir, Some(PathBuf::from("env-out")));
        assert_eq!(overrides.log_level, Some(esrun_config::LogLevel::Warning));
        assert!(overrides.extra.is_empty());
    }

    #[test]
    #[serial]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = RunArgs {
            config: Some(PathBuf::from("nope.json")),
            ..run_args()
        };

        let err = load_overrides(&args, dir.path()).unwrap_err();
        assert!(matches!(err, CliError::ConfigNotFound(path) if path.ends_with("nope.json")));
    }

    #[test]
    fn env_keys_fall_back_to_raw_name() {
        assert_eq!(option_name("loglevel"), "logLevel");
        assert_eq!(option_name("metafile"), "metafile");
        assert_eq!(option_name("keepnames"), "keepnames");
    }
}
