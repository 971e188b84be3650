//! Lowering [`BuildOptions`] to esbuild command-line flags.

use std::path::Path;

use esrun_config::{BuildOptions, Metafile, PluginDescriptor, SourceMap};
use serde_json::Value;

use crate::error::{BundlerError, BundlerResult};

/// Command-line arguments equivalent to `options`.
///
/// Entry points come first as positional arguments. Passthrough options are
/// kebab-cased (`chunkNames` -> `--chunk-names`).
///
/// # Errors
///
/// [`BundlerError::UnsupportedPlugin`] for any plugin other than the alias
/// plugin, which has a flag equivalent. [`BundlerError::UnsupportedOption`]
/// for `metafile: true`, since the command line only writes a metafile to an
/// explicit path.
pub fn cli_args(options: &BuildOptions) -> BundlerResult<Vec<String>> {
    let mut args: Vec<String> = options.entry_points.iter().flatten().cloned().collect();

    switch(&mut args, "bundle", options.bundle);
    switch(&mut args, "minify", options.minify);
    switch(&mut args, "splitting", options.splitting);

    if let Some(outdir) = &options.outdir {
        args.push(format!("--outdir={}", outdir.display()));
    }
    if let Some(outfile) = &options.outfile {
        args.push(format!("--outfile={}", outfile.display()));
    }
    if let Some(format) = options.format {
        args.push(format!("--format={format}"));
    }
    if let Some(platform) = options.platform {
        args.push(format!("--platform={platform}"));
    }
    if let Some(target) = options.target.as_ref().filter(|t| !t.is_empty()) {
        args.push(format!("--target={}", target.join(",")));
    }
    match options.sourcemap {
        Some(SourceMap::Enabled(true)) => args.push("--sourcemap".to_string()),
        Some(SourceMap::Mode(mode)) => args.push(format!("--sourcemap={mode}")),
        Some(SourceMap::Enabled(false)) | None => {}
    }

    for module in options.external.iter().flatten() {
        args.push(format!("--external:{module}"));
    }
    for (name, value) in options.define.iter().flatten() {
        args.push(format!("--define:{name}={value}"));
    }
    for path in options.inject.iter().flatten() {
        args.push(format!("--inject:{}", path.display()));
    }
    for (name, target) in options.alias.iter().flatten() {
        args.push(format!("--alias:{name}={target}"));
    }
    for (extension, loader) in options.loader.iter().flatten() {
        args.push(format!("--loader:{extension}={loader}"));
    }

    match &options.metafile {
        Some(Metafile::Path(path)) => args.push(format!("--metafile={}", path.display())),
        Some(Metafile::Enabled(true)) => {
            return Err(BundlerError::UnsupportedOption {
                name: "metafile".to_string(),
                reason: "give a file path instead of `true`".to_string(),
            });
        }
        Some(Metafile::Enabled(false)) | None => {}
    }
    if let Some(tsconfig) = &options.tsconfig {
        args.push(format!("--tsconfig={}", tsconfig.display()));
    }
    if options.write == Some(false) {
        args.push("--write=false".to_string());
    }
    if let Some(level) = options.log_level {
        args.push(format!("--log-level={level}"));
    }

    for plugin in options.plugins() {
        match plugin {
            PluginDescriptor::Alias { aliases } => {
                for (name, path) in aliases {
                    args.push(alias_flag(name, path));
                }
            }
            PluginDescriptor::Named { name, .. } => {
                return Err(BundlerError::UnsupportedPlugin { name: name.clone() });
            }
        }
    }

    for (name, value) in &options.extra {
        passthrough(&mut args, &kebab_case(name), value);
    }

    Ok(args)
}

fn switch(args: &mut Vec<String>, flag: &str, value: Option<bool>) {
    if value == Some(true) {
        args.push(format!("--{flag}"));
    }
}

fn alias_flag(name: &str, path: &Path) -> String {
    format!("--alias:{name}={}", path.display())
}

fn passthrough(args: &mut Vec<String>, flag: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(true) => args.push(format!("--{flag}")),
        Value::Bool(false) => args.push(format!("--{flag}=false")),
        Value::Array(items) => {
            let joined: Vec<String> = items.iter().map(scalar).collect();
            args.push(format!("--{flag}={}", joined.join(",")));
        }
        Value::Object(entries) => {
            for (key, entry) in entries {
                args.push(format!("--{flag}:{key}={}", scalar(entry)));
            }
        }
        other => args.push(format!("--{flag}={}", scalar(other))),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
