use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Output module format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Immediately invoked function expression (browser script tag)
    Iife,
    /// CommonJS (`require` / `module.exports`)
    Cjs,
    /// ECMAScript modules
    Esm,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Iife => "iife",
            Format::Cjs => "cjs",
            Format::Esm => "esm",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform the bundle is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Browser,
    Node,
    Neutral,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Browser => "browser",
            Platform::Node => "node",
            Platform::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named source map modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMapMode {
    /// External `.map` file referenced by a `//# sourceMappingURL` comment
    Linked,
    /// Map embedded in the output as a data URL
    Inline,
    /// External `.map` file without a reference comment
    External,
    /// Both inline and external
    Both,
}

impl SourceMapMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMapMode::Linked => "linked",
            SourceMapMode::Inline => "inline",
            SourceMapMode::External => "external",
            SourceMapMode::Both => "both",
        }
    }
}

impl fmt::Display for SourceMapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// esbuild accepts either a boolean or a mode name for `sourcemap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceMap {
    Enabled(bool),
    Mode(SourceMapMode),
}

impl From<bool> for SourceMap {
    fn from(enabled: bool) -> Self {
        SourceMap::Enabled(enabled)
    }
}

impl From<SourceMapMode> for SourceMap {
    fn from(mode: SourceMapMode) -> Self {
        SourceMap::Mode(mode)
    }
}

/// `metafile` is a boolean in esbuild's JS API and a file path on its command
/// line; both spellings are accepted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metafile {
    Enabled(bool),
    Path(PathBuf),
}

impl From<bool> for Metafile {
    fn from(enabled: bool) -> Self {
        Metafile::Enabled(enabled)
    }
}

impl From<PathBuf> for Metafile {
    fn from(path: PathBuf) -> Self {
        Metafile::Path(path)
    }
}

/// Verbosity of the bundler's own log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Verbose,
    Debug,
    Info,
    Warning,
    Error,
    Silent,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Silent => "silent",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sourcemap_accepts_bool_or_mode() {
        let enabled: SourceMap = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(enabled, SourceMap::Enabled(true));

        let inline: SourceMap = serde_json::from_value(json!("inline")).unwrap();
        assert_eq!(inline, SourceMap::Mode(SourceMapMode::Inline));
    }

    #[test]
    fn metafile_accepts_bool_or_path() {
        let enabled: Metafile = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(enabled, Metafile::Enabled(true));

        let path: Metafile = serde_json::from_value(json!("meta.json")).unwrap();
        assert_eq!(path, Metafile::Path(PathBuf::from("meta.json")));
    }

    #[test]
    fn enums_use_esbuild_spelling() {
        assert_eq!(serde_json::to_value(Format::Esm).unwrap(), json!("esm"));
        assert_eq!(serde_json::to_value(Platform::Node).unwrap(), json!("node"));
        assert_eq!(LogLevel::Warning.to_string(), "warning");
    }
}
