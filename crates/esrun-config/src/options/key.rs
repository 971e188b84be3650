use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// Name of a single option on [`BuildOptions`](super::BuildOptions).
///
/// Keys display and parse using esbuild's camelCase option names, so a list
/// of required keys reads the same as the JSON object it is checked against.
/// Options without a dedicated field are carried as [`BuildOptionKey::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuildOptionKey {
    EntryPoints,
    Outdir,
    Outfile,
    Bundle,
    Minify,
    Sourcemap,
    Splitting,
    Format,
    Platform,
    Target,
    External,
    Define,
    Inject,
    Alias,
    Loader,
    Metafile,
    Tsconfig,
    Write,
    LogLevel,
    Plugins,
    Other(String),
}

impl BuildOptionKey {
    /// Every key with a dedicated field, in declaration order.
    pub const NAMED: &'static [BuildOptionKey] = &[
        BuildOptionKey::EntryPoints,
        BuildOptionKey::Outdir,
        BuildOptionKey::Outfile,
        BuildOptionKey::Bundle,
        BuildOptionKey::Minify,
        BuildOptionKey::Sourcemap,
        BuildOptionKey::Splitting,
        BuildOptionKey::Format,
        BuildOptionKey::Platform,
        BuildOptionKey::Target,
        BuildOptionKey::External,
        BuildOptionKey::Define,
        BuildOptionKey::Inject,
        BuildOptionKey::Alias,
        BuildOptionKey::Loader,
        BuildOptionKey::Metafile,
        BuildOptionKey::Tsconfig,
        BuildOptionKey::Write,
        BuildOptionKey::LogLevel,
        BuildOptionKey::Plugins,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            BuildOptionKey::EntryPoints => "entryPoints",
            BuildOptionKey::Outdir => "outdir",
            BuildOptionKey::Outfile => "outfile",
            BuildOptionKey::Bundle => "bundle",
            BuildOptionKey::Minify => "minify",
            BuildOptionKey::Sourcemap => "sourcemap",
            BuildOptionKey::Splitting => "splitting",
            BuildOptionKey::Format => "format",
            BuildOptionKey::Platform => "platform",
            BuildOptionKey::Target => "target",
            BuildOptionKey::External => "external",
            BuildOptionKey::Define => "define",
            BuildOptionKey::Inject => "inject",
            BuildOptionKey::Alias => "alias",
            BuildOptionKey::Loader => "loader",
            BuildOptionKey::Metafile => "metafile",
            BuildOptionKey::Tsconfig => "tsconfig",
            BuildOptionKey::Write => "write",
            BuildOptionKey::LogLevel => "logLevel",
            BuildOptionKey::Plugins => "plugins",
            BuildOptionKey::Other(name) => name,
        }
    }
}

impl fmt::Display for BuildOptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildOptionKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyOptionName);
        }

        Ok(Self::NAMED
            .iter()
            .find(|key| key.as_str() == name)
            .cloned()
            .unwrap_or_else(|| BuildOptionKey::Other(name.to_string())))
    }
}

impl Serialize for BuildOptionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BuildOptionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
