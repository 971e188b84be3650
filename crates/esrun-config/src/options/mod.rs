//! The esbuild option record shared by base configs and overrides.

mod key;
mod types;

use std::path::PathBuf;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::plugin::PluginDescriptor;

pub use key::BuildOptionKey;
pub use types::{Format, LogLevel, Metafile, Platform, SourceMap, SourceMapMode};

/// Options forwarded to the bundler's `build` / `serve` entry points.
///
/// A field holding `Some(..)` is *present*, whatever the value inside it: an
/// empty list or `false` still counts. A key given as `null` is present too;
/// its field stays `None` and the key is recorded in `null_keys`. Options
/// without a dedicated field live in `extra` under their esbuild name and are
/// forwarded untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct BuildOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_points: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outfile: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sourcemap: Option<SourceMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splitting: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,

    /// Language / runtime targets such as `esnext` or `node16`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Vec<String>>,

    /// Modules left as runtime imports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<Vec<String>>,

    /// Global identifier replacements (`process.env.NODE_ENV` -> `'production'`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub define: Option<IndexMap<String, String>>,

    /// Files whose exports are injected into every output file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inject: Option<Vec<PathBuf>>,

    /// Import path substitutions applied before resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<IndexMap<String, String>>,

    /// File extension (`.svg`) to loader name (`text`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loader: Option<IndexMap<String, String>>,

    /// Build metadata output; esbuild's command line needs a path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metafile: Option<Metafile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsconfig: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<PluginDescriptor>>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,

    /// Named options that were supplied as `null`
    #[serde(skip)]
    pub null_keys: IndexSet<BuildOptionKey>,
}

impl Serialize for BuildOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.null_keys.is_empty() {
            return BuildOptions::serialize(self, serializer);
        }

        let mut value = BuildOptions::serialize(self, serde_json::value::Serializer)
            .map_err(serde::ser::Error::custom)?;
        if let Value::Object(map) = &mut value {
            for key in &self.null_keys {
                map.entry(key.as_str()).or_insert(Value::Null);
            }
        }
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BuildOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;

        let null_keys: IndexSet<BuildOptionKey> = raw
            .iter()
            .filter(|(_, value)| value.is_null())
            .filter_map(|(name, _)| name.parse::<BuildOptionKey>().ok())
            .filter(|key| !matches!(key, BuildOptionKey::Other(_)))
            .collect();

        let object: serde_json::Map<String, Value> = raw.into_iter().collect();
        let mut options =
            BuildOptions::deserialize(Value::Object(object)).map_err(serde::de::Error::custom)?;
        options.null_keys = null_keys;
        Ok(options)
    }
}

impl BuildOptions {
    /// Create from serde_json::Value (for overrides read from JSON)
    ///
    /// # Example
    ///
    /// ```
    /// use esrun_config::BuildOptions;
    /// use serde_json::json;
    ///
    /// let options = BuildOptions::from_value(json!({
    ///     "entryPoints": ["src/main.ts"],
    ///     "minify": true,
    ///     "chunkNames": "chunks/[name]-[hash]"
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(options.entry_points, Some(vec!["src/main.ts".to_string()]));
    /// assert_eq!(options.minify, Some(true));
    /// assert!(options.extra.contains_key("chunkNames"));
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "options".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "options".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Whether the option named by `key` was set, regardless of its value.
    pub fn has(&self, key: &BuildOptionKey) -> bool {
        if self.null_keys.contains(key) {
            return true;
        }

        match key {
            BuildOptionKey::EntryPoints => self.entry_points.is_some(),
            BuildOptionKey::Outdir => self.outdir.is_some(),
            BuildOptionKey::Outfile => self.outfile.is_some(),
            BuildOptionKey::Bundle => self.bundle.is_some(),
            BuildOptionKey::Minify => self.minify.is_some(),
            BuildOptionKey::Sourcemap => self.sourcemap.is_some(),
            BuildOptionKey::Splitting => self.splitting.is_some(),
            BuildOptionKey::Format => self.format.is_some(),
            BuildOptionKey::Platform => self.platform.is_some(),
            BuildOptionKey::Target => self.target.is_some(),
            BuildOptionKey::External => self.external.is_some(),
            BuildOptionKey::Define => self.define.is_some(),
            BuildOptionKey::Inject => self.inject.is_some(),
            BuildOptionKey::Alias => self.alias.is_some(),
            BuildOptionKey::Loader => self.loader.is_some(),
            BuildOptionKey::Metafile => self.metafile.is_some(),
            BuildOptionKey::Tsconfig => self.tsconfig.is_some(),
            BuildOptionKey::Write => self.write.is_some(),
            BuildOptionKey::LogLevel => self.log_level.is_some(),
            BuildOptionKey::Plugins => self.plugins.is_some(),
            BuildOptionKey::Other(name) => self.extra.contains_key(name),
        }
    }

    /// Keys of every option that is set, named fields first.
    pub fn present_keys(&self) -> Vec<BuildOptionKey> {
        BuildOptionKey::NAMED
            .iter()
            .filter(|key| self.has(key))
            .cloned()
            .chain(self.extra.keys().cloned().map(BuildOptionKey::Other))
            .collect()
    }

    pub fn plugins(&self) -> &[PluginDescriptor] {
        self.plugins.as_deref().unwrap_or_default()
    }

    pub fn with_entry_points<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entry_points = Some(entries.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_outdir(mut self, outdir: impl Into<PathBuf>) -> Self {
        self.outdir = Some(outdir.into());
        self
    }

    /// Append a plugin, creating the list if needed.
    pub fn with_plugin(mut self, plugin: PluginDescriptor) -> Self {
        self.plugins.get_or_insert_with(Vec::new).push(plugin);
        self
    }

    /// Set an option that has no dedicated field.
    ///
    /// # Example
    /// ```
    /// use esrun_config::{BuildOptionKey, BuildOptions};
    /// use serde_json::json;
    ///
    /// let options = BuildOptions::default().with_extra("jsxFactory", json!("h"));
    /// assert!(options.has(&BuildOptionKey::Other("jsxFactory".into())));
    /// ```
    pub fn with_extra(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn presence_ignores_falsy_values() {
        let options = BuildOptions {
            entry_points: Some(vec![]),
            minify: Some(false),
            outdir: Some(PathBuf::new()),
            ..Default::default()
        };

        assert!(options.has(&BuildOptionKey::EntryPoints));
        assert!(options.has(&BuildOptionKey::Minify));
        assert!(options.has(&BuildOptionKey::Outdir));
        assert!(!options.has(&BuildOptionKey::Bundle));
    }

    #[test]
    fn from_value_keeps_unknown_options() {
        let options = BuildOptions::from_value(json!({
            "outdir": "out",
            "jsxFactory": "h",
            "keepNames": true
        }))
        .unwrap();

        assert_eq!(options.outdir, Some(PathBuf::from("out")));
        assert_eq!(options.extra.get("jsxFactory"), Some(&json!("h")));
        assert!(options.has(&BuildOptionKey::Other("keepNames".into())));
    }

    #[test]
    fn null_options_are_present() {
        let options = BuildOptions::from_value(json!({
            "entryPoints": null,
            "legalComments": null
        }))
        .unwrap();

        assert_eq!(options.entry_points, None);
        assert!(options.has(&BuildOptionKey::EntryPoints));
        assert!(options.has(&BuildOptionKey::Other("legalComments".into())));
        assert!(!options.has(&BuildOptionKey::Outdir));
        assert_eq!(
            options.present_keys(),
            vec![
                BuildOptionKey::EntryPoints,
                BuildOptionKey::Other("legalComments".into()),
            ]
        );
    }

    #[test]
    fn null_options_serialize_as_null() {
        let options = BuildOptions::from_value(json!({ "entryPoints": null, "outdir": "dist" }))
            .unwrap();
        assert_eq!(
            options.to_value().unwrap(),
            json!({ "outdir": "dist", "entryPoints": null })
        );
    }

    #[test]
    fn to_value_omits_absent_fields() {
        let options = BuildOptions::default().with_outdir("dist");
        assert_eq!(options.to_value().unwrap(), json!({ "outdir": "dist" }));
    }

    #[test]
    fn from_value_rejects_wrong_types() {
        let err = BuildOptions::from_value(json!({ "minify": "yes" })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn present_keys_lists_named_then_extra() {
        let options = BuildOptions::default()
            .with_extra("chunkNames", json!("[name]"))
            .with_outdir("dist")
            .with_entry_points(["a.ts"]);

        assert_eq!(
            options.present_keys(),
            vec![
                BuildOptionKey::EntryPoints,
                BuildOptionKey::Outdir,
                BuildOptionKey::Other("chunkNames".into()),
            ]
        );
    }
}
