use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A plugin entry in the `plugins` list.
///
/// The list keeps its order across merges, so descriptors from a base config
/// always run before the ones supplied in an override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PluginDescriptor {
    /// Redirects imports of a module name to an absolute file path.
    Alias { aliases: IndexMap<String, PathBuf> },

    /// Any other plugin, identified by name and handed its options verbatim.
    Named {
        name: String,
        #[serde(default)]
        options: Value,
    },
}

impl PluginDescriptor {
    /// Build the module-alias plugin.
    ///
    /// # Example
    /// ```
    /// use esrun_config::PluginDescriptor;
    ///
    /// let plugin = PluginDescriptor::alias([("react", "/app/node_modules/preact/compat/dist/compat.js")]);
    /// assert_eq!(plugin.name(), "alias");
    /// ```
    pub fn alias<I, K, P>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<PathBuf>,
    {
        PluginDescriptor::Alias {
            aliases: aliases
                .into_iter()
                .map(|(name, path)| (name.into(), path.into()))
                .collect(),
        }
    }

    pub fn named(name: impl Into<String>, options: Value) -> Self {
        PluginDescriptor::Named {
            name: name.into(),
            options,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PluginDescriptor::Alias { .. } => "alias",
            PluginDescriptor::Named { name, .. } => name,
        }
    }
}
