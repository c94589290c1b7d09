//! Bundle stats
//!
//! `config/stats.json` records what a production bundle was built from, so a
//! later build can decide whether the bundle still matches the project.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::ContentHash;
use crate::error::FrontgenResult;

/// SHA-256 hex digest of `content` with Windows line endings normalized.
///
/// A file checked out with CRLF hashes the same as its LF original.
pub fn calculate_hash(content: &str) -> String {
    let normalized = content.replace("\r\n", "\n");
    ContentHash::from_content(&normalized).hex().to_string()
}

/// Serde model of a bundle's `config/stats.json`.
///
/// Unknown keys are ignored; every field is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundleStats {
    pub package_json_hash: Option<String>,
    pub package_json_dependencies: BTreeMap<String, String>,
    pub bundle_imports: Vec<String>,
    pub frontend_hashes: BTreeMap<String, String>,
    /// Theme name to the raw `theme.json` text the bundle was built with
    pub theme_json_contents: BTreeMap<String, String>,
}

impl BundleStats {
    pub fn read(path: &Path) -> FrontgenResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Bundled imports as JSON strings, ready for set comparison
    pub fn import_values(&self) -> Vec<Value> {
        self.bundle_imports.iter().cloned().map(Value::String).collect()
    }

    /// Bundled npm package names as JSON strings
    pub fn package_values(&self) -> Vec<Value> {
        self.package_json_dependencies
            .keys()
            .cloned()
            .map(Value::String)
            .collect()
    }

    /// Parsed `theme.json` of `theme`, if the bundle recorded one
    pub fn theme_json(&self, theme: &str) -> Option<FrontgenResult<Value>> {
        self.theme_json_contents
            .get(theme)
            .map(|text| serde_json::from_str(text).map_err(Into::into))
    }
}
