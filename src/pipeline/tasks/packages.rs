//! `package.json` maintenance and package installation

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::config::Options;
use crate::domain::ports::{FrontendScanner, PackageInstaller};
use crate::domain::value_objects::ContentHash;
use crate::pipeline::task::{Task, TaskContext, TaskError};

pub(crate) const PACKAGE_JSON: &str = "package.json";

/// Key under which the dependency hash is stored
pub(crate) const HASH_SECTION: &str = "frontgen";

fn package_json_path(options: &Options) -> PathBuf {
    options.project_directory().join(PACKAGE_JSON)
}

fn to_pretty(value: &Value) -> Result<String, TaskError> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

/// Write a minimal `package.json` when the project has none
pub struct CreatePackageJson;

impl Task for CreatePackageJson {
    fn name(&self) -> &str {
        "create-package-json"
    }

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let path = package_json_path(ctx.options);
        if path.exists() {
            return Ok(());
        }
        let default = json!({
            "name": "no-name",
            "license": "UNLICENSED",
            "type": "module",
            "dependencies": {},
            "devDependencies": {},
        });
        ctx.files.write_if_changed(&path, &to_pretty(&default)?)?;
        Ok(())
    }
}

/// Merge scanned packages into `package.json` dependencies
pub struct UpdatePackages {
    scanner: Arc<dyn FrontendScanner>,
}

impl UpdatePackages {
    pub fn new(scanner: Arc<dyn FrontendScanner>) -> Self {
        Self { scanner }
    }
}

/// SHA-256 of the dependency map in key order
pub(crate) fn dependencies_hash(dependencies: &Map<String, Value>) -> Result<String, TaskError> {
    let sorted: BTreeMap<&String, &Value> = dependencies.iter().collect();
    let text = serde_json::to_string(&sorted)?;
    Ok(ContentHash::from_content(&text).hex().to_string())
}

impl Task for UpdatePackages {
    fn name(&self) -> &str {
        "update-packages"
    }

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let path = package_json_path(ctx.options);
        let text = fs::read_to_string(&path).map_err(|e| {
            TaskError::Precondition(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let mut package: Value = serde_json::from_str(&text)?;
        let Some(root) = package.as_object_mut() else {
            return Err(TaskError::Validation(format!(
                "'{}' is not a JSON object",
                path.display()
            )));
        };

        let dependencies = root
            .entry("dependencies")
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(dependencies) = dependencies.as_object_mut() else {
            return Err(TaskError::Validation(format!(
                "'dependencies' in '{}' is not an object",
                path.display()
            )));
        };
        for (name, version) in self.scanner.packages() {
            dependencies.insert(name, Value::String(version));
        }
        let hash = dependencies_hash(dependencies)?;

        root.insert(HASH_SECTION.to_string(), json!({ "hash": hash }));
        let changed = ctx.files.write_if_changed(&path, &to_pretty(&package)?)?;
        if changed {
            tracing::info!(path = %path.display(), "package.json updated");
        }
        Ok(())
    }
}

/// Run the package manager in the project directory
pub struct RunPackageInstall {
    installer: Arc<dyn PackageInstaller>,
}

impl RunPackageInstall {
    pub fn new(installer: Arc<dyn PackageInstaller>) -> Self {
        Self { installer }
    }
}

impl Task for RunPackageInstall {
    fn name(&self) -> &str {
        "run-package-install"
    }

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        self.installer
            .install(&ctx.options.project_directory())
            .map_err(TaskError::External)
    }
}
