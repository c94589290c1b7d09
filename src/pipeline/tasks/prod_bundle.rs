//! Production bundle tasks
//!
//! - `prepare-prod-bundle`: restore the committed bundle into the webapp dir
//! - `validate-bundle`: decide whether that bundle still matches the project
//! - `pack-prod-bundle`: snapshot a freshly built webapp dir into a bundle

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::bundle::{self, BundleStats, STATS_JSON};
use crate::config::Options;
use crate::domain::ports::FrontendScanner;
use crate::pipeline::task::{Task, TaskContext, TaskError};
use crate::validation::{is_subset_with_report, log_changed_files, object_includes_entry};

use super::packages::{HASH_SECTION, PACKAGE_JSON};

/// Marker file read by the build to decide whether to rebuild the bundle
pub(crate) const NEEDS_BUILD_FILE: &str = "needs-build";

/// Import prefix that points into the project's frontend folder
const FRONTEND_ALIAS: &str = "Frontend/";
const INDEX_HTML: &str = "index.html";
/// Entry files whose appearance or removal changes the bundle
const INDEX_FILES: [&str; 3] = ["index.ts", "index.js", "index.tsx"];

pub struct PrepareProdBundle;

impl Task for PrepareProdBundle {
    fn name(&self) -> &str {
        "prepare-prod-bundle"
    }

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let archive = ctx.options.prod_bundle_file();
        if !archive.is_file() {
            return Err(TaskError::Precondition(format!(
                "production bundle '{}' not found",
                archive.display()
            )));
        }

        let webapp = ctx.options.webapp_directory();
        let summary = bundle::unpack(&archive, &webapp)?;
        for path in summary.paths() {
            ctx.files.track(&webapp.join(path))?;
        }
        tracing::info!(files = summary.len(), webapp = %webapp.display(), "production bundle restored");
        Ok(())
    }
}

pub struct ValidateBundle {
    scanner: Arc<dyn FrontendScanner>,
}

impl ValidateBundle {
    pub fn new(scanner: Arc<dyn FrontendScanner>) -> Self {
        Self { scanner }
    }

    /// Differences between the project and what the bundle was built from
    fn mismatches(&self, options: &Options, stats: &BundleStats) -> Result<Vec<String>, TaskError> {
        let mut mismatches = Vec::new();

        let imports: Vec<Value> = self.scanner.imports().into_iter().map(Value::String).collect();
        let report = is_subset_with_report(&imports, &stats.import_values());
        mismatches.extend(report.missing.into_iter().map(|m| format!("import {}", m)));

        mismatches.extend(self.package_mismatches(options, stats)?);
        mismatches.extend(self.frontend_mismatches(options, stats)?);

        if let Some(theme) = self.scanner.theme() {
            mismatches.extend(theme_mismatches(options, stats, &theme)?);
        }
        Ok(mismatches)
    }

    /// With an unchanged `package.json` hash only scanned packages need to
    /// be in the bundle; otherwise every declared dependency must be there
    /// in an accepted version.
    fn package_mismatches(&self, options: &Options, stats: &BundleStats) -> Result<Vec<String>, TaskError> {
        let path = options.project_directory().join(PACKAGE_JSON);
        let package: Value = if path.is_file() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            Value::Null
        };

        let hash = package
            .get(HASH_SECTION)
            .and_then(|section| section.get("hash"))
            .and_then(Value::as_str)
            .filter(|hash| !hash.is_empty());
        let Some(hash) = hash else {
            return Ok(vec!["package.json has no dependency hash".to_string()]);
        };

        if stats.package_json_hash.as_deref() == Some(hash) {
            let packages: Vec<Value> = self.scanner.packages().into_keys().map(Value::String).collect();
            let report = is_subset_with_report(&packages, &stats.package_values());
            return Ok(report.missing.into_iter().map(|m| format!("package {}", m)).collect());
        }

        let mut mismatches = Vec::new();
        let dependencies = package.get("dependencies").and_then(Value::as_object);
        for (name, version) in dependencies.into_iter().flatten() {
            let version = version.as_str().unwrap_or_default();
            match stats.package_json_dependencies.get(name) {
                None => mismatches.push(format!("package \"{}\"", name)),
                Some(bundled) if !version_accepted(version, bundled) => mismatches.push(format!(
                    "package \"{}\" {} (bundle has {})",
                    name, version, bundled
                )),
                Some(_) => {}
            }
        }
        Ok(mismatches)
    }

    /// Content hashes of frontend files against those recorded in the bundle
    fn frontend_mismatches(&self, options: &Options, stats: &BundleStats) -> Result<Vec<String>, TaskError> {
        let frontend = options.frontend_directory();
        let mut mismatches = Vec::new();
        let mut checked = BTreeSet::new();

        for import in self.scanner.imports() {
            let Some(relative) = import.strip_prefix(FRONTEND_ALIAS) else {
                continue;
            };
            if !checked.insert(relative.to_string()) {
                continue;
            }
            let file = frontend.join(relative);
            if !file.is_file() {
                mismatches.push(format!("frontend file '{}' not found", relative));
            } else if !recorded_hash_matches(stats, relative, &file)? {
                mismatches.push(format!("frontend file '{}' changed", relative));
            }
        }

        let index_html = frontend.join(INDEX_HTML);
        if index_html.is_file() && !recorded_hash_matches(stats, INDEX_HTML, &index_html)? {
            mismatches.push(format!("custom {}", INDEX_HTML));
        }
        checked.insert(INDEX_HTML.to_string());

        for index in INDEX_FILES {
            let exists = frontend.join(index).is_file();
            match (exists, stats.frontend_hashes.contains_key(index)) {
                (true, false) => mismatches.push(format!("{} added", index)),
                (false, true) => mismatches.push(format!("{} deleted", index)),
                _ => {}
            }
        }

        // files imported from other frontend files, not seen by the scanner
        for (relative, expected) in &stats.frontend_hashes {
            if checked.contains(relative) {
                continue;
            }
            let file = frontend.join(relative);
            if file.is_file() && bundle::calculate_hash(&fs::read_to_string(&file)?) != *expected {
                mismatches.push(format!("frontend file '{}' changed", relative));
            }
        }
        Ok(mismatches)
    }
}

fn recorded_hash_matches(stats: &BundleStats, relative: &str, file: &Path) -> Result<bool, TaskError> {
    let content = fs::read_to_string(file)?;
    Ok(stats
        .frontend_hashes
        .get(relative)
        .is_some_and(|recorded| *recorded == bundle::calculate_hash(&content)))
}

/// `major.minor.patch` with an optional `^`/`~` range prefix
fn parse_version(version: &str) -> Option<(u64, u64, u64)> {
    let digits = version.trim_start_matches(['^', '~', '=']);
    let mut parts = digits.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().map_or(Some(0), |p| p.parse().ok())?;
    let patch = parts.next().map_or(Some(0), |p| p.parse().ok())?;
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, patch))
}

/// Whether the bundled version satisfies the declared one.
///
/// Unparsable versions (tags, local paths) must match verbatim.
fn version_accepted(expected: &str, bundled: &str) -> bool {
    match (parse_version(expected), parse_version(bundled)) {
        (None, None) => expected == bundled,
        (Some(want), Some(have)) => {
            if expected.starts_with('^') {
                want.0 == have.0 && want <= have
            } else if expected.starts_with('~') {
                (want.0, want.1) == (have.0, have.1) && want <= have
            } else {
                want == have
            }
        }
        _ => false,
    }
}

fn theme_mismatches(options: &Options, stats: &BundleStats, theme: &str) -> Result<Vec<String>, TaskError> {
    let theme_json = options
        .frontend_directory()
        .join("themes")
        .join(theme)
        .join("theme.json");
    if !theme_json.is_file() {
        return Ok(Vec::new());
    }
    let project: Value = serde_json::from_str(&fs::read_to_string(&theme_json)?)?;

    let Some(bundled) = stats.theme_json(theme) else {
        return Ok(vec![format!("theme.json of theme '{}'", theme)]);
    };
    let bundled = bundled?;

    let mut missed = Vec::new();
    if object_includes_entry(&bundled, &project, &mut missed) {
        return Ok(Vec::new());
    }
    missed.reverse();
    Ok(missed
        .into_iter()
        .map(|entry| format!("theme '{}' entry {}", theme, entry))
        .collect())
}

impl Task for ValidateBundle {
    fn name(&self) -> &str {
        "validate-bundle"
    }

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let stats_file = ctx.options.webapp_directory().join(STATS_JSON);
        if !stats_file.is_file() {
            return Err(TaskError::Precondition(format!(
                "bundle stats '{}' not found",
                stats_file.display()
            )));
        }
        let stats = BundleStats::read(&stats_file)?;
        let mismatches = self.mismatches(ctx.options, &stats)?;
        let needs_build = !mismatches.is_empty();

        let marker = ctx.options.resource_output_directory().join(NEEDS_BUILD_FILE);
        ctx.files
            .write_if_changed(&marker, if needs_build { "true" } else { "false" })?;

        if !needs_build {
            tracing::info!("production bundle matches the project");
            return Ok(());
        }

        log_changed_files(&mismatches[..], "Production bundle does not match the project:")?;
        if ctx.options.validation.fail_on_mismatch {
            return Err(TaskError::Validation(format!(
                "production bundle is out of date ({} differences)",
                mismatches.len()
            )));
        }
        tracing::warn!(
            differences = mismatches.len(),
            "production bundle is out of date; a new bundle build is required"
        );
        Ok(())
    }
}

pub struct PackProdBundle;

impl Task for PackProdBundle {
    fn name(&self) -> &str {
        "pack-prod-bundle"
    }

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let webapp = ctx.options.webapp_directory();
        let archive = ctx.options.prod_bundle_file();
        let summary = bundle::pack(&webapp, &archive)?;
        ctx.files.track(&archive)?;
        tracing::info!(files = summary.len(), archive = %archive.display(), "production bundle packed");
        Ok(())
    }
}
