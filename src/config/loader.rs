//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FrontgenError, FrontgenResult};

use super::types::Options;

/// Project-level configuration file name
pub const PROJECT_CONFIG_FILE: &str = "frontgen.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> FrontgenResult<(Options, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let options: Options = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| FrontgenError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((options, warnings))
}

/// Load from project config, user config, or defaults.
///
/// The returned options are always rooted at `project_dir`: a relative
/// `project_dir` inside a config file is resolved against it.
pub fn load_or_default(project_dir: &Path) -> FrontgenResult<(Options, Vec<ConfigWarning>)> {
    let project_config = project_dir.join(PROJECT_CONFIG_FILE);
    let (options, warnings) = if project_config.is_file() {
        tracing::debug!(path = %project_config.display(), "loading project configuration");
        load_with_warnings(&project_config)?
    } else if let Some(user_config) = user_config_file().filter(|p| p.is_file()) {
        tracing::debug!(path = %user_config.display(), "loading user configuration");
        load_with_warnings(&user_config)?
    } else {
        (Options::default(), Vec::new())
    };

    Ok((rooted_at(options, project_dir), warnings))
}

/// Load an explicit configuration file for `project_dir`
pub fn load_file_for_project(
    config_file: &Path,
    project_dir: &Path,
) -> FrontgenResult<(Options, Vec<ConfigWarning>)> {
    let (options, warnings) = load_with_warnings(config_file)?;
    Ok((rooted_at(options, project_dir), warnings))
}

fn rooted_at(mut options: Options, project_dir: &Path) -> Options {
    if options.project_dir == Path::new(".") {
        options.project_dir = project_dir.to_path_buf();
    } else if options.project_dir.is_relative() {
        options.project_dir = project_dir.join(&options.project_dir);
    }
    options
}

/// `<config dir>/frontgen/config.toml`
fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("frontgen").join("config.toml"))
}

/// Apply environment variable overrides (FRONTGEN_* prefix)
pub fn with_env_overrides(options: Options) -> Options {
    apply_overrides(options, |name| std::env::var(name).ok())
}

fn apply_overrides(mut options: Options, var: impl Fn(&str) -> Option<String>) -> Options {
    let flag = |name: &str| var(name).map(|v| parse_bool(&v));

    if let Some(value) = flag("FRONTGEN_PRODUCTION_MODE") {
        options.features.production_mode = value;
    }
    if let Some(value) = flag("FRONTGEN_BUNDLE_BUILD") {
        options.features.bundle_build = value;
    }
    if let Some(value) = flag("FRONTGEN_COMMERCIAL_BANNER") {
        options.features.commercial_banner = value;
    }
    if let Some(value) = flag("FRONTGEN_RUN_PACKAGE_INSTALL") {
        options.features.run_package_install = value;
    }

    options
}

fn parse_bool(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value != "false" && value != "0" && !value.is_empty()
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "project_dir",
        "frontend_dir",
        "generated_dir",
        "build_dir",
        "resources_dir",
        "bundles_dir",
        "features",
        "production_mode",
        "bundle_build",
        "commercial_banner",
        "packages_update",
        "imports_update",
        "run_package_install",
        "embeddable_web_components",
        "create_missing_package_json",
        "pack_bundle",
        "scan",
        "imports",
        "packages",
        "theme",
        "copy",
        "resource_dirs",
        "install",
        "command",
        "args",
        "endpoint",
        "enabled",
        "openapi_file",
        "validation",
        "fail_on_mismatch",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
pub(super) fn apply_overrides_for_test(
    options: Options,
    vars: &[(&str, &str)],
) -> Options {
    apply_overrides(options, |name| {
        vars.iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.to_string())
    })
}
