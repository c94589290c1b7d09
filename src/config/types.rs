//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::FrontgenResult;

use super::loader::{self, ConfigWarning};

/// Default frontend source folder, relative to the project dir
pub const DEFAULT_FRONTEND_DIR: &str = "src/main/frontend";
/// Default generated folder name inside the frontend folder
pub const DEFAULT_GENERATED_DIR: &str = "generated";
/// Default build output folder, relative to the project dir
pub const DEFAULT_BUILD_DIR: &str = "target";
/// Default folder holding pre-built bundles, relative to the project dir
pub const DEFAULT_BUNDLES_DIR: &str = "src/main/bundles";

/// Boolean toggles that decide which tasks the pipeline assembles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureToggles {
    #[serde(default)]
    pub production_mode: bool,

    /// Build a fresh bundle instead of reusing `prod.bundle`
    #[serde(default)]
    pub bundle_build: bool,

    #[serde(default)]
    pub commercial_banner: bool,

    #[serde(default = "default_true")]
    pub packages_update: bool,

    #[serde(default = "default_true")]
    pub imports_update: bool,

    #[serde(default)]
    pub run_package_install: bool,

    #[serde(default)]
    pub embeddable_web_components: bool,

    #[serde(default = "default_true")]
    pub create_missing_package_json: bool,

    /// Pack the built webapp into `prod.bundle` after a bundle build
    #[serde(default)]
    pub pack_bundle: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            production_mode: false,
            bundle_build: false,
            commercial_banner: false,
            packages_update: true,
            imports_update: true,
            run_package_install: false,
            embeddable_web_components: false,
            create_missing_package_json: true,
            pack_bundle: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Static scan results used by `ConfiguredScanner`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScanConfig {
    /// Module specifiers the application imports, in discovery order
    #[serde(default)]
    pub imports: Vec<String>,

    /// npm package name -> version range
    #[serde(default)]
    pub packages: BTreeMap<String, String>,

    /// Application theme name
    #[serde(default)]
    pub theme: Option<String>,
}

/// Resource folders copied into `generated/jar-resources`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CopyConfig {
    #[serde(default)]
    pub resource_dirs: Vec<PathBuf>,
}

/// Package manager invocation for the install task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallConfig {
    #[serde(default = "default_install_command")]
    pub command: String,

    #[serde(default = "default_install_args")]
    pub args: Vec<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            command: default_install_command(),
            args: default_install_args(),
        }
    }
}

fn default_install_command() -> String {
    "npm".to_string()
}

fn default_install_args() -> Vec<String> {
    vec!["install".to_string()]
}

/// Endpoint (OpenAPI / TypeScript client) generation subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EndpointConfig {
    /// Set when the project is detected to use endpoints
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub openapi_file: Option<PathBuf>,
}

/// Bundle validation policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Turn a bundle/project mismatch into a task failure
    #[serde(default)]
    pub fail_on_mismatch: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fail_on_mismatch: false,
        }
    }
}

/// Main configuration structure
///
/// Read-only once the pipeline is built. Relative directories are resolved
/// against `project_dir` by the accessor methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default = "default_project_dir")]
    pub project_dir: PathBuf,

    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: PathBuf,

    /// Defaults to `<frontend_dir>/generated`
    #[serde(default)]
    pub generated_dir: Option<PathBuf>,

    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Defaults to `<build_dir>/classes`
    #[serde(default)]
    pub resources_dir: Option<PathBuf>,

    #[serde(default = "default_bundles_dir")]
    pub bundles_dir: PathBuf,

    #[serde(default)]
    pub features: FeatureToggles,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub copy: CopyConfig,

    #[serde(default)]
    pub install: InstallConfig,

    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

fn default_project_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_frontend_dir() -> PathBuf {
    PathBuf::from(DEFAULT_FRONTEND_DIR)
}

fn default_build_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BUILD_DIR)
}

fn default_bundles_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BUNDLES_DIR)
}

impl Default for Options {
    fn default() -> Self {
        Self {
            project_dir: default_project_dir(),
            frontend_dir: default_frontend_dir(),
            generated_dir: None,
            build_dir: default_build_dir(),
            resources_dir: None,
            bundles_dir: default_bundles_dir(),
            features: FeatureToggles::default(),
            scan: ScanConfig::default(),
            copy: CopyConfig::default(),
            install: InstallConfig::default(),
            endpoint: EndpointConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl Options {
    /// Default options rooted at `project_dir`
    pub fn for_project(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> FrontgenResult<Self> {
        let (options, _warnings) = loader::load_with_warnings(path)?;
        Ok(options)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> FrontgenResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_dir: &Path) -> FrontgenResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_dir)
    }

    /// Load an explicit config file, rooted at `project_dir`
    pub fn load_for_project(
        config_file: &Path,
        project_dir: &Path,
    ) -> FrontgenResult<(Self, Vec<ConfigWarning>)> {
        loader::load_file_for_project(config_file, project_dir)
    }

    /// Apply environment variable overrides (FRONTGEN_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn with_production_mode(mut self, production_mode: bool) -> Self {
        self.features.production_mode = production_mode;
        self
    }

    pub fn with_bundle_build(mut self, bundle_build: bool) -> Self {
        self.features.bundle_build = bundle_build;
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }

    /// npm / project root
    pub fn project_directory(&self) -> PathBuf {
        self.project_dir.clone()
    }

    pub fn frontend_directory(&self) -> PathBuf {
        self.resolve(&self.frontend_dir)
    }

    pub fn generated_directory(&self) -> PathBuf {
        match &self.generated_dir {
            Some(dir) => self.resolve(dir),
            None => self.frontend_directory().join(DEFAULT_GENERATED_DIR),
        }
    }

    pub fn build_directory(&self) -> PathBuf {
        self.resolve(&self.build_dir)
    }

    /// Output directory for non-served generated resources
    pub fn resource_output_directory(&self) -> PathBuf {
        match &self.resources_dir {
            Some(dir) => self.resolve(dir),
            None => self.build_directory().join("classes"),
        }
    }

    /// Where the served production webapp lives after a build or unpack
    pub fn webapp_directory(&self) -> PathBuf {
        self.resource_output_directory()
            .join("META-INF")
            .join("VAADIN")
            .join("webapp")
    }

    pub fn bundles_directory(&self) -> PathBuf {
        self.resolve(&self.bundles_dir)
    }

    /// Location of the pre-built production bundle
    pub fn prod_bundle_file(&self) -> PathBuf {
        self.bundles_directory().join(crate::bundle::PROD_BUNDLE_FILE)
    }

    /// Resource folders to copy, resolved against the project dir
    pub fn resource_dirs(&self) -> Vec<PathBuf> {
        self.copy.resource_dirs.iter().map(|p| self.resolve(p)).collect()
    }
}
