//! Configuration module for frontgen
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (FRONTGEN_*)
//! 3. Project config (`<project>/frontgen.toml`)
//! 4. User config (`<config dir>/frontgen/config.toml`)
//! 5. Built-in defaults (lowest priority)
//!
//! The library never reads the environment on its own; only the loader
//! entry points do, and the resulting `Options` value is passed explicitly.

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{
    CopyConfig, EndpointConfig, FeatureToggles, InstallConfig, Options, ScanConfig,
    ValidationConfig, DEFAULT_BUILD_DIR, DEFAULT_BUNDLES_DIR, DEFAULT_FRONTEND_DIR,
    DEFAULT_GENERATED_DIR,
};
