//! External collaborator ports
//!
//! The component scanner and the package manager live outside this crate.
//! The pipeline only sees them through these traits.

use std::collections::BTreeMap;
use std::path::Path;

/// Discovers what the application needs from the frontend build.
pub trait FrontendScanner {
    /// Module specifiers to import, in discovery order (may repeat)
    fn imports(&self) -> Vec<String>;

    /// npm package name -> version range
    fn packages(&self) -> BTreeMap<String, String>;

    /// Name of the application theme, if any
    fn theme(&self) -> Option<String>;
}

/// Runs the package manager for a project.
pub trait PackageInstaller {
    /// Install dependencies declared in `<project_dir>/package.json`.
    ///
    /// The error string is the diagnostic shown to the user.
    fn install(&self, project_dir: &Path) -> Result<(), String>;
}
