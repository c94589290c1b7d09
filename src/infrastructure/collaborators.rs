//! Default collaborator implementations
//!
//! - `ConfiguredScanner`: scan results declared in the `[scan]` config section
//! - `CommandInstaller`: runs the configured package manager command

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use crate::config::{InstallConfig, ScanConfig};
use crate::domain::ports::{FrontendScanner, PackageInstaller};

/// Scanner backed by static configuration
#[derive(Debug, Clone, Default)]
pub struct ConfiguredScanner {
    scan: ScanConfig,
}

impl ConfiguredScanner {
    pub fn new(scan: ScanConfig) -> Self {
        Self { scan }
    }
}

impl FrontendScanner for ConfiguredScanner {
    fn imports(&self) -> Vec<String> {
        self.scan.imports.clone()
    }

    fn packages(&self) -> BTreeMap<String, String> {
        self.scan.packages.clone()
    }

    fn theme(&self) -> Option<String> {
        self.scan.theme.clone().filter(|t| !t.trim().is_empty())
    }
}

/// Installer that shells out to a package manager
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    command: String,
    args: Vec<String>,
}

impl CommandInstaller {
    pub fn new(config: &InstallConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
        }
    }
}

impl PackageInstaller for CommandInstaller {
    fn install(&self, project_dir: &Path) -> Result<(), String> {
        tracing::info!(command = %self.command, args = ?self.args, "running package install");
        let output = Command::new(&self.command)
            .args(&self.args)
            .current_dir(project_dir)
            .output()
            .map_err(|e| format!("failed to start '{}': {}", self.command, e))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!(
            "'{} {}' exited with {}: {}",
            self.command,
            self.args.join(" "),
            output.status,
            stderr.trim()
        ))
    }
}
