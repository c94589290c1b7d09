//! Common test utilities for frontgen integration tests.
//!
//! - Fake collaborators: `StaticScanner`, `CountingInstaller`,
//!   `CountingEndpointFactory`
//! - Project helpers: `write_file`, `services_with`

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use frontgen::config::Options;
use frontgen::domain::ports::{FrontendScanner, PackageInstaller};
use frontgen::pipeline::{EndpointTaskFactory, Services, Task, TaskContext, TaskError};

/// Scanner returning fixed results
#[derive(Debug, Clone, Default)]
pub struct StaticScanner {
    pub imports: Vec<String>,
    pub packages: BTreeMap<String, String>,
    pub theme: Option<String>,
}

impl StaticScanner {
    pub fn with_imports(imports: &[&str]) -> Self {
        Self {
            imports: imports.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn package(mut self, name: &str, version: &str) -> Self {
        self.packages.insert(name.to_string(), version.to_string());
        self
    }
}

impl FrontendScanner for StaticScanner {
    fn imports(&self) -> Vec<String> {
        self.imports.clone()
    }

    fn packages(&self) -> BTreeMap<String, String> {
        self.packages.clone()
    }

    fn theme(&self) -> Option<String> {
        self.theme.clone()
    }
}

/// Installer that records calls instead of running npm
#[derive(Debug, Default)]
pub struct CountingInstaller {
    pub calls: AtomicUsize,
    pub failure: Option<String>,
}

impl CountingInstaller {
    pub fn failing(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: Some(message.to_string()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PackageInstaller for CountingInstaller {
    fn install(&self, _project_dir: &Path) -> Result<(), String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(message.clone()),
            None => Ok(()),
        }
    }
}

/// Endpoint subsystem double counting factory and task invocations
#[derive(Debug, Default)]
pub struct CountingEndpointFactory {
    pub creates: Arc<AtomicUsize>,
    pub executes: Arc<AtomicUsize>,
}

impl CountingEndpointFactory {
    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn executes(&self) -> usize {
        self.executes.load(Ordering::SeqCst)
    }
}

struct CountingEndpointTask {
    executes: Arc<AtomicUsize>,
}

impl Task for CountingEndpointTask {
    fn name(&self) -> &str {
        "generate-endpoints"
    }

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        self.executes.fetch_add(1, Ordering::SeqCst);
        let target = ctx.options.generated_directory().join("endpoints.ts");
        ctx.files.write_if_changed(&target, "export {};\n")?;
        Ok(())
    }
}

impl EndpointTaskFactory for CountingEndpointFactory {
    fn create_task(&self, _options: &Options) -> Box<dyn Task> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        Box::new(CountingEndpointTask {
            executes: self.executes.clone(),
        })
    }
}

pub fn services_with(scanner: StaticScanner) -> (Services, Arc<CountingInstaller>) {
    let installer = Arc::new(CountingInstaller::default());
    let services = Services::new(Arc::new(scanner), installer.clone());
    (services, installer)
}

pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Relative paths of all regular files below `root`, sorted
pub fn list_files(root: &Path) -> Vec<String> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    let mut out = Vec::new();
    if root.exists() {
        walk(root, root, &mut out);
    }
    out.sort();
    out
}

#[cfg(unix)]
pub fn mode_of(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).unwrap().permissions().mode() & 0o7777
}

pub fn make_read_only(path: &Path) {
    let mut permissions = fs::metadata(path).unwrap().permissions();
    permissions.set_readonly(true);
    fs::set_permissions(path, permissions).unwrap();
}

pub fn is_writable(path: &Path) -> bool {
    !fs::metadata(path).unwrap().permissions().readonly()
}
