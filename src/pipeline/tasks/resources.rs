//! `copy-frontend-resources`: mirror resource folders into `jar-resources`

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::FrontgenError;
use crate::pipeline::task::{Task, TaskContext, TaskError};

const JAR_RESOURCES_DIR: &str = "jar-resources";

pub struct CopyFrontendResources {
    resource_dirs: Vec<PathBuf>,
}

impl CopyFrontendResources {
    pub fn new(resource_dirs: Vec<PathBuf>) -> Self {
        Self { resource_dirs }
    }
}

impl Task for CopyFrontendResources {
    fn name(&self) -> &str {
        "copy-frontend-resources"
    }

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let target_root = ctx.options.generated_directory().join(JAR_RESOURCES_DIR);
        for dir in &self.resource_dirs {
            if !dir.is_dir() {
                tracing::debug!(dir = %dir.display(), "resource directory missing, skipped");
                continue;
            }
            for file in regular_files(dir)? {
                let relative = file.strip_prefix(dir).map_err(|_| {
                    TaskError::Other(FrontgenError::UnsupportedEntry {
                        path: file.clone(),
                        message: "path is outside the resource directory".to_string(),
                    })
                })?;
                let content = fs::read(&file)?;
                ctx.files
                    .write_bytes_if_changed(&target_root.join(relative), &content)?;
            }
        }
        Ok(())
    }
}

fn regular_files(root: &Path) -> Result<Vec<PathBuf>, TaskError> {
    let mut files = Vec::new();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(true)
        .build();
    for entry in walker {
        let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
        if entry.file_type().is_some_and(|t| t.is_file()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
