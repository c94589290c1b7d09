//! Generated file tracking
//!
//! `GeneratedFiles` is the single write primitive every pipeline task goes
//! through. It writes only when content differs and remembers every path it
//! was asked about, so callers can tell pipeline-owned files from
//! hand-authored ones without re-deriving that from task logic.

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::domain::ports::{FileSystem, FsError};
use crate::domain::value_objects::normalize_tracked_path;
use crate::error::{FrontgenError, FrontgenResult};
use crate::infrastructure::fs::LocalFs;

/// Tracks files generated or verified during one pipeline run.
///
/// The tracked set only grows. Create one instance per run; instances are
/// not meant to be shared between concurrent runs.
#[derive(Debug)]
pub struct GeneratedFiles<FS = LocalFs> {
    fs: FS,
    files: BTreeSet<PathBuf>,
    changed: BTreeSet<PathBuf>,
}

impl GeneratedFiles<LocalFs> {
    /// Tracker backed by the local file system
    pub fn new() -> Self {
        Self::with_fs(LocalFs::new())
    }
}

impl Default for GeneratedFiles<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<FS: FileSystem> GeneratedFiles<FS> {
    /// Tracker backed by a custom file system (for testing)
    pub fn with_fs(fs: FS) -> Self {
        Self {
            fs,
            files: BTreeSet::new(),
            changed: BTreeSet::new(),
        }
    }

    /// Ensure `path` holds exactly `content`.
    ///
    /// Returns `true` if the file was created or overwritten, `false` if it
    /// already had this content (in which case it is not touched at all).
    /// The path is tracked either way.
    pub fn write_if_changed(&mut self, path: &Path, content: &str) -> FrontgenResult<bool> {
        self.write_bytes_if_changed(path, content.as_bytes())
    }

    /// Byte-level variant of [`write_if_changed`](Self::write_if_changed)
    pub fn write_bytes_if_changed(&mut self, path: &Path, content: &[u8]) -> FrontgenResult<bool> {
        let normalized = normalize(path)?;

        let unchanged = if self.fs.is_file(&normalized) {
            let current = self.fs.read(&normalized).map_err(|source| FrontgenError::Write {
                path: normalized.clone(),
                source,
            })?;
            current == content
        } else {
            false
        };

        if unchanged {
            tracing::debug!(path = %normalized.display(), "generated file unchanged");
        } else {
            self.fs
                .write(&normalized, content)
                .map_err(|source| FrontgenError::Write {
                    path: normalized.clone(),
                    source,
                })?;
            tracing::debug!(path = %normalized.display(), bytes = content.len(), "generated file written");
            self.changed.insert(normalized.clone());
        }

        self.files.insert(normalized);
        Ok(!unchanged)
    }

    /// Record a path produced or verified without going through
    /// `write_if_changed` (e.g. extracted from a bundle).
    pub fn track(&mut self, path: &Path) -> FrontgenResult<()> {
        self.files.insert(normalize(path)?);
        Ok(())
    }

    /// All tracked paths, normalized to absolute form
    pub fn files(&self) -> &BTreeSet<PathBuf> {
        &self.files
    }

    /// Tracked paths strictly below `root`.
    ///
    /// Containment is decided on path components, so `/p/a` does not
    /// contain `/p/ab`. `root` itself is never part of the result.
    pub fn files_under(&self, root: &Path) -> FrontgenResult<BTreeSet<PathBuf>> {
        descendants(&self.files, root)
    }

    /// Tracked paths whose content was actually written in this run
    pub fn changed(&self) -> &BTreeSet<PathBuf> {
        &self.changed
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Members of a tracked set strictly below `root`, compared by path
/// components after normalizing `root`
pub fn descendants(files: &BTreeSet<PathBuf>, root: &Path) -> FrontgenResult<BTreeSet<PathBuf>> {
    let root = normalize(root)?;
    Ok(files
        .iter()
        .filter(|file| file.starts_with(&root) && **file != root)
        .cloned()
        .collect())
}

fn normalize(path: &Path) -> FrontgenResult<PathBuf> {
    normalize_tracked_path(path).map_err(|e| FrontgenError::Write {
        path: path.to_path_buf(),
        source: FsError::from_io(path, e),
    })
}
