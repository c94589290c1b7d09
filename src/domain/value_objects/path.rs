//! Path Value Objects
//!
//! - `EntryPath`: a validated relative path stored inside a bundle
//!   (no traversal, no root, forward-slash separated)
//! - `normalize_tracked_path`: the identity used for tracked generated files

use std::fmt;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Error when entry path validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Path contains traversal components (..)
    #[error("path contains traversal components (..)")]
    ContainsTraversal,
    /// Path is absolute when relative is required
    #[error("absolute paths are not allowed")]
    AbsoluteNotAllowed,
    /// Path is empty
    #[error("path is empty")]
    Empty,
    /// Path is not valid UTF-8
    #[error("path is not valid UTF-8")]
    NotUtf8,
}

/// A validated relative path of a bundle entry
///
/// Always stored with `/` separators so bundles packed on one platform
/// unpack identically on another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryPath(String);

impl EntryPath {
    /// Create a new EntryPath after validation
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();
        let mut parts = Vec::new();

        for component in path.components() {
            match component {
                Component::Normal(part) => {
                    parts.push(part.to_str().ok_or(PathError::NotUtf8)?);
                }
                Component::CurDir => {}
                Component::ParentDir => return Err(PathError::ContainsTraversal),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(PathError::AbsoluteNotAllowed)
                }
            }
        }

        if parts.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self(parts.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve under a destination root using platform separators
    pub fn under(&self, root: &Path) -> PathBuf {
        self.0.split('/').fold(root.to_path_buf(), |acc, part| acc.join(part))
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for EntryPath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Normalize a path into its tracked identity.
///
/// Relative paths are made absolute against the current directory, `.` is
/// dropped and `..` is resolved lexically (symlinks are not followed, so the
/// file does not need to exist). On Windows the result is lower-cased since
/// the file system is case-insensitive.
pub fn normalize_tracked_path(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    if cfg!(windows) {
        Ok(PathBuf::from(normalized.to_string_lossy().to_lowercase()))
    } else {
        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_relative_path() {
        let path = EntryPath::new("config/stats.json").unwrap();
        assert_eq!(path.as_str(), "config/stats.json");
    }

    #[test]
    fn current_dir_components_are_dropped() {
        let path = EntryPath::new("./config/./stats.json").unwrap();
        assert_eq!(path.as_str(), "config/stats.json");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(EntryPath::new(""), Err(PathError::Empty));
        assert_eq!(EntryPath::new("."), Err(PathError::Empty));
    }

    #[test]
    fn rejects_hidden_traversal() {
        let result = EntryPath::new("a/b/../../../escape");
        assert_eq!(result, Err(PathError::ContainsTraversal));
    }

    #[test]
    fn rejects_absolute() {
        #[cfg(windows)]
        let absolute_path = "C:\\Windows\\System32";
        #[cfg(not(windows))]
        let absolute_path = "/etc/passwd";

        assert_eq!(
            EntryPath::new(absolute_path),
            Err(PathError::AbsoluteNotAllowed)
        );
    }

    #[test]
    fn under_joins_each_segment() {
        let path = EntryPath::new("a/b/c.txt").unwrap();
        assert_eq!(
            path.under(Path::new("/dest")),
            Path::new("/dest").join("a").join("b").join("c.txt")
        );
    }

    #[cfg(unix)]
    #[test]
    fn normalize_resolves_dot_segments() {
        let normalized = normalize_tracked_path(Path::new("/root/a/./b/../c.txt")).unwrap();
        assert_eq!(normalized, Path::new("/root/a/c.txt"));
    }

    #[test]
    fn normalize_makes_relative_paths_absolute() {
        let normalized = normalize_tracked_path(Path::new("some/file.txt")).unwrap();
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("file.txt"));
    }
}
