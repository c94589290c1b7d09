//! Tests for generated file tracking

use super::*;
use crate::domain::ports::FsResult;
use std::collections::BTreeSet;
use std::fs;
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

#[test]
fn write_twice_with_same_content_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("generated/index.ts");
    let mut files = GeneratedFiles::new();

    let first = files.write_if_changed(&path, "export {};\n").unwrap();
    let second = files.write_if_changed(&path, "export {};\n").unwrap();

    assert!(first);
    assert!(!second);
    assert_eq!(fs::read_to_string(&path).unwrap(), "export {};\n");
}

#[test]
fn changed_content_is_detected_and_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("file.txt");
    fs::write(&path, "OLD").unwrap();
    let mut files = GeneratedFiles::new();

    assert!(files.write_if_changed(&path, "NEW").unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "NEW");
    assert!(!files.write_if_changed(&path, "NEW").unwrap());
}

#[test]
fn missing_parent_directories_are_created() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a/b/c/deep.js");
    let mut files = GeneratedFiles::new();

    assert!(files.write_if_changed(&path, "x").unwrap());
    assert!(path.is_file());
}

#[test]
fn unchanged_write_does_not_touch_mtime() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stable.txt");
    fs::write(&path, "same").unwrap();
    let old = SystemTime::now() - Duration::from_secs(3600);
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(old)
        .unwrap();
    let before = fs::metadata(&path).unwrap().modified().unwrap();

    let mut files = GeneratedFiles::new();
    assert!(!files.write_if_changed(&path, "same").unwrap());

    let after = fs::metadata(&path).unwrap().modified().unwrap();
    assert_eq!(before, after);
}

#[test]
fn tracking_is_independent_of_write_outcome() {
    let dir = tempdir().unwrap();
    let existing = dir.path().join("existing.txt");
    fs::write(&existing, "kept").unwrap();
    let fresh = dir.path().join("fresh.txt");
    let replaced = dir.path().join("replaced.txt");
    fs::write(&replaced, "before").unwrap();

    let mut files = GeneratedFiles::new();
    files.write_if_changed(&existing, "kept").unwrap();
    files.write_if_changed(&fresh, "new").unwrap();
    files.write_if_changed(&replaced, "after").unwrap();

    let expected: BTreeSet<PathBuf> = [&existing, &fresh, &replaced]
        .iter()
        .map(|p| normalize_tracked_path(p).unwrap())
        .collect();
    assert_eq!(files.files(), &expected);
    assert_eq!(files.changed().len(), 2);
    assert!(!files.changed().contains(&normalize_tracked_path(&existing).unwrap()));
}

#[test]
fn equivalent_spellings_are_tracked_once() {
    let dir = tempdir().unwrap();
    let mut files = GeneratedFiles::new();

    files
        .write_if_changed(&dir.path().join("x/../file.txt"), "1")
        .unwrap();
    files
        .write_if_changed(&dir.path().join("./file.txt"), "1")
        .unwrap();

    assert_eq!(files.len(), 1);
}

#[test]
fn files_under_filters_by_path_components() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let mut files = GeneratedFiles::new();
    for rel in ["a/b/c.txt", "a/z/n.txt", "a/z/y.txt", "test.txt"] {
        files.write_if_changed(&root.join(rel), rel).unwrap();
    }

    assert_eq!(files.files_under(&root.join("a")).unwrap().len(), 3);
    assert_eq!(files.files_under(&root.join("a/z")).unwrap().len(), 2);
    assert_eq!(files.files_under(root).unwrap().len(), 4);
}

#[test]
fn files_under_does_not_match_string_prefix_or_root_itself() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let mut files = GeneratedFiles::new();
    files.write_if_changed(&root.join("ab/file.txt"), "x").unwrap();
    files.write_if_changed(&root.join("a"), "a is a file").unwrap();

    assert!(files.files_under(&root.join("a")).unwrap().is_empty());
}

#[test]
fn track_records_without_writing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("extracted.js");
    let mut files = GeneratedFiles::new();

    files.track(&path).unwrap();

    assert!(files.files().contains(&normalize_tracked_path(&path).unwrap()));
    assert!(files.changed().is_empty());
    assert!(!path.exists());
}

struct FailingFs;

impl FileSystem for FailingFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        Err(FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, _content: &[u8]) -> FsResult<()> {
        Err(FsError::PermissionDenied(path.to_path_buf()))
    }

    fn is_file(&self, _path: &Path) -> bool {
        false
    }

    fn create_dir_all(&self, _path: &Path) -> FsResult<()> {
        Ok(())
    }
}

#[test]
fn write_failure_propagates_and_is_not_tracked() {
    let mut files = GeneratedFiles::with_fs(FailingFs);

    let err = files
        .write_if_changed(Path::new("/nowhere/out.txt"), "content")
        .unwrap_err();

    assert!(matches!(
        err,
        FrontgenError::Write {
            source: FsError::PermissionDenied(_),
            ..
        }
    ));
    assert!(files.is_empty());
}

#[test]
fn write_into_non_directory_parent_fails() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "file").unwrap();
    let mut files = GeneratedFiles::new();

    assert!(files.write_if_changed(&blocker.join("child.txt"), "x").is_err());
    assert!(files.is_empty());
}
