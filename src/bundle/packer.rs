//! Archive packer / unpacker
//!
//! Bundles are plain tar archives with deterministic headers (sorted entries,
//! mtime/uid/gid zeroed) so the same tree always packs to the same bytes.

use std::collections::BTreeMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tar::{Archive, Builder, EntryType, Header};

use crate::domain::value_objects::{normalize_tracked_path, ContentHash, EntryPath};
use crate::error::{FrontgenError, FrontgenResult};
use crate::infrastructure::fs::set_owner_writable;

use super::index::{BundleIndex, IndexEntry, INDEX_ENTRY_NAME};

/// What a pack or unpack operation covered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSummary {
    pub entries: Vec<IndexEntry>,
}

impl BundleSummary {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Relative paths of all files, in archive order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }
}

struct SourceFile {
    path: PathBuf,
    entry: EntryPath,
}

/// Pack every regular file below `source_root` into `archive_path`.
///
/// Missing parent directories of the archive are created. The archive is
/// written to a temp file next to it and renamed into place, and is never
/// part of its own contents.
pub fn pack(source_root: &Path, archive_path: &Path) -> FrontgenResult<BundleSummary> {
    if !source_root.is_dir() {
        return Err(FrontgenError::SourceNotFound {
            path: source_root.to_path_buf(),
        });
    }

    let sources = collect_source_files(source_root, archive_path)?;

    let parent = match archive_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;
    let temp = tempfile::Builder::new()
        .prefix(".frontgen-pack-")
        .tempfile_in(&parent)?;

    let mut builder = Builder::new(temp);
    let mut entries = Vec::with_capacity(sources.len());
    for source in &sources {
        let content = fs::read(&source.path)?;
        let mode = file_mode(&fs::metadata(&source.path)?);
        append_file(&mut builder, source.entry.as_str(), &content, mode)?;
        entries.push(IndexEntry {
            path: source.entry.as_str().to_string(),
            size: content.len() as u64,
            mode,
            sha256: ContentHash::from_bytes(&content).hex().to_string(),
        });
    }

    let index = BundleIndex::new(entries);
    let index_bytes = serde_json::to_vec_pretty(&index)?;
    append_file(&mut builder, INDEX_ENTRY_NAME, &index_bytes, 0o644)?;

    let mut temp = builder.into_inner()?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    set_archive_permissions(temp.as_file())?;
    temp.persist(archive_path).map_err(|e| e.error)?;

    tracing::info!(
        source = %source_root.display(),
        archive = %archive_path.display(),
        files = index.files.len(),
        "bundle packed"
    );
    Ok(BundleSummary {
        entries: index.files,
    })
}

fn collect_source_files(source_root: &Path, archive_path: &Path) -> FrontgenResult<Vec<SourceFile>> {
    let archive_identity = normalize_tracked_path(archive_path)?;
    let mut sources = Vec::new();

    let walker = WalkBuilder::new(source_root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for result in walker {
        let entry = result.map_err(|e| std::io::Error::other(e.to_string()))?;
        if entry.depth() == 0 {
            continue;
        }
        let path = entry.path();
        let Some(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            continue;
        }
        if file_type.is_symlink() {
            return Err(FrontgenError::UnsupportedEntry {
                path: path.to_path_buf(),
                message: "bundles must not contain symlinks".to_string(),
            });
        }
        if !file_type.is_file() {
            return Err(FrontgenError::UnsupportedEntry {
                path: path.to_path_buf(),
                message: "bundles may contain only regular files and directories".to_string(),
            });
        }
        if normalize_tracked_path(path)? == archive_identity {
            tracing::debug!(path = %path.display(), "skipping the archive itself");
            continue;
        }

        let relative = path.strip_prefix(source_root).map_err(|_| {
            FrontgenError::UnsupportedEntry {
                path: path.to_path_buf(),
                message: "path is outside the source root".to_string(),
            }
        })?;
        let entry_path = EntryPath::new(relative).map_err(|e| FrontgenError::UnsupportedEntry {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if entry_path.as_str() == INDEX_ENTRY_NAME {
            return Err(FrontgenError::UnsupportedEntry {
                path: path.to_path_buf(),
                message: format!("'{}' is reserved for the bundle index", INDEX_ENTRY_NAME),
            });
        }

        sources.push(SourceFile {
            path: path.to_path_buf(),
            entry: entry_path,
        });
    }

    sources.sort_by(|a, b| a.entry.cmp(&b.entry));
    Ok(sources)
}

fn append_file<W: Write>(
    builder: &mut Builder<W>,
    name: &str,
    content: &[u8],
    mode: u32,
) -> FrontgenResult<()> {
    let mut header = Header::new_gnu();
    header.set_entry_type(EntryType::Regular);
    header.set_size(content.len() as u64);
    header.set_mode(mode);
    header.set_mtime(0);
    header.set_uid(0);
    header.set_gid(0);
    builder.append_data(&mut header, name, content)?;
    Ok(())
}

#[cfg(unix)]
fn file_mode(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn file_mode(metadata: &fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

#[cfg(unix)]
fn set_archive_permissions(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_archive_permissions(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}

/// Restore a bundle into `destination`.
///
/// Extraction happens in a temporary sibling directory. Only after every
/// entry has been read and checked against the bundle index does that
/// directory replace `destination` (any previous content there is removed).
/// On failure `destination` is left exactly as it was.
///
/// Restored files always carry the owner-write bit.
pub fn unpack(archive_path: &Path, destination: &Path) -> FrontgenResult<BundleSummary> {
    if !archive_path.is_file() {
        return Err(FrontgenError::SourceNotFound {
            path: archive_path.to_path_buf(),
        });
    }

    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;
    let staging = tempfile::Builder::new()
        .prefix(".frontgen-unpack-")
        .tempdir_in(&parent)?;

    let index = extract_verified(archive_path, staging.path())?;

    replace_destination(staging.path(), destination, &parent)?;

    tracing::info!(
        archive = %archive_path.display(),
        destination = %destination.display(),
        files = index.files.len(),
        "bundle unpacked"
    );
    Ok(BundleSummary {
        entries: index.files,
    })
}

/// Move `extracted` into `destination`, removing the previous content only
/// once the new tree is in place. On failure `destination` is restored.
fn replace_destination(extracted: &Path, destination: &Path, parent: &Path) -> std::io::Result<()> {
    if fs::symlink_metadata(destination).is_err() {
        return fs::rename(extracted, destination);
    }

    let previous = tempfile::Builder::new()
        .prefix(".frontgen-previous-")
        .tempdir_in(parent)?;
    let aside = previous.path().join("content");
    fs::rename(destination, &aside)?;

    if let Err(err) = fs::rename(extracted, destination) {
        if let Err(restore) = fs::rename(&aside, destination) {
            tracing::error!(
                destination = %destination.display(),
                kept = %aside.display(),
                error = %restore,
                "could not restore previous content"
            );
            // leave the previous content on disk for manual recovery
            let _ = previous.keep();
        }
        return Err(err);
    }
    Ok(())
}

struct Extracted {
    size: u64,
    sha256: String,
}

fn extract_verified(archive_path: &Path, staging: &Path) -> FrontgenResult<BundleIndex> {
    let malformed = |message: String| FrontgenError::MalformedArchive {
        path: archive_path.to_path_buf(),
        message,
    };

    let file = fs::File::open(archive_path)?;
    let archive_len = file.metadata()?.len();
    let mut archive = Archive::new(file);
    let mut extracted: BTreeMap<String, Extracted> = BTreeMap::new();
    let mut index: Option<BundleIndex> = None;

    let entries = archive.entries().map_err(|e| malformed(e.to_string()))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| malformed(e.to_string()))?;
        if index.is_some() {
            return Err(malformed("entries found after the bundle index".to_string()));
        }

        let raw_path = entry.path().map_err(|e| malformed(e.to_string()))?.into_owned();
        let entry_path = EntryPath::new(&raw_path)
            .map_err(|e| malformed(format!("invalid entry path '{}': {}", raw_path.display(), e)))?;
        let entry_type = entry.header().entry_type();

        match entry_type {
            EntryType::Directory => {
                fs::create_dir_all(entry_path.under(staging))?;
                continue;
            }
            EntryType::Regular => {}
            other => {
                return Err(malformed(format!(
                    "unsupported entry type {:?} for '{}'",
                    other, entry_path
                )));
            }
        }

        let expected_size = entry.size();
        let mode = entry.header().mode().map_err(|e| malformed(e.to_string()))?;
        if expected_size > archive_len {
            return Err(malformed(format!(
                "entry '{}' declares {} bytes but the archive holds {}",
                entry_path, expected_size, archive_len
            )));
        }
        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(|e| malformed(e.to_string()))?;
        if content.len() as u64 != expected_size {
            return Err(malformed(format!("entry '{}' is truncated", entry_path)));
        }

        if entry_path.as_str() == INDEX_ENTRY_NAME {
            let parsed: BundleIndex = serde_json::from_slice(&content)
                .map_err(|e| malformed(format!("unreadable bundle index: {}", e)))?;
            if !parsed.is_supported() {
                return Err(malformed(format!(
                    "unsupported bundle index version {}",
                    parsed.version
                )));
            }
            index = Some(parsed);
            continue;
        }

        if extracted.contains_key(entry_path.as_str()) {
            return Err(malformed(format!("duplicate entry '{}'", entry_path)));
        }
        write_restored_file(&entry_path.under(staging), &content, mode)?;
        extracted.insert(
            entry_path.as_str().to_string(),
            Extracted {
                size: expected_size,
                sha256: ContentHash::from_bytes(&content).hex().to_string(),
            },
        );
    }

    let index = index.ok_or_else(|| malformed("missing bundle index (archive truncated?)".to_string()))?;

    if index.files.len() != extracted.len() {
        return Err(malformed(format!(
            "index lists {} files but archive holds {}",
            index.files.len(),
            extracted.len()
        )));
    }
    for expected in &index.files {
        match extracted.get(&expected.path) {
            Some(actual) if actual.size == expected.size && actual.sha256 == expected.sha256 => {}
            Some(_) => {
                return Err(malformed(format!("content hash mismatch for '{}'", expected.path)));
            }
            None => {
                return Err(malformed(format!("'{}' is listed but missing", expected.path)));
            }
        }
    }

    Ok(index)
}

fn write_restored_file(path: &Path, content: &[u8], mode: u32) -> FrontgenResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    let mut permissions = restored_permissions(path, mode)?;
    set_owner_writable(&mut permissions);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(unix)]
fn restored_permissions(_path: &Path, mode: u32) -> FrontgenResult<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::Permissions::from_mode(mode & 0o7777))
}

#[cfg(not(unix))]
fn restored_permissions(path: &Path, _mode: u32) -> FrontgenResult<fs::Permissions> {
    Ok(fs::metadata(path)?.permissions())
}
