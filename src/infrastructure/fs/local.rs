//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Permission bits for newly generated files
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Local file system implementation
///
/// Writes go through a temp file in the target directory followed by a
/// rename, so a failed write never leaves half-applied content behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        fs::read(path).map_err(|e| FsError::from_io(path, e))
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| FsError::from_io(parent, e))?;

        // Keep the mode of the file being replaced, plus owner-write.
        let previous = fs::metadata(path).ok().map(|m| m.permissions());

        let mut temp = tempfile::Builder::new()
            .prefix(".frontgen-")
            .suffix(".tmp")
            .tempfile_in(parent)
            .map_err(|e| FsError::from_io(parent, e))?;
        temp.write_all(content)
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| FsError::from_io(temp.path(), e))?;

        let permissions = match previous {
            Some(mut permissions) => {
                set_owner_writable(&mut permissions);
                permissions
            }
            None => new_file_permissions(temp.as_file())?,
        };
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|e| FsError::from_io(path, e))?;

        temp.persist(path)
            .map_err(|e| FsError::from_io(path, e.error))?;
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(path).map_err(|e| FsError::from_io(path, e))
    }
}

#[cfg(unix)]
fn new_file_permissions(_file: &fs::File) -> FsResult<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn new_file_permissions(file: &fs::File) -> FsResult<fs::Permissions> {
    let mut permissions = file
        .metadata()
        .map_err(|e| FsError::from_io(Path::new("."), e))?
        .permissions();
    set_owner_writable(&mut permissions);
    Ok(permissions)
}

/// Add the owner-write bit (clear read-only on non-Unix platforms).
pub fn set_owner_writable(permissions: &mut fs::Permissions) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        permissions.set_mode(permissions.mode() | 0o200);
    }
    #[cfg(not(unix))]
    {
        #[allow(clippy::permissions_set_readonly_false)]
        permissions.set_readonly(false);
    }
}
