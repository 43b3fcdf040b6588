//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go to a temporary file in the destination directory, are flushed to
/// disk, then renamed over the destination. Readers see either the old or the
/// new content, never a truncated file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

/// Mode for files that did not exist before: 0644, readable by the daemon
#[cfg(unix)]
fn new_file_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<std::fs::Permissions> {
    None
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::from_io(&e, path))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.is_dir() {
            return Err(FsError::PathNotFound(dir.to_path_buf()));
        }

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| FsError::from_io(&e, path))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| FsError::from_io(&e, path))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| FsError::from_io(&e, path))?;

        // Keep the mode of the file being replaced; a fresh tempfile is 0600.
        let permissions = match std::fs::metadata(path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => new_file_permissions(),
        };
        if let Some(permissions) = permissions {
            std::fs::set_permissions(tmp.path(), permissions)
                .map_err(|e| FsError::from_io(&e, path))?;
        }

        tmp.persist(path)
            .map_err(|e| FsError::from_io(&e.error, path))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "file replaced");
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::from_io(&e, path))
    }
}
