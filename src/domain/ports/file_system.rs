//! FileSystem port - abstraction over file I/O operations
//!
//! Lets the artifact generator and the settings store write files without
//! depending on a concrete implementation (local disk, in-memory mock).

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// The file, or the directory it should live in, does not exist
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("I/O error on {}: {message}", .path.display())]
    Other { path: PathBuf, message: String },
}

impl FsError {
    /// Classify an `io::Error` raised while touching `path`
    pub fn from_io(err: &std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::PathNotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Other {
                path: path.to_path_buf(),
                message: err.to_string(),
            },
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with atomic replace
/// - mocks in tests
pub trait FileSystem {
    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Replace the file's full content atomically.
    ///
    /// Must not create missing parent directories; on failure the previous
    /// content stays in place.
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Check if file exists
    fn exists(&self, path: &Path) -> bool;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn read(&self, path: &Path) -> FsResult<String> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        (**self).write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        (**self).create_dir_all(path)
    }
}
