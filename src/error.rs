//! Error types for smt-sync
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow` at the edge.

use std::path::PathBuf;

use thiserror::Error;

pub use crate::domain::ports::{CommandError, FsError, StoreError};
pub use crate::domain::value_objects::ErrorKind;

/// Result type alias for a synchronization cycle
pub type SyncResult<T> = Result<T, SyncError>;

/// Rejected form input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field absent, or present but blank
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// Not a whole number, or below 1
    #[error("field '{0}' must be a whole number of at least 1")]
    OutOfRange(&'static str),

    /// Value outside the enumerated set (field, allowed values)
    #[error("field '{0}' must be one of: {allowed}", allowed = .1.join(", "))]
    InvalidEnum(&'static str, &'static [&'static str]),
}

impl ValidationError {
    /// Name of the offending form field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(f)
            | ValidationError::OutOfRange(f)
            | ValidationError::InvalidEnum(f, _) => f,
        }
    }
}

/// The tool's own configuration could not be loaded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cannot read config file {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("invalid config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid {var} value '{value}': expected {expected}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Any failure inside a synchronization cycle
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("invalid settings: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed to save settings: {0}")]
    Store(#[from] StoreError),

    #[error("failed to write artifact: {0}")]
    Artifact(#[from] FsError),

    #[error("service command failed: {0}")]
    Command(#[from] CommandError),
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Validation(_) => ErrorKind::Validation,
            SyncError::Store(_) => ErrorKind::Store,
            SyncError::Artifact(_) => ErrorKind::Io,
            SyncError::Command(_) => ErrorKind::Command,
        }
    }

    /// The underlying error's message without the step prefix
    pub fn detail(&self) -> String {
        match self {
            SyncError::Validation(e) => e.to_string(),
            SyncError::Store(e) => e.to_string(),
            SyncError::Artifact(e) => e.to_string(),
            SyncError::Command(e) => e.to_string(),
        }
    }
}
