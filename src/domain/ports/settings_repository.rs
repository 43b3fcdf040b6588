//! SettingsRepository port - durable storage of the plugin settings
//!
//! The host owns the canonical configuration store; this trait is the only
//! thing the synchronization core knows about it.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::SettingsModel;

/// Result type for settings store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Settings store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be read or written
    #[error("settings store unavailable at {}: {message}", .path.display())]
    Unavailable { path: PathBuf, message: String },

    /// A stored document exists but does not decode to valid settings
    #[error("settings store at {} is corrupted: {message}", .path.display())]
    Corrupted { path: PathBuf, message: String },
}

/// Exclusive hold on a settings store, released when dropped
///
/// A sync cycle keeps one of these from persisting the model until the
/// service has been reconciled, so two cycles never interleave their store
/// and artifact writes.
#[must_use = "the store is released as soon as the lock is dropped"]
pub struct StoreLock {
    held: Option<Box<dyn Send>>,
}

impl StoreLock {
    /// Wrap a guard whose `Drop` releases the store
    pub fn new(guard: impl Send + 'static) -> Self {
        Self {
            held: Some(Box::new(guard)),
        }
    }

    /// A lock for stores that have no other writers
    pub fn uncontended() -> Self {
        Self { held: None }
    }

    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }
}

impl std::fmt::Debug for StoreLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreLock")
            .field("held", &self.is_held())
            .finish()
    }
}

/// Durable settings storage
///
/// `persist` must be atomic (all fields or none become visible to a later
/// `load`) and idempotent. Concurrent calls are serialized by the
/// implementation; the last writer wins.
pub trait SettingsRepository {
    /// Load the stored settings, or the defaults if nothing was saved yet
    fn load(&self) -> StoreResult<SettingsModel>;

    /// Store the complete model
    fn persist(&self, model: &SettingsModel) -> StoreResult<()>;

    /// Human-readable location of the store, for logs and events
    fn location(&self) -> String;

    /// Block until no other sync cycle holds the store
    ///
    /// `persist` stays callable by the lock owner while the lock is alive.
    fn lock(&self) -> StoreResult<StoreLock> {
        Ok(StoreLock::uncontended())
    }

    /// Like `load`, but falls back to defaults when the store is unreadable
    fn load_or_default(&self) -> SettingsModel {
        self.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default settings");
            SettingsModel::default()
        })
    }
}

impl<T: SettingsRepository + ?Sized> SettingsRepository for &T {
    fn load(&self) -> StoreResult<SettingsModel> {
        (**self).load()
    }

    fn persist(&self, model: &SettingsModel) -> StoreResult<()> {
        (**self).persist(model)
    }

    fn location(&self) -> String {
        (**self).location()
    }

    fn lock(&self) -> StoreResult<StoreLock> {
        (**self).lock()
    }
}
