//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod command_runner;
pub mod file_system;
pub mod settings_repository;
pub mod sync_events;

pub use command_runner::{CommandError, CommandOutput, CommandRunner, CommandSpec};
pub use file_system::{FileSystem, FsError, FsResult};
pub use settings_repository::{SettingsRepository, StoreError, StoreLock, StoreResult};
pub use sync_events::{FanoutEventSink, NoopEventSink, SyncEvent, SyncEventSink};
