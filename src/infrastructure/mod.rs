//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system with atomic replace
//! - `repositories/` - TOML settings store
//! - `command/` - Child-process command runner with deadlines
//! - `events/` - Sync event sinks (JSON, tracing)

pub mod command;
pub mod events;
pub mod fs;
pub mod repositories;

pub use command::SystemCommandRunner;
pub use events::{JsonEventSink, TracingEventSink};
pub use fs::LocalFs;
pub use repositories::TomlSettingsRepository;
