//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod hash;
mod logging_level;
mod raw_settings;
mod sync_state;

pub use config_warning::ConfigWarning;
pub use hash::ContentHash;
pub use logging_level::{LoggingLevel, UnknownLoggingLevel};
pub use raw_settings::{fields, RawSettings, RawValue};
pub use sync_state::{ErrorKind, ServiceAction, SyncState};
