//! Domain Layer
//!
//! The settings model and the rules around it, without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - `SettingsModel`
//! - `value_objects/` - Immutable value types (LoggingLevel, RawSettings, SyncState, ContentHash)
//! - `services/` - Validator, ArtifactGenerator, ServiceReconciler, Differ
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No direct I/O** - files and processes are reached through ports
//! 2. **Validated construction** - a `SettingsModel` only exists after validation
//! 3. **Ports & Adapters** - infrastructure implements the traits in `ports/`

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
