//! smt-sync - settings synchronization for the SMT (Social Media Timeout)
//! firewall plugin
//!
//! Takes the plugin's form settings, validates them, stores them, regenerates
//! the `config.yaml` read by the blocking daemon, and starts or stops the
//! `smt` service to match the `enable_service` checkbox.
//!
//! ## Layers
//!
//! - `domain` - settings model, validation, artifact generation, ports
//! - `application` - the sync and status use cases
//! - `infrastructure` - TOML store, local file system, command runner, event sinks
//! - `config` - the tool's own configuration
//! - `presentation` - CLI definitions, wiring and output

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{ReconciliationOutcome, SyncReport, SyncUseCase};
pub use config::AppConfig;
pub use domain::entities::SettingsModel;
pub use domain::services::{generate, validate, ArtifactDocument};
pub use domain::value_objects::{LoggingLevel, RawSettings, ServiceAction, SyncState};
pub use error::{SyncError, SyncResult, ValidationError};
