//! Configuration module for smt-sync
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SMT_*)
//! 3. Config file (`--config`, else ~/.config/smt-sync/config.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    user_config_path, with_env_overrides, ENV_ARTIFACT_PATH, ENV_COMMAND_TIMEOUT,
    ENV_SERVICE_NAME, ENV_SERVICE_PROGRAM, ENV_STORE_PATH,
};
pub use types::{AppConfig, ArtifactConfig, ServiceConfig, StoreConfig};
