//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ConfigWarning;
use crate::error::ConfigError;

use super::loader;

/// Where the plugin settings are stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("/usr/local/etc/smt/settings.toml")
}

/// Where the daemon's config.yaml is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default = "default_artifact_path")]
    pub path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            path: default_artifact_path(),
        }
    }
}

fn default_artifact_path() -> PathBuf {
    PathBuf::from("/usr/local/opnsense/mvc/app/plugins/smt/etc/opnsense/scripts/smt/config.yaml")
}

/// How the SMT service is controlled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name passed to the service manager
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Service manager executable
    #[serde(default = "default_service_program")]
    pub program: String,

    /// Seconds before a start/stop command is killed
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            program: default_service_program(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_service_name() -> String {
    "smt".to_string()
}

fn default_service_program() -> String {
    "service".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub artifact: ArtifactConfig,

    #[serde(default)]
    pub service: ServiceConfig,
}

impl AppConfig {
    /// Load from an explicit file, the user config, or defaults, then apply
    /// `SMT_*` environment overrides
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::discover(explicit)
    }
}
