//! Settings Entity
//!
//! The validated, typed configuration of the SMT plugin. A model is built
//! either from the settings store or from submitted form input, and never
//! mutated afterwards: saving produces a new model.

use serde::Serialize;

use crate::domain::value_objects::{fields, LoggingLevel, RawSettings};

/// Validated SMT plugin settings
///
/// Outside this crate the only ways to obtain one are
/// [`validate`](crate::domain::services::validate) and [`Default`], so every
/// instance satisfies the field constraints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SettingsModel {
    pub(crate) unbound_reload_command: String,
    pub(crate) blocklist_repo_url: String,
    pub(crate) blocklist_local_path: String,
    pub(crate) usage_threshold_hours: u32,
    pub(crate) block_duration_minutes: u32,
    pub(crate) unbound_log_file: String,
    pub(crate) rpz_file: String,
    pub(crate) logging_level: LoggingLevel,
    pub(crate) logging_file: String,
    pub(crate) enable_service: bool,
}

impl SettingsModel {
    pub fn unbound_reload_command(&self) -> &str {
        &self.unbound_reload_command
    }

    pub fn blocklist_repo_url(&self) -> &str {
        &self.blocklist_repo_url
    }

    pub fn blocklist_local_path(&self) -> &str {
        &self.blocklist_local_path
    }

    pub fn usage_threshold_hours(&self) -> u32 {
        self.usage_threshold_hours
    }

    pub fn block_duration_minutes(&self) -> u32 {
        self.block_duration_minutes
    }

    pub fn unbound_log_file(&self) -> &str {
        &self.unbound_log_file
    }

    pub fn rpz_file(&self) -> &str {
        &self.rpz_file
    }

    pub fn logging_level(&self) -> LoggingLevel {
        self.logging_level
    }

    pub fn logging_file(&self) -> &str {
        &self.logging_file
    }

    pub fn enable_service(&self) -> bool {
        self.enable_service
    }

    /// Form representation of this model.
    ///
    /// Feeding the result back through `validate` yields an equal model.
    /// `enable_service` is only present when enabled, like an HTML checkbox.
    pub fn to_raw(&self) -> RawSettings {
        let mut raw = RawSettings::new()
            .with(fields::UNBOUND_RELOAD_COMMAND, self.unbound_reload_command.as_str())
            .with(fields::BLOCKLIST_REPO_URL, self.blocklist_repo_url.as_str())
            .with(fields::BLOCKLIST_LOCAL_PATH, self.blocklist_local_path.as_str())
            .with(
                fields::USAGE_THRESHOLD_HOURS,
                self.usage_threshold_hours.to_string(),
            )
            .with(
                fields::BLOCK_DURATION_MINUTES,
                self.block_duration_minutes.to_string(),
            )
            .with(fields::UNBOUND_LOG_FILE, self.unbound_log_file.as_str())
            .with(fields::RPZ_FILE, self.rpz_file.as_str())
            .with(fields::LOGGING_LEVEL, self.logging_level.as_str())
            .with(fields::LOGGING_FILE, self.logging_file.as_str());
        if self.enable_service {
            raw.insert(fields::ENABLE_SERVICE, "on");
        }
        raw
    }
}

impl Default for SettingsModel {
    /// Settings used before anything has been saved
    fn default() -> Self {
        Self {
            unbound_reload_command: "service unbound reload".to_string(),
            blocklist_repo_url: "https://github.com/smt-plugin/blocklist".to_string(),
            blocklist_local_path: "/usr/local/opnsense/scripts/smt/social_media_domains.txt"
                .to_string(),
            usage_threshold_hours: 1,
            block_duration_minutes: 60,
            unbound_log_file: "/var/log/resolver/latest.log".to_string(),
            rpz_file: "/var/unbound/rpz/smt.rpz".to_string(),
            logging_level: LoggingLevel::Info,
            logging_file: "/var/log/smt/smt.log".to_string(),
            enable_service: false,
        }
    }
}
