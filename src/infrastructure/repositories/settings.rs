//! TOML Settings Repository
//!
//! Persists the plugin settings as a sectioned TOML document, mirroring the
//! layout of the daemon's YAML file:
//!
//! ```toml
//! [opnsense]
//! unbound_reload_command = "service unbound reload"
//! enable_service = false
//!
//! [blocklist]
//! repo_url = "https://github.com/smt-plugin/blocklist"
//! local_path = "/usr/local/opnsense/scripts/smt/social_media_domains.txt"
//!
//! [social_media]
//! usage_threshold_hours = 1
//! block_duration_minutes = 60
//!
//! [logging]
//! level = "INFO"
//! file = "/var/log/smt/smt.log"
//!
//! [unbound]
//! log_file = "/var/log/resolver/latest.log"
//! rpz_file = "/var/unbound/rpz/smt.rpz"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::domain::entities::SettingsModel;
use crate::domain::ports::{
    FileSystem, SettingsRepository, StoreError, StoreLock, StoreResult,
};
use crate::domain::services::validate;
use crate::domain::value_objects::{fields, RawSettings};
use crate::infrastructure::fs::LocalFs;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredOpnsense {
    #[serde(skip_serializing_if = "Option::is_none")]
    unbound_reload_command: Option<String>,
    #[serde(default)]
    enable_service: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredBlocklist {
    #[serde(skip_serializing_if = "Option::is_none")]
    repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    local_path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredSocialMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    usage_threshold_hours: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    block_duration_minutes: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredLogging {
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredUnbound {
    #[serde(skip_serializing_if = "Option::is_none")]
    log_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rpz_file: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredSettings {
    #[serde(default)]
    opnsense: StoredOpnsense,
    #[serde(default)]
    blocklist: StoredBlocklist,
    #[serde(default)]
    social_media: StoredSocialMedia,
    #[serde(default)]
    logging: StoredLogging,
    #[serde(default)]
    unbound: StoredUnbound,
}

impl StoredSettings {
    fn from_model(model: &SettingsModel) -> Self {
        Self {
            opnsense: StoredOpnsense {
                unbound_reload_command: Some(model.unbound_reload_command().to_string()),
                enable_service: model.enable_service(),
            },
            blocklist: StoredBlocklist {
                repo_url: Some(model.blocklist_repo_url().to_string()),
                local_path: Some(model.blocklist_local_path().to_string()),
            },
            social_media: StoredSocialMedia {
                usage_threshold_hours: Some(i64::from(model.usage_threshold_hours())),
                block_duration_minutes: Some(i64::from(model.block_duration_minutes())),
            },
            logging: StoredLogging {
                level: Some(model.logging_level().as_str().to_string()),
                file: Some(model.logging_file().to_string()),
            },
            unbound: StoredUnbound {
                log_file: Some(model.unbound_log_file().to_string()),
                rpz_file: Some(model.rpz_file().to_string()),
            },
        }
    }

    /// Flatten into form fields so stored data passes the same validation as
    /// submitted data
    fn into_raw(self) -> RawSettings {
        let mut raw = RawSettings::new();
        let mut put = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                raw.insert(key, value);
            }
        };
        put(
            fields::UNBOUND_RELOAD_COMMAND,
            self.opnsense.unbound_reload_command,
        );
        put(fields::BLOCKLIST_REPO_URL, self.blocklist.repo_url);
        put(fields::BLOCKLIST_LOCAL_PATH, self.blocklist.local_path);
        put(
            fields::USAGE_THRESHOLD_HOURS,
            self.social_media.usage_threshold_hours.map(|n| n.to_string()),
        );
        put(
            fields::BLOCK_DURATION_MINUTES,
            self.social_media.block_duration_minutes.map(|n| n.to_string()),
        );
        put(fields::UNBOUND_LOG_FILE, self.unbound.log_file);
        put(fields::RPZ_FILE, self.unbound.rpz_file);
        put(fields::LOGGING_LEVEL, self.logging.level);
        put(fields::LOGGING_FILE, self.logging.file);
        raw.insert(fields::ENABLE_SERVICE, self.opnsense.enable_service);
        raw
    }
}

/// Exclusive `fs2` lock on a sidecar file, released on drop
struct FileLockGuard(fs::File);

impl FileLockGuard {
    fn acquire(path: &Path) -> std::io::Result<Self> {
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;
        file.lock_exclusive()?;
        Ok(Self(file))
    }
}

impl Drop for FileLockGuard {
    fn drop(&mut self) {
        let _ = self.0.unlock();
    }
}

/// Settings store backed by a TOML file
///
/// Writes are serialized with an exclusive lock on a sibling `.lock` file and
/// land atomically, so a concurrent `load` sees either the previous document
/// or the new one. Whole sync cycles are serialized separately through
/// `.cycle.lock`, so a cycle can persist while holding its own lock.
pub struct TomlSettingsRepository {
    path: PathBuf,
    fs: LocalFs,
}

impl TomlSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fs: LocalFs::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn cycle_lock_path(&self) -> PathBuf {
        self.path.with_extension("cycle.lock")
    }

    fn ensure_parent(&self) -> StoreResult<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self
                .fs
                .create_dir_all(parent)
                .map_err(|e| self.unavailable(e)),
            _ => Ok(()),
        }
    }

    fn unavailable(&self, message: impl ToString) -> StoreError {
        StoreError::Unavailable {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }

    fn corrupted(&self, message: impl ToString) -> StoreError {
        StoreError::Corrupted {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }

    fn save_to_disk(&self, model: &SettingsModel) -> StoreResult<()> {
        let content = toml::to_string_pretty(&StoredSettings::from_model(model))
            .map_err(|e| self.unavailable(e))?;
        self.fs
            .write(&self.path, &content)
            .map_err(|e| self.unavailable(e))
    }
}

impl SettingsRepository for TomlSettingsRepository {
    fn load(&self) -> StoreResult<SettingsModel> {
        if !self.fs.exists(&self.path) {
            tracing::debug!(path = %self.path.display(), "no stored settings, using defaults");
            return Ok(SettingsModel::default());
        }

        let content = self
            .fs
            .read(&self.path)
            .map_err(|e| self.unavailable(e))?;
        let stored: StoredSettings = toml::from_str(&content).map_err(|e| self.corrupted(e))?;
        validate(&stored.into_raw()).map_err(|e| self.corrupted(e))
    }

    fn persist(&self, model: &SettingsModel) -> StoreResult<()> {
        self.ensure_parent()?;
        let guard =
            FileLockGuard::acquire(&self.lock_path()).map_err(|e| self.unavailable(e))?;

        let result = self.save_to_disk(model);

        drop(guard);
        if result.is_ok() {
            tracing::debug!(path = %self.path.display(), "settings persisted");
        }
        result
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn lock(&self) -> StoreResult<StoreLock> {
        self.ensure_parent()?;
        let path = self.cycle_lock_path();
        let guard = FileLockGuard::acquire(&path).map_err(|e| self.unavailable(e))?;
        tracing::debug!(path = %path.display(), "sync cycle lock acquired");
        Ok(StoreLock::new(guard))
    }
}
