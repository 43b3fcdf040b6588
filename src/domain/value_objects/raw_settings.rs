//! Raw Settings Value Object
//!
//! Unvalidated key-value input as it arrives from a form post, a JSON file
//! or `--set key=value` flags.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Form keys, in the order the settings page renders them
pub mod fields {
    pub const UNBOUND_RELOAD_COMMAND: &str = "unbound_reload_command";
    pub const BLOCKLIST_REPO_URL: &str = "blocklist_repo_url";
    pub const BLOCKLIST_LOCAL_PATH: &str = "blocklist_local_path";
    pub const USAGE_THRESHOLD_HOURS: &str = "usage_threshold_hours";
    pub const BLOCK_DURATION_MINUTES: &str = "block_duration_minutes";
    pub const UNBOUND_LOG_FILE: &str = "unbound_log_file";
    pub const RPZ_FILE: &str = "rpz_file";
    pub const LOGGING_LEVEL: &str = "logging_level";
    pub const LOGGING_FILE: &str = "logging_file";
    pub const ENABLE_SERVICE: &str = "enable_service";

    pub const ALL: [&str; 10] = [
        UNBOUND_RELOAD_COMMAND,
        BLOCKLIST_REPO_URL,
        BLOCKLIST_LOCAL_PATH,
        USAGE_THRESHOLD_HOURS,
        BLOCK_DURATION_MINUTES,
        UNBOUND_LOG_FILE,
        RPZ_FILE,
        LOGGING_LEVEL,
        LOGGING_FILE,
        ENABLE_SERVICE,
    ];
}

/// A single submitted value
///
/// Form posts only produce text; JSON input may also carry booleans and
/// integers, which are accepted wherever their text form would be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl RawValue {
    /// Text form of the value
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            RawValue::Flag(b) => Cow::Owned(b.to_string()),
            RawValue::Number(n) => Cow::Owned(n.to_string()),
            RawValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Checkbox semantics: a browser posts `"on"` when checked.
    pub fn is_truthy(&self) -> bool {
        match self {
            RawValue::Flag(b) => *b,
            RawValue::Number(n) => *n != 0,
            RawValue::Text(s) => {
                let s = s.trim().to_ascii_lowercase();
                !matches!(s.as_str(), "" | "0" | "false" | "off" | "no")
            }
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Flag(b)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n)
    }
}

/// Submitted settings keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSettings(BTreeMap<String, RawValue>);

impl RawSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<RawValue> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: RawSettings) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
