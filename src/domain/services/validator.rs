//! Validator Domain Service
//!
//! Turns raw form input into a [`SettingsModel`]. Pure: no I/O, no logging
//! above `debug`.

use crate::domain::entities::SettingsModel;
use crate::domain::value_objects::{fields, LoggingLevel, RawSettings, RawValue};
use crate::error::ValidationError;

/// Validate and normalize submitted settings.
///
/// Fields are checked in form order and the first failure is returned.
/// String values are trimmed; a blank value counts as missing. Keys that are
/// not form fields are ignored.
pub fn validate(raw: &RawSettings) -> Result<SettingsModel, ValidationError> {
    for key in raw.keys().filter(|k| !fields::ALL.contains(k)) {
        tracing::debug!(key, "ignoring unknown settings key");
    }

    Ok(SettingsModel {
        unbound_reload_command: required_text(raw, fields::UNBOUND_RELOAD_COMMAND)?,
        blocklist_repo_url: required_text(raw, fields::BLOCKLIST_REPO_URL)?,
        blocklist_local_path: required_text(raw, fields::BLOCKLIST_LOCAL_PATH)?,
        usage_threshold_hours: positive_integer(raw, fields::USAGE_THRESHOLD_HOURS)?,
        block_duration_minutes: positive_integer(raw, fields::BLOCK_DURATION_MINUTES)?,
        unbound_log_file: required_text(raw, fields::UNBOUND_LOG_FILE)?,
        rpz_file: required_text(raw, fields::RPZ_FILE)?,
        logging_level: logging_level(raw, fields::LOGGING_LEVEL)?,
        logging_file: required_text(raw, fields::LOGGING_FILE)?,
        enable_service: raw
            .get(fields::ENABLE_SERVICE)
            .is_some_and(RawValue::is_truthy),
    })
}

fn required_text(raw: &RawSettings, field: &'static str) -> Result<String, ValidationError> {
    let value = raw
        .get(field)
        .ok_or(ValidationError::MissingField(field))?;
    let text = value.as_text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn positive_integer(raw: &RawSettings, field: &'static str) -> Result<u32, ValidationError> {
    let value = raw
        .get(field)
        .ok_or(ValidationError::MissingField(field))?;
    let parsed = match value {
        RawValue::Number(n) => Some(*n),
        RawValue::Text(s) if s.trim().is_empty() => {
            return Err(ValidationError::MissingField(field));
        }
        RawValue::Text(s) => s.trim().parse::<i64>().ok(),
        RawValue::Flag(_) => None,
    };

    parsed
        .filter(|n| *n >= 1)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(ValidationError::OutOfRange(field))
}

fn logging_level(raw: &RawSettings, field: &'static str) -> Result<LoggingLevel, ValidationError> {
    let value = raw
        .get(field)
        .ok_or(ValidationError::MissingField(field))?;
    let text = value.as_text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    trimmed
        .parse::<LoggingLevel>()
        .map_err(|_| ValidationError::InvalidEnum(field, LoggingLevel::NAMES))
}
