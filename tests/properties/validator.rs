//! Property tests for form validation.

use proptest::prelude::*;

use smt_sync::domain::value_objects::{fields, RawSettings, RawValue};
use smt_sync::validate;

fn raw_value() -> impl Strategy<Value = RawValue> {
    prop_oneof![
        any::<bool>().prop_map(RawValue::Flag),
        any::<i64>().prop_map(RawValue::Number),
        ".{0,24}".prop_map(RawValue::Text),
        "[ 0-9-]{0,6}".prop_map(RawValue::Text),
    ]
}

fn field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(fields::ALL.to_vec()).prop_map(str::to_string),
        "[a-z_]{1,12}",
    ]
}

fn raw_settings() -> impl Strategy<Value = RawSettings> {
    proptest::collection::vec((field_name(), raw_value()), 0..16).prop_map(|pairs| {
        let mut raw = RawSettings::new();
        for (key, value) in pairs {
            raw.insert(key, value);
        }
        raw
    })
}

/// Every field filled with a valid value
pub(crate) fn valid_form() -> impl Strategy<Value = RawSettings> {
    (
        "[a-z][a-z /._-]{0,30}",
        1u32..=10_000,
        1u32..=10_000,
        proptest::sample::select(vec!["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]),
        any::<bool>(),
    )
        .prop_map(|(text, hours, minutes, level, enabled)| {
            RawSettings::new()
                .with(fields::UNBOUND_RELOAD_COMMAND, text.clone())
                .with(fields::BLOCKLIST_REPO_URL, format!("https://example.org/{text}"))
                .with(fields::BLOCKLIST_LOCAL_PATH, format!("/{text}"))
                .with(fields::USAGE_THRESHOLD_HOURS, hours.to_string())
                .with(fields::BLOCK_DURATION_MINUTES, i64::from(minutes))
                .with(fields::UNBOUND_LOG_FILE, "/var/log/resolver/latest.log")
                .with(fields::RPZ_FILE, "/var/unbound/rpz/smt.rpz")
                .with(fields::LOGGING_LEVEL, level)
                .with(fields::LOGGING_FILE, "/var/log/smt/smt.log")
                .with(fields::ENABLE_SERVICE, enabled)
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: validation never panics, whatever is submitted.
    #[test]
    fn property_validate_never_panics(raw in raw_settings()) {
        let _ = validate(&raw);
    }

    /// PROPERTY: an accepted model always has positive durations and no blank text.
    #[test]
    fn property_accepted_models_are_well_formed(raw in raw_settings()) {
        if let Ok(model) = validate(&raw) {
            prop_assert!(model.usage_threshold_hours() >= 1);
            prop_assert!(model.block_duration_minutes() >= 1);
            prop_assert!(!model.unbound_reload_command().trim().is_empty());
            prop_assert!(!model.rpz_file().trim().is_empty());
        }
    }

    /// PROPERTY: a complete valid form is accepted and keeps its numbers.
    #[test]
    fn property_valid_form_is_accepted(raw in valid_form()) {
        let model = validate(&raw).unwrap();
        let hours = raw.get(fields::USAGE_THRESHOLD_HOURS).unwrap().as_text().parse::<u32>().unwrap();
        prop_assert_eq!(model.usage_threshold_hours(), hours);
    }

    /// PROPERTY: re-validating a model's own form gives the same model.
    #[test]
    fn property_validate_is_idempotent(raw in valid_form()) {
        let model = validate(&raw).unwrap();
        prop_assert_eq!(validate(&model.to_raw()).unwrap(), model);
    }

    /// PROPERTY: unknown keys never change the outcome.
    #[test]
    fn property_unknown_keys_are_ignored(
        raw in valid_form(),
        extra in "x_[a-z]{1,8}",
        value in raw_value(),
    ) {
        let with_extra = raw.clone().with(extra, value);
        prop_assert_eq!(validate(&with_extra).unwrap(), validate(&raw).unwrap());
    }
}
