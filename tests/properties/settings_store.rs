//! Property tests for the TOML settings store.

use proptest::prelude::*;

use smt_sync::domain::ports::SettingsRepository;
use smt_sync::infrastructure::TomlSettingsRepository;
use smt_sync::validate;

use super::validator::valid_form;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: whatever is persisted loads back unchanged.
    #[test]
    fn property_store_round_trips(raw in valid_form()) {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlSettingsRepository::new(dir.path().join("settings.toml"));
        let model = validate(&raw).unwrap();

        store.persist(&model).unwrap();
        prop_assert_eq!(store.load().unwrap(), model);
    }
}
