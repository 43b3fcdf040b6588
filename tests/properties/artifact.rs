//! Property tests for config.yaml generation.

use proptest::prelude::*;

use smt_sync::{generate, validate, ArtifactDocument};

use super::validator::valid_form;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the same settings always render byte-identical YAML.
    #[test]
    fn property_render_is_deterministic(raw in valid_form()) {
        let model = validate(&raw).unwrap();
        let first = generate(&model).render().unwrap();
        let second = generate(&model.clone()).render().unwrap();
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: numeric settings are YAML integers, never strings.
    #[test]
    fn property_numeric_fields_are_integers(raw in valid_form()) {
        let model = validate(&raw).unwrap();
        let rendered = generate(&model).render().unwrap();
        let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(&rendered).unwrap();

        let social = &value["social_media"];
        prop_assert_eq!(
            social["usage_threshold_hours"].as_u64(),
            Some(u64::from(model.usage_threshold_hours()))
        );
        prop_assert_eq!(
            social["block_duration_minutes"].as_u64(),
            Some(u64::from(model.block_duration_minutes()))
        );
    }

    /// PROPERTY: rendered YAML satisfies the daemon's document contract.
    #[test]
    fn property_render_parses_back(raw in valid_form()) {
        let doc = generate(&validate(&raw).unwrap());
        let parsed = ArtifactDocument::parse(&doc.render().unwrap()).unwrap();
        prop_assert_eq!(parsed, doc);
    }
}
