use limits_override::{
    ConstraintOverrideEngine, FeatureToggleRegistry, MismatchReason, Mode, OverrideError,
    MISC_SETTINGS_GROUP,
};
use limits_schema::{Namespace, PropertyDefinition, PropertyGroup, PropertyKind, Schema};
use limits_test_utils::{arb_schema, live_schema, reference_schema};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn engine() -> ConstraintOverrideEngine {
    ConstraintOverrideEngine::new().with_synthetic(FeatureToggleRegistry::new().synthetic_paths())
}

#[test]
fn test_speed_relax_then_restore() {
    let reference = reference_schema();
    let mut live = live_schema();

    engine().apply(Mode::Relax, &mut live, None).unwrap();
    assert_eq!(
        live.property(Namespace::Events, "MoveTrack", "speed"),
        Some(&PropertyDefinition::int("speed", i64::MIN, i64::MAX))
    );

    engine().apply(Mode::Restore, &mut live, Some(&reference)).unwrap();
    assert_eq!(
        live.property(Namespace::Events, "MoveTrack", "speed"),
        Some(&PropertyDefinition::int("speed", 0, 100))
    );
}

#[test]
fn test_relax_leaves_pass_through_kinds() {
    let mut live = live_schema();
    engine().relax(&mut live);

    assert_eq!(
        live.property(Namespace::Events, "RecolorTrack", "startTile")
            .map(|p| &p.kind),
        Some(&PropertyKind::Other {
            tag: "Tile".to_string()
        })
    );
    assert_eq!(
        live.property(Namespace::Settings, "MiscSettings", "legacyFlash"),
        reference_schema().property(Namespace::Settings, "MiscSettings", "legacyFlash")
    );
}

#[test]
fn test_restore_with_synthetic_entries_present() {
    let registry = FeatureToggleRegistry::new();
    let reference = reference_schema();
    let mut live = live_schema();

    registry.set_more_settings(true, &mut live);
    engine().relax(&mut live);
    engine().restore(&mut live, &reference).unwrap();

    registry.set_more_settings(false, &mut live);
    assert_eq!(live, reference);
}

#[test]
fn test_restore_unknown_property_fails_untouched() {
    let reference = reference_schema();
    let mut live = live_schema();
    engine().relax(&mut live);
    live.groups_mut(Namespace::Settings)
        .get_mut("SongSettings")
        .unwrap()
        .insert(PropertyDefinition::int("pitch", 0, 200));
    let before = live.clone();

    let err = engine().restore(&mut live, &reference).unwrap_err();
    assert_eq!(
        err,
        OverrideError::SchemaMismatch {
            namespace: Namespace::Settings,
            group: "SongSettings".to_string(),
            property: Some("pitch".to_string()),
            reason: MismatchReason::MissingProperty,
        }
    );
    assert_eq!(live, before);
}

#[test]
fn test_restore_empty_group_absent_from_reference_fails() {
    let reference = Schema::new().with_group(
        Namespace::Events,
        PropertyGroup::with_properties("MoveTrack", [PropertyDefinition::int("speed", 0, 100)]),
    );
    let mut live = reference
        .clone()
        .with_group(Namespace::Events, PropertyGroup::new("GhostEvent"));
    engine().relax(&mut live);
    let before = live.clone();

    let err = engine().restore(&mut live, &reference).unwrap_err();
    assert_eq!(
        err,
        OverrideError::SchemaMismatch {
            namespace: Namespace::Events,
            group: "GhostEvent".to_string(),
            property: None,
            reason: MismatchReason::MissingGroup,
        }
    );
    assert_eq!(live, before);
}

#[test]
fn test_restore_group_of_only_synthetic_entries_passes() {
    let registry = FeatureToggleRegistry::new();
    let mut reference = reference_schema();
    reference
        .groups_mut(Namespace::Settings)
        .shift_remove(MISC_SETTINGS_GROUP);
    let mut live = reference.clone().with_group(
        Namespace::Settings,
        PropertyGroup::with_properties(MISC_SETTINGS_GROUP, registry.properties().to_vec()),
    );
    engine().relax(&mut live);

    engine().restore(&mut live, &reference).unwrap();
    assert_eq!(
        live.groups(Namespace::Settings)[MISC_SETTINGS_GROUP].len(),
        registry.properties().len()
    );
}

#[test]
fn test_toggle_round_trip_on_fixture() {
    let registry = FeatureToggleRegistry::new();
    let mut live = live_schema();
    let before = live.groups(Namespace::Settings)[MISC_SETTINGS_GROUP].clone();

    registry.set_more_settings(true, &mut live);
    assert_eq!(live.groups(Namespace::Settings)[MISC_SETTINGS_GROUP].len(), before.len() + 2);

    registry.set_more_settings(false, &mut live);
    assert_eq!(live.groups(Namespace::Settings)[MISC_SETTINGS_GROUP], before);
}

proptest! {
    #[test]
    fn prop_relax_is_idempotent(schema in arb_schema()) {
        let engine = ConstraintOverrideEngine::new();
        let mut once = schema.clone();
        engine.relax(&mut once);
        let mut twice = once.clone();
        let report = engine.relax(&mut twice);

        prop_assert_eq!(report.changed, 0);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_restore_after_relax_is_identity(schema in arb_schema()) {
        let engine = ConstraintOverrideEngine::new();
        let mut live = schema.clone();
        engine.relax(&mut live);
        engine.restore(&mut live, &schema).unwrap();

        prop_assert_eq!(live, schema);
    }

    #[test]
    fn prop_mismatch_leaves_live_unchanged(schema in arb_schema()) {
        let engine = ConstraintOverrideEngine::new();
        let mut live = schema.clone();
        engine.relax(&mut live);
        live.insert_group(
            Namespace::Settings,
            PropertyGroup::with_properties("drifted_group", [PropertyDefinition::int("extra", 0, 1)]),
        );
        let before: Schema = live.clone();

        let err = engine.restore(&mut live, &schema).unwrap_err();
        prop_assert!(err.is_mismatch());
        prop_assert_eq!(live, before);
    }
}
