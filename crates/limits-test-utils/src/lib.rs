//! Testing utilities for the limits workspace
//!
//! Shared fixtures, fake hosts and proptest strategies.

#![allow(missing_docs)]

use limits_reference::{DatasetFormat, ReferenceSchemaLoader};
use limits_schema::{
    Namespace, PropertyDefinition, PropertyGroup, PropertyKind, Schema, SchemaHost, Vec2,
};
use proptest::prelude::*;

/// Small dataset in the host's bundled format
pub const REFERENCE_DATASET: &str = r#"{
    "levelEvents": [
        {
            "name": "MoveTrack",
            "properties": [
                {"name": "speed", "type": "Int", "min": 0, "max": 100},
                {"name": "duration", "type": "Float", "min": 0, "max": 9999},
                {"name": "positionOffset", "type": "Vector2", "min": [-10, -10], "max": [10, 10]},
                {"name": "ease", "type": "Enum:Ease", "default": "Linear"}
            ]
        },
        {
            "name": "RecolorTrack",
            "properties": [
                {"name": "trackColor", "type": "Color", "usesAlpha": false},
                {"name": "startTile", "type": "Tile"}
            ]
        }
    ],
    "settings": [
        {
            "name": "MiscSettings",
            "properties": [
                {"name": "legacyFlash", "type": "Enum:Toggle", "default": "Disabled"},
                {"name": "backgroundColor", "type": "Color", "usesAlpha": false}
            ]
        },
        {
            "name": "SongSettings",
            "properties": [
                {"name": "bpm", "type": "Float", "min": 0.001, "max": 10000},
                {"name": "offset", "type": "Int", "min": 0, "max": 1000000}
            ]
        }
    ]
}"#;

pub fn reference_schema() -> Schema {
    ReferenceSchemaLoader::new(DatasetFormat::Json)
        .load(REFERENCE_DATASET)
        .unwrap()
}

/// Live schema as the host builds it: identical to the reference
pub fn live_schema() -> Schema {
    reference_schema()
}

/// Host that has not populated its schema yet
#[derive(Debug, Default)]
pub struct UninitializedHost;

impl SchemaHost for UninitializedHost {
    fn is_initialized(&self) -> bool {
        false
    }

    fn group_names(&self, _namespace: Namespace) -> Vec<String> {
        Vec::new()
    }

    fn group(&self, _namespace: Namespace, _name: &str) -> Option<&PropertyGroup> {
        None
    }

    fn group_mut(&mut self, _namespace: Namespace, _name: &str) -> Option<&mut PropertyGroup> {
        None
    }
}

fn finite() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

pub fn arb_kind() -> impl Strategy<Value = PropertyKind> {
    prop_oneof![
        any::<bool>().prop_map(|uses_alpha| PropertyKind::Color { uses_alpha }),
        (any::<i64>(), any::<i64>()).prop_map(|(a, b)| PropertyKind::Int {
            min: a.min(b),
            max: a.max(b)
        }),
        (finite(), finite()).prop_map(|(a, b)| PropertyKind::Float {
            min: a.min(b),
            max: a.max(b)
        }),
        (finite(), finite(), finite(), finite()).prop_map(|(x0, y0, x1, y1)| {
            PropertyKind::Vector2 {
                min: Vec2::new(x0, y0),
                max: Vec2::new(x1, y1),
            }
        }),
        "[A-Z][a-z]{2,8}".prop_map(|enum_type| PropertyKind::Enum { enum_type }),
        Just(PropertyKind::Export),
        "[A-Z][a-z]{2,8}".prop_map(|tag| PropertyKind::Other { tag }),
    ]
}

pub fn arb_group(name: String) -> impl Strategy<Value = PropertyGroup> {
    proptest::collection::btree_map("[a-z][a-zA-Z]{0,10}", arb_kind(), 0..8).prop_map(
        move |properties| {
            PropertyGroup::with_properties(
                name.clone(),
                properties
                    .into_iter()
                    .map(|(prop, kind)| PropertyDefinition::new(prop, kind)),
            )
        },
    )
}

fn arb_groups() -> impl Strategy<Value = Vec<PropertyGroup>> {
    proptest::collection::btree_set("[A-Z][a-zA-Z]{2,10}", 0..5).prop_flat_map(|names| {
        names
            .into_iter()
            .map(arb_group)
            .collect::<Vec<_>>()
    })
}

/// Arbitrary schema with finite bounds
pub fn arb_schema() -> impl Strategy<Value = Schema> {
    (arb_groups(), arb_groups()).prop_map(|(events, settings)| {
        let mut schema = Schema::new();
        for group in events {
            schema.insert_group(Namespace::Events, group);
        }
        for group in settings {
            schema.insert_group(Namespace::Settings, group);
        }
        schema
    })
}
