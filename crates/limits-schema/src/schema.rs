//! Two-namespace property schema

use crate::group::PropertyGroup;
use crate::property::PropertyDefinition;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace a property group belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Namespace {
    /// Per-event-type parameter sets
    Events,
    /// Level settings categories
    Settings,
}

impl Namespace {
    /// Both namespaces, in the order passes visit them
    pub const ALL: [Self; 2] = [Self::Events, Self::Settings];

    /// Key of this namespace in reference datasets
    #[inline]
    #[must_use]
    pub const fn dataset_key(self) -> &'static str {
        match self {
            Self::Events => "levelEvents",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dataset_key())
    }
}

/// Fully qualified location of one property definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyPath {
    /// Owning namespace
    pub namespace: Namespace,
    /// Owning group
    pub group: String,
    /// Property name
    pub property: String,
}

impl PropertyPath {
    /// Create new path
    #[inline]
    #[must_use]
    pub fn new(namespace: Namespace, group: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            namespace,
            group: group.into(),
            property: property.into(),
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.namespace, self.group, self.property)
    }
}

/// Event and settings property groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Groups keyed by event type name
    #[serde(default)]
    pub event_groups: IndexMap<String, PropertyGroup>,
    /// Groups keyed by settings category name
    #[serde(default)]
    pub setting_groups: IndexMap<String, PropertyGroup>,
}

impl Schema {
    /// Create empty schema
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups of a namespace
    #[inline]
    #[must_use]
    pub fn groups(&self, namespace: Namespace) -> &IndexMap<String, PropertyGroup> {
        match namespace {
            Namespace::Events => &self.event_groups,
            Namespace::Settings => &self.setting_groups,
        }
    }

    /// Groups of a namespace, mutably
    #[inline]
    pub fn groups_mut(&mut self, namespace: Namespace) -> &mut IndexMap<String, PropertyGroup> {
        match namespace {
            Namespace::Events => &mut self.event_groups,
            Namespace::Settings => &mut self.setting_groups,
        }
    }

    /// Insert group under its own name, returning the one it replaced
    pub fn insert_group(&mut self, namespace: Namespace, group: PropertyGroup) -> Option<PropertyGroup> {
        self.groups_mut(namespace)
            .insert(group.name().to_string(), group)
    }

    /// With group in namespace
    #[must_use]
    pub fn with_group(mut self, namespace: Namespace, group: PropertyGroup) -> Self {
        self.insert_group(namespace, group);
        self
    }

    /// Look up one definition
    #[must_use]
    pub fn property(&self, namespace: Namespace, group: &str, name: &str) -> Option<&PropertyDefinition> {
        self.groups(namespace).get(group)?.get(name)
    }

    /// Total number of definitions across both namespaces
    #[must_use]
    pub fn property_count(&self) -> usize {
        Namespace::ALL
            .iter()
            .flat_map(|ns| self.groups(*ns).values())
            .map(PropertyGroup::len)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::new()
            .with_group(
                Namespace::Events,
                PropertyGroup::with_properties(
                    "MoveTrack",
                    [
                        PropertyDefinition::int("speed", 0, 100),
                        PropertyDefinition::float("duration", 0.0, 10.0),
                    ],
                ),
            )
            .with_group(
                Namespace::Settings,
                PropertyGroup::with_properties("MiscSettings", [PropertyDefinition::color("tint", false)]),
            )
    }

    #[test]
    fn property_lookup() {
        let schema = sample();
        assert_eq!(
            schema.property(Namespace::Events, "MoveTrack", "speed"),
            Some(&PropertyDefinition::int("speed", 0, 100))
        );
        assert!(schema.property(Namespace::Settings, "MoveTrack", "speed").is_none());
        assert!(schema.property(Namespace::Events, "MoveTrack", "missing").is_none());
    }

    #[test]
    fn property_count_spans_namespaces() {
        assert_eq!(sample().property_count(), 3);
        assert_eq!(Schema::new().property_count(), 0);
    }

    #[test]
    fn property_path_display() {
        let path = PropertyPath::new(Namespace::Settings, "MiscSettings", "useLegacyFlash");
        assert_eq!(path.to_string(), "settings/MiscSettings/useLegacyFlash");
    }

    #[test]
    fn namespace_dataset_keys() {
        assert_eq!(Namespace::Events.dataset_key(), "levelEvents");
        assert_eq!(Namespace::Settings.to_string(), "settings");
    }

    #[test]
    fn yaml_snapshot_keeps_infinities() {
        let schema = Schema::new().with_group(
            Namespace::Events,
            PropertyGroup::with_properties(
                "Zoom",
                [PropertyDefinition::float("zoom", f64::NEG_INFINITY, f64::INFINITY)],
            ),
        );

        let yaml = serde_yaml::to_string(&schema).unwrap();
        let back: Schema = serde_yaml::from_str(&yaml).unwrap();
        pretty_assertions::assert_eq!(back, schema);
    }
}
