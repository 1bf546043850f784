//! Named collections of property definitions

use crate::property::PropertyDefinition;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Property definitions of one event type or settings category
///
/// Keys are unique. Order is kept only so snapshots stay stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyGroup {
    name: String,
    #[serde(default)]
    properties: IndexMap<String, PropertyDefinition>,
}

impl PropertyGroup {
    /// Create empty group
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
        }
    }

    /// Build group from definitions; later duplicates replace earlier ones
    #[must_use]
    pub fn with_properties(
        name: impl Into<String>,
        properties: impl IntoIterator<Item = PropertyDefinition>,
    ) -> Self {
        let mut group = Self::new(name);
        for property in properties {
            group.insert(property);
        }
        group
    }

    /// Group name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up definition by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.get(name)
    }

    /// Look up definition by name for mutation
    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut PropertyDefinition> {
        self.properties.get_mut(name)
    }

    /// Whether a definition with this name exists
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Insert definition under its own name, returning the one it replaced
    pub fn insert(&mut self, property: PropertyDefinition) -> Option<PropertyDefinition> {
        self.properties.insert(property.name.clone(), property)
    }

    /// Remove definition by name; absent names are a no-op
    pub fn remove(&mut self, name: &str) -> Option<PropertyDefinition> {
        self.properties.shift_remove(name)
    }

    /// Iterate definitions
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.properties.values()
    }

    /// Iterate definitions mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PropertyDefinition> {
        self.properties.values_mut()
    }

    /// Property names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Number of definitions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the group has no definitions
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
