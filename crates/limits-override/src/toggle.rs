//! Synthetic settings entries behind the "more editor settings" flag

use limits_schema::{Namespace, PropertyDefinition, PropertyKind, PropertyPath, SchemaHost};

/// Settings group that receives the synthetic entries
pub const MISC_SETTINGS_GROUP: &str = "MiscSettings";

/// Toggle between legacy and current flash rendering
pub const USE_LEGACY_FLASH: &str = "useLegacyFlash";

/// Action converting the level's floor meshes
pub const CONVERT_FLOOR_MESH: &str = "convertFloorMesh";

/// What a toggle call did to the live schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Entries inserted (or overwritten)
    Inserted(usize),
    /// Entries removed; absent ones are not counted
    Removed(usize),
    /// Target group missing, nothing done
    HostGroupAbsent,
}

/// Adds and removes the synthetic `MiscSettings` entries
#[derive(Debug, Clone)]
pub struct FeatureToggleRegistry {
    properties: Vec<PropertyDefinition>,
}

impl FeatureToggleRegistry {
    /// Registry with the built-in synthetic entries
    #[must_use]
    pub fn new() -> Self {
        Self {
            properties: vec![
                PropertyDefinition::new(
                    USE_LEGACY_FLASH,
                    PropertyKind::Enum {
                        enum_type: "Toggle".to_string(),
                    },
                )
                .with_default("Disabled"),
                PropertyDefinition::new(CONVERT_FLOOR_MESH, PropertyKind::Export),
            ],
        }
    }

    /// Synthetic definitions this registry manages
    #[inline]
    #[must_use]
    pub fn properties(&self) -> &[PropertyDefinition] {
        &self.properties
    }

    /// Paths of the synthetic definitions
    pub fn synthetic_paths(&self) -> impl Iterator<Item = PropertyPath> + '_ {
        self.properties
            .iter()
            .map(|p| PropertyPath::new(Namespace::Settings, MISC_SETTINGS_GROUP, &p.name))
    }

    /// Insert (`enabled`) or remove the synthetic entries
    ///
    /// A host without a `MiscSettings` group is left alone.
    pub fn set_more_settings<S: SchemaHost + ?Sized>(
        &self,
        enabled: bool,
        live: &mut S,
    ) -> ToggleOutcome {
        let Some(group) = live.group_mut(Namespace::Settings, MISC_SETTINGS_GROUP) else {
            return ToggleOutcome::HostGroupAbsent;
        };

        let outcome = if enabled {
            for property in &self.properties {
                group.insert(property.clone());
            }
            ToggleOutcome::Inserted(self.properties.len())
        } else {
            let removed = self
                .properties
                .iter()
                .filter(|p| group.remove(&p.name).is_some())
                .count();
            ToggleOutcome::Removed(removed)
        };

        tracing::debug!(enabled, ?outcome, "More editor settings toggled");
        outcome
    }
}

impl Default for FeatureToggleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
