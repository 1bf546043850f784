//! Relax/restore passes
//!
//! A pass visits every property of every group in both namespaces and
//! rewrites only the bounds of `Color`, `Int`, `Float` and `Vector2`
//! properties. Entries are never added, removed, renamed or reordered.

use crate::error::{MismatchReason, OverrideError};
use limits_schema::{
    Namespace, PropertyKind, PropertyPath, Schema, SchemaHost, SharedSchema, Vec2,
};
use std::collections::BTreeSet;
use std::fmt;

/// Direction of an override pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Widen bounds to the full range of each kind
    Relax,
    /// Copy bounds back from the reference schema
    Restore,
}

impl Mode {
    /// Relax when limits are removed and no restore is forced
    #[inline]
    #[must_use]
    pub const fn select(remove_limits: bool, force_restore: bool) -> Self {
        if remove_limits && !force_restore {
            Self::Relax
        } else {
            Self::Restore
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Relax => "relax",
            Self::Restore => "restore",
        })
    }
}

/// Outcome of a completed pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideReport {
    /// Direction of the pass
    pub mode: Mode,
    /// Properties visited
    pub visited: usize,
    /// Properties whose bounds actually changed
    pub changed: usize,
}

impl OverrideReport {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            visited: 0,
            changed: 0,
        }
    }
}

/// One restore write, validated before anything is mutated
struct RestoreWrite {
    namespace: Namespace,
    group: String,
    property: String,
    kind: PropertyKind,
}

/// Constraint override engine
///
/// Holds the set of synthetic property paths that have no reference
/// counterpart and are skipped by restore lookups.
#[derive(Debug, Clone, Default)]
pub struct ConstraintOverrideEngine {
    synthetic: BTreeSet<PropertyPath>,
}

impl ConstraintOverrideEngine {
    /// Create engine with no synthetic exemptions
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exempt synthetic properties from restore lookups
    #[must_use]
    pub fn with_synthetic(mut self, paths: impl IntoIterator<Item = PropertyPath>) -> Self {
        self.synthetic.extend(paths);
        self
    }

    /// Run one pass over `live`
    ///
    /// `reference` is only consulted by [`Mode::Restore`].
    ///
    /// # Errors
    /// - `OverrideError::ReferenceUnavailable` if restoring without reference
    /// - `OverrideError::SchemaMismatch` if a live entry has no counterpart
    ///
    /// On error the live schema is unchanged.
    pub fn apply<S: SchemaHost + ?Sized>(
        &self,
        mode: Mode,
        live: &mut S,
        reference: Option<&Schema>,
    ) -> Result<OverrideReport, OverrideError> {
        let report = match mode {
            Mode::Relax => Ok(self.relax(live)),
            Mode::Restore => {
                let reference = reference.ok_or(OverrideError::ReferenceUnavailable)?;
                self.restore(live, reference)
            }
        }?;

        tracing::info!(
            mode = %report.mode,
            visited = report.visited,
            changed = report.changed,
            "Override pass complete"
        );
        Ok(report)
    }

    /// Run one pass while holding the shared schema's write guard
    ///
    /// # Errors
    /// Same as [`apply`](Self::apply)
    pub fn apply_shared<S: SchemaHost>(
        &self,
        mode: Mode,
        live: &SharedSchema<S>,
        reference: Option<&Schema>,
    ) -> Result<OverrideReport, OverrideError> {
        live.with_write(|schema| self.apply(mode, schema, reference))
    }

    /// Widen every bounded property to its kind's full range
    ///
    /// Idempotent.
    pub fn relax<S: SchemaHost + ?Sized>(&self, live: &mut S) -> OverrideReport {
        let mut report = OverrideReport::new(Mode::Relax);

        for namespace in Namespace::ALL {
            for name in live.group_names(namespace) {
                let Some(group) = live.group_mut(namespace, &name) else {
                    continue;
                };
                for property in group.iter_mut() {
                    report.visited += 1;
                    if let Some(relaxed) = relaxed(&property.kind) {
                        if property.kind != relaxed {
                            property.kind = relaxed;
                            report.changed += 1;
                        }
                    }
                }
            }
        }

        report
    }

    /// Copy original bounds from `reference` into `live`
    ///
    /// Every live property is matched against the reference before any
    /// write happens, so either all bounds are restored or none are.
    ///
    /// # Errors
    /// `OverrideError::SchemaMismatch` for the first live entry without a
    /// counterpart of the same kind
    pub fn restore<S: SchemaHost + ?Sized>(
        &self,
        live: &mut S,
        reference: &Schema,
    ) -> Result<OverrideReport, OverrideError> {
        let (writes, visited) = self.plan_restore(live, reference)?;

        let mut report = OverrideReport::new(Mode::Restore);
        report.visited = visited;
        for write in writes {
            let Some(property) = live
                .group_mut(write.namespace, &write.group)
                .and_then(|group| group.get_mut(&write.property))
            else {
                continue;
            };
            if property.kind != write.kind {
                property.kind = write.kind;
                report.changed += 1;
            }
        }

        Ok(report)
    }

    fn plan_restore<S: SchemaHost + ?Sized>(
        &self,
        live: &S,
        reference: &Schema,
    ) -> Result<(Vec<RestoreWrite>, usize), OverrideError> {
        let mut writes = Vec::new();
        let mut visited = 0;

        for namespace in Namespace::ALL {
            for name in live.group_names(namespace) {
                let Some(group) = live.group(namespace, &name) else {
                    continue;
                };
                let Some(original_group) = reference.groups(namespace).get(&name) else {
                    let synthetic_only = !group.is_empty()
                        && group
                            .iter()
                            .all(|p| self.is_synthetic(namespace, &name, &p.name));
                    if synthetic_only {
                        visited += group.len();
                        continue;
                    }
                    return Err(OverrideError::SchemaMismatch {
                        namespace,
                        group: name.clone(),
                        property: None,
                        reason: MismatchReason::MissingGroup,
                    });
                };

                for property in group.iter() {
                    visited += 1;
                    if self.is_synthetic(namespace, &name, &property.name) {
                        continue;
                    }

                    let mismatch = |reason| OverrideError::SchemaMismatch {
                        namespace,
                        group: name.clone(),
                        property: Some(property.name.clone()),
                        reason,
                    };

                    let original = original_group
                        .get(&property.name)
                        .ok_or_else(|| mismatch(MismatchReason::MissingProperty))?;

                    if !property.kind.is_bounded() {
                        continue;
                    }
                    if !property.kind.same_kind(&original.kind) {
                        return Err(mismatch(MismatchReason::KindChanged {
                            live: property.kind.to_string(),
                            reference: original.kind.to_string(),
                        }));
                    }

                    writes.push(RestoreWrite {
                        namespace,
                        group: name.clone(),
                        property: property.name.clone(),
                        kind: original.kind.clone(),
                    });
                }
            }
        }

        Ok((writes, visited))
    }

    fn is_synthetic(&self, namespace: Namespace, group: &str, property: &str) -> bool {
        !self.synthetic.is_empty()
            && self
                .synthetic
                .contains(&PropertyPath::new(namespace, group, property))
    }
}

/// Fully relaxed bounds for a kind, `None` for kinds without bounds
fn relaxed(kind: &PropertyKind) -> Option<PropertyKind> {
    match kind {
        PropertyKind::Color { .. } => Some(PropertyKind::Color { uses_alpha: true }),
        PropertyKind::Int { .. } => Some(PropertyKind::Int {
            min: i64::MIN,
            max: i64::MAX,
        }),
        PropertyKind::Float { .. } => Some(PropertyKind::Float {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }),
        PropertyKind::Vector2 { .. } => Some(PropertyKind::Vector2 {
            min: Vec2::NEG_INFINITY,
            max: Vec2::INFINITY,
        }),
        PropertyKind::Enum { .. } | PropertyKind::Export | PropertyKind::Other { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use limits_schema::{PropertyDefinition, PropertyGroup};
    use pretty_assertions::assert_eq;

    fn move_track(speed: (i64, i64)) -> Schema {
        Schema::new().with_group(
            Namespace::Events,
            PropertyGroup::with_properties(
                "MoveTrack",
                [
                    PropertyDefinition::int("speed", speed.0, speed.1),
                    PropertyDefinition::new(
                        "ease",
                        PropertyKind::Enum {
                            enum_type: "Ease".to_string(),
                        },
                    ),
                ],
            ),
        )
    }

    #[test]
    fn mode_selection() {
        assert_eq!(Mode::select(true, false), Mode::Relax);
        assert_eq!(Mode::select(true, true), Mode::Restore);
        assert_eq!(Mode::select(false, false), Mode::Restore);
        assert_eq!(Mode::select(false, true), Mode::Restore);
    }

    #[test]
    fn relax_all_kinds() {
        let mut live = Schema::new().with_group(
            Namespace::Settings,
            PropertyGroup::with_properties(
                "TrackSettings",
                [
                    PropertyDefinition::color("trackColor", false),
                    PropertyDefinition::float("zoom", 0.0, 10.0),
                    PropertyDefinition::vector2("offset", [-1.0, -2.0], [1.0, 2.0]),
                    PropertyDefinition::new("export", PropertyKind::Export),
                ],
            ),
        );

        let report = ConstraintOverrideEngine::new().relax(&mut live);
        assert_eq!(report.visited, 4);
        assert_eq!(report.changed, 3);

        let get = |name| live.property(Namespace::Settings, "TrackSettings", name).unwrap();
        assert_eq!(get("trackColor").kind, PropertyKind::Color { uses_alpha: true });
        assert_eq!(
            get("zoom").kind,
            PropertyKind::Float {
                min: f64::NEG_INFINITY,
                max: f64::INFINITY
            }
        );
        assert_eq!(
            get("offset").kind,
            PropertyKind::Vector2 {
                min: Vec2::NEG_INFINITY,
                max: Vec2::INFINITY
            }
        );
        assert_eq!(get("export").kind, PropertyKind::Export);
    }

    #[test]
    fn relax_twice_changes_nothing() {
        let engine = ConstraintOverrideEngine::new();
        let mut live = move_track((0, 100));

        engine.relax(&mut live);
        let once = live.clone();
        let report = engine.relax(&mut live);

        assert_eq!(report.changed, 0);
        assert_eq!(live, once);
    }

    #[test]
    fn restore_speed_round_trip() {
        let engine = ConstraintOverrideEngine::new();
        let reference = move_track((0, 100));
        let mut live = reference.clone();

        engine.apply(Mode::Relax, &mut live, None).unwrap();
        assert_eq!(live, move_track((i64::MIN, i64::MAX)));

        let report = engine.apply(Mode::Restore, &mut live, Some(&reference)).unwrap();
        assert_eq!(report.changed, 1);
        assert_eq!(live, reference);
    }

    #[test]
    fn restore_without_reference() {
        let mut live = move_track((0, 100));
        let err = ConstraintOverrideEngine::new()
            .apply(Mode::Restore, &mut live, None)
            .unwrap_err();
        assert_eq!(err, OverrideError::ReferenceUnavailable);
    }

    #[test]
    fn restore_missing_group_is_atomic() {
        let engine = ConstraintOverrideEngine::new();
        let reference = move_track((0, 100));
        let mut live = move_track((i64::MIN, i64::MAX)).with_group(
            Namespace::Settings,
            PropertyGroup::with_properties("Unknown", [PropertyDefinition::int("x", 0, 1)]),
        );
        let before = live.clone();

        let err = engine.restore(&mut live, &reference).unwrap_err();
        assert_eq!(
            err,
            OverrideError::SchemaMismatch {
                namespace: Namespace::Settings,
                group: "Unknown".to_string(),
                property: None,
                reason: MismatchReason::MissingGroup,
            }
        );
        // the earlier MoveTrack group stays relaxed
        assert_eq!(live, before);
    }

    #[test]
    fn restore_kind_change_is_mismatch() {
        let reference = Schema::new().with_group(
            Namespace::Events,
            PropertyGroup::with_properties("Flash", [PropertyDefinition::float("count", 0.0, 1.0)]),
        );
        let mut live = Schema::new().with_group(
            Namespace::Events,
            PropertyGroup::with_properties("Flash", [PropertyDefinition::int("count", 0, 1)]),
        );

        let err = ConstraintOverrideEngine::new()
            .restore(&mut live, &reference)
            .unwrap_err();
        assert!(matches!(
            err,
            OverrideError::SchemaMismatch {
                reason: MismatchReason::KindChanged { .. },
                ..
            }
        ));
    }

    #[test]
    fn restore_skips_synthetic() {
        let reference = move_track((0, 100));
        let mut live = move_track((i64::MIN, i64::MAX));
        live.groups_mut(Namespace::Events)
            .get_mut("MoveTrack")
            .unwrap()
            .insert(PropertyDefinition::new("extra", PropertyKind::Export));

        let plain = ConstraintOverrideEngine::new();
        assert!(plain.restore(&mut live.clone(), &reference).is_err());

        let engine = ConstraintOverrideEngine::new().with_synthetic([PropertyPath::new(
            Namespace::Events,
            "MoveTrack",
            "extra",
        )]);
        engine.restore(&mut live, &reference).unwrap();
        assert_eq!(
            live.property(Namespace::Events, "MoveTrack", "speed"),
            Some(&PropertyDefinition::int("speed", 0, 100))
        );
        assert!(live.property(Namespace::Events, "MoveTrack", "extra").is_some());
    }

    #[test]
    fn apply_shared_holds_guard() {
        let reference = move_track((0, 100));
        let shared = SharedSchema::new(reference.clone());
        let engine = ConstraintOverrideEngine::new();

        engine.apply_shared(Mode::Relax, &shared, None).unwrap();
        assert_eq!(*shared.read(), move_track((i64::MIN, i64::MAX)));

        engine
            .apply_shared(Mode::Restore, &shared, Some(&reference))
            .unwrap();
        assert_eq!(*shared.read(), reference);
    }
}
