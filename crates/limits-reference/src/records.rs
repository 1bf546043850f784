//! Typed dataset records and their conversion into a schema

use crate::error::DatasetError;
use limits_schema::{Namespace, PropertyDefinition, PropertyGroup, PropertyKind, Schema, Vec2};
use serde::Deserialize;

/// Top-level dataset: exactly the two namespaces
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DatasetRecord {
    #[serde(rename = "levelEvents")]
    level_events: Vec<GroupRecord>,
    settings: Vec<GroupRecord>,
}

#[derive(Debug, Deserialize)]
struct GroupRecord {
    name: String,
    #[serde(default)]
    properties: Vec<PropertyRecord>,
}

#[derive(Debug, Deserialize)]
struct PropertyRecord {
    name: String,
    #[serde(rename = "type")]
    type_tag: String,
    #[serde(default)]
    min: Option<BoundRecord>,
    #[serde(default)]
    max: Option<BoundRecord>,
    #[serde(default, rename = "usesAlpha")]
    uses_alpha: Option<bool>,
    #[serde(default)]
    default: Option<serde_json::Value>,
}

/// `min`/`max` value; its meaning depends on the property type
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum BoundRecord {
    Int(i64),
    Float(f64),
    Pair([f64; 2]),
}

/// Location of a property, for error reporting
struct Site<'a> {
    namespace: Namespace,
    group: &'a str,
    property: &'a str,
}

impl Site<'_> {
    fn invalid(&self, field: &'static str, expected: &'static str) -> DatasetError {
        DatasetError::InvalidField {
            namespace: self.namespace,
            group: self.group.to_string(),
            property: self.property.to_string(),
            field,
            expected,
        }
    }
}

impl DatasetRecord {
    pub(crate) fn into_schema(self) -> Result<Schema, DatasetError> {
        let mut schema = Schema::new();
        for (namespace, groups) in [
            (Namespace::Events, self.level_events),
            (Namespace::Settings, self.settings),
        ] {
            for record in groups {
                let group = record.into_group(namespace)?;
                if schema.groups(namespace).contains_key(group.name()) {
                    return Err(DatasetError::DuplicateGroup {
                        namespace,
                        group: group.name().to_string(),
                    });
                }
                schema.insert_group(namespace, group);
            }
        }
        Ok(schema)
    }
}

impl GroupRecord {
    fn into_group(self, namespace: Namespace) -> Result<PropertyGroup, DatasetError> {
        let mut group = PropertyGroup::new(self.name);
        for record in self.properties {
            let site = Site {
                namespace,
                group: group.name(),
                property: &record.name,
            };
            let kind = record.kind(&site)?;
            if group.contains(&record.name) {
                return Err(DatasetError::DuplicateProperty {
                    namespace,
                    group: group.name().to_string(),
                    property: record.name,
                });
            }
            group.insert(PropertyDefinition {
                name: record.name,
                kind,
                default: record.default,
            });
        }
        Ok(group)
    }
}

impl PropertyRecord {
    fn kind(&self, site: &Site<'_>) -> Result<PropertyKind, DatasetError> {
        let kind = match self.type_tag.as_str() {
            "Color" => PropertyKind::Color {
                uses_alpha: self.uses_alpha.unwrap_or(true),
            },
            "Int" => PropertyKind::Int {
                min: int_bound(self.min, i64::MIN, site, "min")?,
                max: int_bound(self.max, i64::MAX, site, "max")?,
            },
            "Float" => PropertyKind::Float {
                min: float_bound(self.min, f64::NEG_INFINITY, site, "min")?,
                max: float_bound(self.max, f64::INFINITY, site, "max")?,
            },
            "Vector2" => PropertyKind::Vector2 {
                min: vec_bound(self.min, Vec2::NEG_INFINITY, site, "min")?,
                max: vec_bound(self.max, Vec2::INFINITY, site, "max")?,
            },
            "Export" => PropertyKind::Export,
            tag => match tag.strip_prefix("Enum:") {
                Some(enum_type) => PropertyKind::Enum {
                    enum_type: enum_type.to_string(),
                },
                None => PropertyKind::Other {
                    tag: tag.to_string(),
                },
            },
        };
        Ok(kind)
    }
}

fn int_bound(
    bound: Option<BoundRecord>,
    absent: i64,
    site: &Site<'_>,
    field: &'static str,
) -> Result<i64, DatasetError> {
    match bound {
        None => Ok(absent),
        Some(BoundRecord::Int(v)) => Ok(v),
        Some(_) => Err(site.invalid(field, "integer")),
    }
}

#[allow(clippy::cast_precision_loss)]
fn float_bound(
    bound: Option<BoundRecord>,
    absent: f64,
    site: &Site<'_>,
    field: &'static str,
) -> Result<f64, DatasetError> {
    match bound {
        None => Ok(absent),
        Some(BoundRecord::Int(v)) => Ok(v as f64),
        Some(BoundRecord::Float(v)) => Ok(v),
        Some(BoundRecord::Pair(_)) => Err(site.invalid(field, "number")),
    }
}

fn vec_bound(
    bound: Option<BoundRecord>,
    absent: Vec2,
    site: &Site<'_>,
    field: &'static str,
) -> Result<Vec2, DatasetError> {
    match bound {
        None => Ok(absent),
        Some(BoundRecord::Pair(pair)) => Ok(Vec2::from(pair)),
        Some(_) => Err(site.invalid(field, "pair of numbers")),
    }
}
