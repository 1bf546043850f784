//! Property definitions and their kind-specific bounds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-component float vector used by `Vector2` bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl Vec2 {
    /// Both components at negative infinity
    pub const NEG_INFINITY: Self = Self::splat(f64::NEG_INFINITY);

    /// Both components at positive infinity
    pub const INFINITY: Self = Self::splat(f64::INFINITY);

    /// Create new vector
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector with both components set to `v`
    #[inline]
    #[must_use]
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Kind of an editable property, carrying only the bounds meaningful to it
///
/// Only `Color`, `Int`, `Float` and `Vector2` have bounds the override
/// engine touches. The remaining kinds pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PropertyKind {
    /// Colour picker
    Color {
        /// Whether the alpha channel is editable
        uses_alpha: bool,
    },
    /// Integer field
    Int {
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
    },
    /// Float field
    Float {
        /// Lower bound, may be `-inf`
        min: f64,
        /// Upper bound, may be `+inf`
        max: f64,
    },
    /// Two-component vector field
    Vector2 {
        /// Component-wise lower bound
        min: Vec2,
        /// Component-wise upper bound
        max: Vec2,
    },
    /// Enumeration of a named host enum (`Enum:<name>` in datasets)
    Enum {
        /// Host enum type name
        enum_type: String,
    },
    /// Action button that exports something
    Export,
    /// Any other kind, kept opaque
    Other {
        /// Raw type tag as found in the dataset
        tag: String,
    },
}

impl PropertyKind {
    /// Whether the override engine rewrites this kind
    #[inline]
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        matches!(
            self,
            Self::Color { .. } | Self::Int { .. } | Self::Float { .. } | Self::Vector2 { .. }
        )
    }

    /// Short kind name, without bounds
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Color { .. } => "Color",
            Self::Int { .. } => "Int",
            Self::Float { .. } => "Float",
            Self::Vector2 { .. } => "Vector2",
            Self::Enum { .. } => "Enum",
            Self::Export => "Export",
            Self::Other { tag } => tag,
        }
    }

    /// Whether `other` is the same kind, ignoring bounds
    #[must_use]
    pub fn same_kind(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Enum { enum_type: a }, Self::Enum { enum_type: b }) => a == b,
            (Self::Other { tag: a }, Self::Other { tag: b }) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enum { enum_type } => write!(f, "Enum:{enum_type}"),
            other => f.write_str(other.name()),
        }
    }
}

/// One editable field of an event type or settings category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    /// Name, unique within the owning group
    pub name: String,
    /// Kind and bounds
    pub kind: PropertyKind,
    /// Default value, passed through opaquely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl PropertyDefinition {
    /// Create definition without a default value
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    /// With default value
    #[inline]
    #[must_use]
    pub fn with_default(mut self, default: impl Into<serde_json::Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Integer property with bounds
    #[inline]
    #[must_use]
    pub fn int(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self::new(name, PropertyKind::Int { min, max })
    }

    /// Float property with bounds
    #[inline]
    #[must_use]
    pub fn float(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new(name, PropertyKind::Float { min, max })
    }

    /// Colour property
    #[inline]
    #[must_use]
    pub fn color(name: impl Into<String>, uses_alpha: bool) -> Self {
        Self::new(name, PropertyKind::Color { uses_alpha })
    }

    /// Vector property with bounds
    #[inline]
    #[must_use]
    pub fn vector2(name: impl Into<String>, min: impl Into<Vec2>, max: impl Into<Vec2>) -> Self {
        Self::new(
            name,
            PropertyKind::Vector2 {
                min: min.into(),
                max: max.into(),
            },
        )
    }
}
