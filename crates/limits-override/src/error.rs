//! Error types for override passes

use limits_schema::Namespace;
use std::fmt;

/// Override pass refused; the live schema is untouched
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OverrideError {
    /// Restore requested without a reference schema
    #[error("restore requires a reference schema")]
    ReferenceUnavailable,

    /// Live schema and reference schema have drifted apart
    #[error("schema mismatch at {namespace}/{group}{}: {reason}", display_property(.property))]
    SchemaMismatch {
        namespace: Namespace,
        group: String,
        property: Option<String>,
        reason: MismatchReason,
    },
}

impl OverrideError {
    /// Check if error is a live/reference drift
    #[inline]
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::SchemaMismatch { .. })
    }
}

fn display_property(property: &Option<String>) -> String {
    property
        .as_deref()
        .map_or_else(String::new, |p| format!("/{p}"))
}

/// Why a live entry has no usable reference counterpart
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchReason {
    /// Reference has no group of that name
    MissingGroup,
    /// Reference group has no property of that name
    MissingProperty,
    /// Reference property is of a different kind
    KindChanged {
        /// Kind in the live schema
        live: String,
        /// Kind in the reference schema
        reference: String,
    },
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGroup => f.write_str("group absent from reference"),
            Self::MissingProperty => f.write_str("property absent from reference"),
            Self::KindChanged { live, reference } => {
                write!(f, "live kind {live} but reference kind {reference}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_display() {
        let err = OverrideError::SchemaMismatch {
            namespace: Namespace::Events,
            group: "MoveTrack".to_string(),
            property: Some("speed".to_string()),
            reason: MismatchReason::MissingProperty,
        };
        assert_eq!(
            err.to_string(),
            "schema mismatch at levelEvents/MoveTrack/speed: property absent from reference"
        );
        assert!(err.is_mismatch());

        let err = OverrideError::SchemaMismatch {
            namespace: Namespace::Settings,
            group: "Song".to_string(),
            property: None,
            reason: MismatchReason::MissingGroup,
        };
        assert_eq!(
            err.to_string(),
            "schema mismatch at settings/Song: group absent from reference"
        );
    }

    #[test]
    fn reference_unavailable_is_not_mismatch() {
        assert!(!OverrideError::ReferenceUnavailable.is_mismatch());
    }
}
