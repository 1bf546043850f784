//! Error types for the compatibility gate

use crate::rule::VersionRule;
use std::num::ParseIntError;

/// Override content is not a comparator followed by a build number
///
/// Never surfaced past the gate: it falls back to the baseline rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleParseError {
    /// Nothing but whitespace (and maybe a comparator)
    #[error("empty build number")]
    Empty,

    /// Remainder is not an integer
    #[error("invalid build number '{text}': {source}")]
    InvalidNumber {
        text: String,
        #[source]
        source: ParseIntError,
    },

    /// Remainder is a negative integer
    #[error("negative build number: {0}")]
    Negative(i64),
}

/// Host cannot run this plugin
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// Host build absent or rejected by the rule
    #[error("host build {} is incompatible (requires {rule})", display_build(.build))]
    HostIncompatible {
        build: Option<i64>,
        rule: VersionRule,
    },
}

fn display_build(build: &Option<i64>) -> String {
    build.map_or_else(|| "unknown".to_string(), |b| b.to_string())
}
