//! Host build compatibility gate
//!
//! Decides at startup whether the plugin may activate against the host's
//! build. The rule is a comparator and a target build, read from an optional
//! `Version.txt` override next to the plugin; without a usable override the
//! host must match the baseline build exactly.
//!
//! ```rust
//! use limits_gate::VersionGate;
//!
//! let gate = VersionGate::from_override(Some(">=70"), 76);
//! assert!(gate.decide(Some(76)));
//! assert!(!gate.decide(Some(69)));
//! assert!(!gate.decide(None));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod comparator;
pub mod error;
pub mod gate;
pub mod rule;

pub use comparator::Comparator;
pub use error::{GateError, RuleParseError};
pub use gate::{decide, HostVersion, VersionGate, OVERRIDE_FILE_NAME};
pub use rule::{VersionRule, BASELINE_BUILD};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
