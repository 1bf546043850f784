//! Constraint override engine
//!
//! Rewrites the bounds of every property in a live schema:
//!
//! - **Relax**: widen every bounded property to its kind's full range
//! - **Restore**: copy original bounds back from the reference schema,
//!   all-or-nothing
//!
//! and maintains the synthetic `MiscSettings` entries that expose extra
//! editor settings.
//!
//! # Example
//!
//! ```rust
//! use limits_override::{ConstraintOverrideEngine, Mode};
//! use limits_schema::{Namespace, PropertyDefinition, PropertyGroup, Schema};
//!
//! let reference = Schema::new().with_group(
//!     Namespace::Events,
//!     PropertyGroup::with_properties("MoveTrack", [PropertyDefinition::int("speed", 0, 100)]),
//! );
//! let mut live = reference.clone();
//! let engine = ConstraintOverrideEngine::new();
//!
//! engine.apply(Mode::Relax, &mut live, None).unwrap();
//! assert_eq!(
//!     live.property(Namespace::Events, "MoveTrack", "speed"),
//!     Some(&PropertyDefinition::int("speed", i64::MIN, i64::MAX))
//! );
//!
//! engine.apply(Mode::Restore, &mut live, Some(&reference)).unwrap();
//! assert_eq!(live, reference);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod engine;
pub mod error;
pub mod toggle;

pub use engine::{ConstraintOverrideEngine, Mode, OverrideReport};
pub use error::{MismatchReason, OverrideError};
pub use toggle::{
    FeatureToggleRegistry, ToggleOutcome, CONVERT_FLOOR_MESH, MISC_SETTINGS_GROUP, USE_LEGACY_FLASH,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
