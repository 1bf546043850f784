//! Editable property schema
//!
//! The data model shared by every part of the limits workspace:
//!
//! - [`PropertyDefinition`]: one editable field and its kind-specific bounds
//! - [`PropertyGroup`]: the definitions of one event type or settings category
//! - [`Schema`]: the event and settings namespaces side by side
//! - [`SchemaHost`]: the narrow capability a host grants over its live schema
//!
//! # Architecture
//!
//! ```text
//! host live schema ──(SchemaHost)──► override engine ◄── reference Schema
//!                                          │
//!                            SharedSchema (write guard per pass)
//! ```
//!
//! The host owns its live schema. Everything in this workspace reaches it
//! through [`SchemaHost`], so an in-memory [`Schema`] can stand in for the
//! host in tests and tooling.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod group;
pub mod host;
pub mod property;
pub mod schema;

pub use group::PropertyGroup;
pub use host::{SchemaHost, SharedSchema};
pub use property::{PropertyDefinition, PropertyKind, Vec2};
pub use schema::{Namespace, PropertyPath, Schema};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with property schemas
    pub use crate::group::PropertyGroup;
    pub use crate::host::{SchemaHost, SharedSchema};
    pub use crate::property::{PropertyDefinition, PropertyKind, Vec2};
    pub use crate::schema::{Namespace, PropertyPath, Schema};
}
