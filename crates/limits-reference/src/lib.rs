//! Reference property dataset
//!
//! The trusted boundary between the bundled dataset resource and the
//! immutable reference [`Schema`](limits_schema::Schema) used to restore
//! original bounds.
//!
//! # Core Operations
//!
//! - **Decode**: typed records from JSON or YAML, with precise errors
//! - **Build**: records into a [`Schema`](limits_schema::Schema)
//! - **Cache**: load lazily, once, the first time a restore needs it
//!
//! # Example
//!
//! ```rust,ignore
//! use limits_reference::{DatasetFormat, ReferenceSchemaLoader};
//!
//! let loader = ReferenceSchemaLoader::new(DatasetFormat::Json);
//! let reference = loader.load(include_str!("LevelEditorProperties.json"))?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cache;
pub mod error;
pub mod loader;
mod records;

pub use cache::{ReferenceCache, ReferenceSource};
pub use error::DatasetError;
pub use loader::{DatasetFormat, ReferenceSchemaLoader};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
