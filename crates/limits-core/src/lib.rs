//! Limits Core - plugin context
//!
//! Wires the compatibility gate, the reference schema, the override
//! engine and the synthetic settings registry into one context the host
//! drives through its lifecycle events:
//! - activation (`PluginContext::activate`)
//! - enable/disable (`PluginContext::on_toggle`)
//! - settings save (`PluginContext::on_settings_saved`)
//! - settings UI draw (`PluginContext::poll_ui`)
//!
//! # Example
//!
//! ```rust,no_run
//! use limits_core::prelude::*;
//! use limits_schema::{Schema, SharedSchema};
//!
//! # fn example() -> Result<(), limits_core::PluginError> {
//! let config = PluginConfig::default();
//! let store = JsonSettingsStore::new(config.settings_path());
//! let live = SharedSchema::new(Schema::new());
//!
//! let mut ctx = PluginContext::activate(config, &Some(76_i64), live, Box::new(store))?;
//! ctx.on_toggle(true)?;
//! ctx.on_settings_saved(ctx.flags().clone().with_remove_limits(true))?;
//! ctx.deactivate()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod context;
pub mod error;
pub mod highlight;
pub mod settings;

pub use config::{PluginConfig, DEFAULT_MOD_DIR, REFERENCE_DATASET_FILE, SETTINGS_FILE};
pub use context::PluginContext;
pub use error::{PluginError, Result};
pub use highlight::{NoHighlighter, TileHighlighter};
pub use settings::{FeatureFlags, JsonSettingsStore, SettingsError, SettingsStore};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for hosting the plugin
    pub use crate::{
        FeatureFlags, JsonSettingsStore, PluginConfig, PluginContext, PluginError,
        SettingsStore, TileHighlighter,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
