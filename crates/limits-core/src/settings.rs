//! Feature flags and their persistence

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Persisted feature flags
///
/// Only three flags drive this crate. Every other entry of the settings
/// blob belongs to UI toggles and is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    /// Expose the synthetic `MiscSettings` entries
    #[serde(default)]
    pub more_editor_settings: bool,
    /// Relax every property bound
    #[serde(default)]
    pub remove_limits: bool,
    /// Highlight tiles targeted by the selected event
    #[serde(default)]
    pub highlight_targeted_tiles: bool,
    /// Unrelated UI settings
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl FeatureFlags {
    /// With `removeLimits`
    #[inline]
    #[must_use]
    pub fn with_remove_limits(mut self, on: bool) -> Self {
        self.remove_limits = on;
        self
    }

    /// With `moreEditorSettings`
    #[inline]
    #[must_use]
    pub fn with_more_editor_settings(mut self, on: bool) -> Self {
        self.more_editor_settings = on;
        self
    }

    /// With `highlightTargetedTiles`
    #[inline]
    #[must_use]
    pub fn with_highlight_targeted_tiles(mut self, on: bool) -> Self {
        self.highlight_targeted_tiles = on;
        self
    }
}

/// Settings blob could not be read or written
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error on the settings file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not a valid flag mapping
    #[error("malformed settings in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load/save contract of the settings persistence collaborator
pub trait SettingsStore: Send {
    /// Load flags; a store with nothing saved yields defaults
    ///
    /// # Errors
    /// `SettingsError` if stored flags exist but cannot be read
    fn load(&self) -> Result<FeatureFlags, SettingsError>;

    /// Persist flags
    ///
    /// # Errors
    /// `SettingsError` if the flags cannot be written
    fn save(&self, flags: &FeatureFlags) -> Result<(), SettingsError>;
}

/// Settings stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    /// Store backed by `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SettingsError {
        SettingsError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Result<FeatureFlags, SettingsError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No settings at {}, using defaults", self.path.display());
                return Ok(FeatureFlags::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&raw).map_err(|source| SettingsError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, flags: &FeatureFlags) -> Result<(), SettingsError> {
        let raw = serde_json::to_string_pretty(flags).map_err(|source| SettingsError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, raw).map_err(|e| self.io_error(e))
    }
}
