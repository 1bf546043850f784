//! Plugin configuration

use limits_gate::BASELINE_BUILD;
use limits_reference::ReferenceSource;
use std::path::{Path, PathBuf};

/// Default plugin directory, relative to the host's working directory
pub const DEFAULT_MOD_DIR: &str = "Mods/EditorHelper";

/// Default reference dataset file name inside the plugin directory
pub const REFERENCE_DATASET_FILE: &str = "LevelEditorProperties.json";

/// Default settings file name inside the plugin directory
pub const SETTINGS_FILE: &str = "Settings.json";

/// Plugin configuration
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Plugin directory holding `Version.txt` and the settings file
    pub mod_dir: PathBuf,
    /// Build accepted when no usable override exists
    pub baseline_build: i64,
    /// Where the reference dataset is loaded from
    pub reference: ReferenceSource,
    /// Settings file name inside `mod_dir`
    pub settings_file: String,
}

impl PluginConfig {
    /// Configuration rooted at a plugin directory
    #[must_use]
    pub fn new(mod_dir: impl Into<PathBuf>) -> Self {
        let mod_dir = mod_dir.into();
        Self {
            reference: ReferenceSource::Path(mod_dir.join(REFERENCE_DATASET_FILE)),
            mod_dir,
            baseline_build: BASELINE_BUILD,
            settings_file: SETTINGS_FILE.to_string(),
        }
    }

    /// With baseline build
    #[inline]
    #[must_use]
    pub fn with_baseline_build(mut self, build: i64) -> Self {
        self.baseline_build = build;
        self
    }

    /// With reference dataset source
    #[inline]
    #[must_use]
    pub fn with_reference(mut self, reference: ReferenceSource) -> Self {
        self.reference = reference;
        self
    }

    /// With settings file name
    #[inline]
    #[must_use]
    pub fn with_settings_file(mut self, name: impl Into<String>) -> Self {
        self.settings_file = name.into();
        self
    }

    /// Plugin directory
    #[inline]
    #[must_use]
    pub fn mod_dir(&self) -> &Path {
        &self.mod_dir
    }

    /// Full path of the settings file
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.mod_dir.join(&self.settings_file)
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MOD_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths() {
        let config = PluginConfig::default();
        assert_eq!(config.baseline_build, 76);
        assert_eq!(
            config.settings_path(),
            Path::new(DEFAULT_MOD_DIR).join(SETTINGS_FILE)
        );
        assert!(matches!(
            config.reference,
            ReferenceSource::Path(ref p) if p.ends_with(REFERENCE_DATASET_FILE)
        ));
    }

    #[test]
    fn builders() {
        let config = PluginConfig::new("/tmp/plugin")
            .with_baseline_build(80)
            .with_settings_file("flags.json")
            .with_reference(ReferenceSource::json("{}"));
        assert_eq!(config.baseline_build, 80);
        assert_eq!(config.settings_path(), Path::new("/tmp/plugin/flags.json"));
        assert!(matches!(config.reference, ReferenceSource::Text { .. }));
    }
}
