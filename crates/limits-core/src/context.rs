//! Plugin context
//!
//! Owns everything the plugin keeps between host events:
//! - The activation decision and the host build it was made for
//! - The persisted feature flags and their last applied state
//! - The lazily loaded reference schema
//! - The override engine and the synthetic settings registry
//!
//! Created by [`PluginContext::activate`], handed every host event and
//! dropped through [`PluginContext::deactivate`].

use crate::config::PluginConfig;
use crate::error::{PluginError, Result};
use crate::highlight::{NoHighlighter, TileHighlighter};
use crate::settings::{FeatureFlags, SettingsStore};
use limits_gate::{HostVersion, VersionGate};
use limits_override::{ConstraintOverrideEngine, FeatureToggleRegistry, Mode, OverrideReport};
use limits_reference::ReferenceCache;
use limits_schema::{SchemaHost, SharedSchema};
use std::fmt;

/// State of an activated plugin
pub struct PluginContext<S: SchemaHost> {
    config: PluginConfig,
    build: i64,
    live: SharedSchema<S>,
    reference: ReferenceCache,
    engine: ConstraintOverrideEngine,
    registry: FeatureToggleRegistry,
    store: Box<dyn SettingsStore>,
    highlighter: Box<dyn TileHighlighter>,
    flags: FeatureFlags,
    /// `moreEditorSettings` as last applied to the live schema
    more_settings_applied: bool,
    /// `highlightTargetedTiles` as last seen by the UI poll
    highlight_applied: bool,
    enabled: bool,
}

impl<S: SchemaHost> PluginContext<S> {
    /// Decide activation and build the context
    ///
    /// Reads the override file from the configured plugin directory and
    /// loads the persisted flags. Unreadable flags fall back to defaults.
    /// The plugin starts disabled; see [`on_toggle`](Self::on_toggle).
    ///
    /// # Errors
    /// `PluginError::HostIncompatible` if the host build is rejected
    pub fn activate<H: HostVersion + ?Sized>(
        config: PluginConfig,
        host: &H,
        live: SharedSchema<S>,
        store: Box<dyn SettingsStore>,
    ) -> Result<Self> {
        let gate = VersionGate::from_mod_dir(config.mod_dir(), config.baseline_build);
        let build = gate.check(host).map_err(|e| {
            tracing::warn!("Activation refused: {}", e);
            e
        })?;

        let flags = store.load().unwrap_or_else(|e| {
            tracing::warn!("Settings unreadable, using defaults: {}", e);
            FeatureFlags::default()
        });

        let registry = FeatureToggleRegistry::new();
        let engine = ConstraintOverrideEngine::new().with_synthetic(registry.synthetic_paths());
        let reference = ReferenceCache::new(config.reference.clone());

        tracing::info!("Plugin activated for host build {}", build);
        Ok(Self {
            config,
            build,
            live,
            reference,
            engine,
            registry,
            store,
            highlighter: Box::new(NoHighlighter),
            flags,
            more_settings_applied: false,
            highlight_applied: false,
            enabled: false,
        })
    }

    /// With tile highlighter
    #[must_use]
    pub fn with_highlighter(mut self, highlighter: Box<dyn TileHighlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Configuration this context was activated with
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Host build accepted at activation
    #[inline]
    #[must_use]
    pub fn build(&self) -> i64 {
        self.build
    }

    /// Current feature flags
    #[inline]
    #[must_use]
    pub fn flags(&self) -> &FeatureFlags {
        &self.flags
    }

    /// Whether the plugin is enabled
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Live schema handle
    #[inline]
    #[must_use]
    pub fn live(&self) -> &SharedSchema<S> {
        &self.live
    }

    /// Tile highlighter
    #[inline]
    #[must_use]
    pub fn highlighter(&self) -> &dyn TileHighlighter {
        self.highlighter.as_ref()
    }

    /// Whether the reference schema has been decoded
    #[inline]
    #[must_use]
    pub fn is_reference_loaded(&self) -> bool {
        self.reference.is_loaded()
    }

    /// Host enabled or disabled the plugin
    ///
    /// Enabling syncs the synthetic entries with `moreEditorSettings` and
    /// applies the flags. Disabling clears highlights, removes the
    /// synthetic entries and forces a restore regardless of
    /// `removeLimits`.
    ///
    /// # Errors
    /// Any error of [`apply_config`](Self::apply_config)
    pub fn on_toggle(&mut self, enabled: bool) -> Result<Option<OverrideReport>> {
        tracing::info!("Plugin {}", if enabled { "enabled" } else { "disabled" });

        if enabled {
            self.enabled = true;
            self.set_more_settings(self.flags.more_editor_settings);
            return self.apply_config(false);
        }

        self.highlighter.untarget();
        self.highlight_applied = false;
        self.set_more_settings(false);
        let result = self.apply_config(true);
        self.enabled = false;
        result
    }

    /// Host saved the settings UI
    ///
    /// Persists `flags`, then (while enabled) follows a
    /// `moreEditorSettings` transition and applies the flags. A failed
    /// save does not block the override pass.
    ///
    /// # Errors
    /// - Any error of [`apply_config`](Self::apply_config)
    /// - `PluginError::Settings` if the flags could not be persisted
    pub fn on_settings_saved(&mut self, flags: FeatureFlags) -> Result<Option<OverrideReport>> {
        self.flags = flags;
        let saved = self.store.save(&self.flags).map_err(|e| {
            tracing::warn!("Failed to persist settings: {}", e);
            PluginError::from(e)
        });

        if !self.enabled {
            return saved.map(|()| None);
        }

        if self.flags.more_editor_settings != self.more_settings_applied {
            self.set_more_settings(self.flags.more_editor_settings);
        }
        let report = self.apply_config(false)?;
        saved?;
        Ok(report)
    }

    /// Host drew the settings UI
    ///
    /// Follows `highlightTargetedTiles` transitions while enabled.
    pub fn poll_ui(&mut self) {
        let wanted = self.flags.highlight_targeted_tiles;
        if !self.enabled || wanted == self.highlight_applied {
            return;
        }

        self.highlight_applied = wanted;
        if wanted {
            self.highlighter.target();
        } else if self.highlighter.has_targets() {
            self.highlighter.untarget();
        }
        tracing::debug!(highlight = wanted, "Tile highlighting toggled");
    }

    /// Run one override pass for the current flags
    ///
    /// Relaxes when `removeLimits` is on and no restore is forced,
    /// otherwise restores from the reference schema, which is loaded on
    /// first use. Returns `Ok(None)` while the host has not populated its
    /// live schema.
    ///
    /// # Errors
    /// - `PluginError::ReferenceDatasetMalformed` if the reference cannot be loaded
    /// - `PluginError::Override` if the live schema does not match the reference
    ///
    /// On error the live schema is unchanged.
    pub fn apply_config(&self, force_restore: bool) -> Result<Option<OverrideReport>> {
        if !self.live.read().is_initialized() {
            tracing::debug!("Live schema not initialized, skipping override pass");
            return Ok(None);
        }

        let mode = Mode::select(self.flags.remove_limits, force_restore);
        let reference = match mode {
            Mode::Relax => None,
            Mode::Restore => Some(self.reference.get_or_load()?),
        };

        self.engine
            .apply_shared(mode, &self.live, reference.as_deref())
            .map(Some)
            .map_err(|e| {
                tracing::error!("Override pass aborted: {}", e);
                PluginError::from(e)
            })
    }

    /// Disable (if needed) and drop the context
    ///
    /// # Errors
    /// Any error of the final restore
    pub fn deactivate(mut self) -> Result<()> {
        if self.enabled {
            self.on_toggle(false)?;
        }
        tracing::info!("Plugin deactivated");
        Ok(())
    }

    fn set_more_settings(&mut self, enabled: bool) {
        let registry = &self.registry;
        self.live
            .with_write(|live| registry.set_more_settings(enabled, live));
        self.more_settings_applied = enabled;
    }
}

impl<S: SchemaHost> fmt::Debug for PluginContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginContext")
            .field("build", &self.build)
            .field("enabled", &self.enabled)
            .field("flags", &self.flags)
            .field("reference_loaded", &self.reference.is_loaded())
            .finish_non_exhaustive()
    }
}
