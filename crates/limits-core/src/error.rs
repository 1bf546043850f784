//! Error types for the plugin context

use crate::settings::SettingsError;
use limits_gate::GateError;
use limits_override::OverrideError;
use limits_reference::DatasetError;

/// Main plugin error type
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Host build rejected at activation
    #[error(transparent)]
    HostIncompatible(#[from] GateError),

    /// Reference dataset could not be decoded
    #[error("reference dataset malformed: {0}")]
    ReferenceDatasetMalformed(#[from] DatasetError),

    /// Override pass failed
    #[error("override failed: {0}")]
    Override(#[from] OverrideError),

    /// Settings could not be persisted
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
}

impl PluginError {
    /// Whether activation should abort
    #[inline]
    #[must_use]
    pub fn is_incompatible(&self) -> bool {
        matches!(self, Self::HostIncompatible(_))
    }
}

/// Result alias for plugin operations
pub type Result<T> = std::result::Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;
    use limits_gate::VersionRule;

    #[test]
    fn gate_error_converts() {
        let err: PluginError = GateError::HostIncompatible {
            build: Some(69),
            rule: ">=70".parse::<VersionRule>().unwrap(),
        }
        .into();
        assert!(err.is_incompatible());
        assert_eq!(err.to_string(), "host build 69 is incompatible (requires >=70)");
    }

    #[test]
    fn override_error_display() {
        let err = PluginError::from(OverrideError::ReferenceUnavailable);
        assert!(!err.is_incompatible());
        assert!(err.to_string().starts_with("override failed: "));
    }
}
