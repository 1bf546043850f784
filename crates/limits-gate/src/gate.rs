//! Activation decision

use crate::error::GateError;
use crate::rule::{VersionRule, BASELINE_BUILD};
use std::path::Path;

/// Name of the override file inside the plugin directory
pub const OVERRIDE_FILE_NAME: &str = "Version.txt";

/// Host adapter reporting the running build
///
/// `None` means the host does not expose a build number at all, which is a
/// hard incompatibility.
pub trait HostVersion {
    /// Build number of the running host
    fn build_number(&self) -> Option<i64>;
}

impl HostVersion for Option<i64> {
    fn build_number(&self) -> Option<i64> {
        *self
    }
}

/// Compatibility gate holding the effective rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionGate {
    rule: VersionRule,
}

impl VersionGate {
    /// Create gate with an explicit rule
    #[inline]
    #[must_use]
    pub const fn new(rule: VersionRule) -> Self {
        Self { rule }
    }

    /// Gate from optional override content, falling back to `baseline`
    #[inline]
    #[must_use]
    pub fn from_override(content: Option<&str>, baseline: i64) -> Self {
        Self::new(VersionRule::from_override(content, baseline))
    }

    /// Gate from `Version.txt` in the plugin directory
    ///
    /// A missing or unreadable file counts as absent.
    #[must_use]
    pub fn from_mod_dir(dir: impl AsRef<Path>, baseline: i64) -> Self {
        let path = dir.as_ref().join(OVERRIDE_FILE_NAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::debug!("Cannot read {}: {}", path.display(), e);
                None
            }
        };
        Self::from_override(content.as_deref(), baseline)
    }

    /// Effective rule
    #[inline]
    #[must_use]
    pub const fn rule(&self) -> VersionRule {
        self.rule
    }

    /// Whether the plugin may activate against `host_build`
    #[must_use]
    pub fn decide(&self, host_build: Option<i64>) -> bool {
        let Some(build) = host_build else {
            tracing::warn!("Host does not report a build number");
            return false;
        };
        let accepted = self.rule.accepts(build);
        tracing::debug!(build, rule = %self.rule, accepted, "Compatibility decision");
        accepted
    }

    /// Check a host, returning its build when compatible
    ///
    /// # Errors
    /// `GateError::HostIncompatible` if the build is absent or rejected
    pub fn check<H: HostVersion + ?Sized>(&self, host: &H) -> Result<i64, GateError> {
        let build = host.build_number();
        match build {
            Some(b) if self.decide(build) => Ok(b),
            _ => Err(GateError::HostIncompatible {
                build,
                rule: self.rule,
            }),
        }
    }
}

/// Decide activation against the baseline build
///
/// Shorthand for [`VersionGate::from_override`] with [`BASELINE_BUILD`]
/// followed by [`VersionGate::decide`].
#[must_use]
pub fn decide(host_build: Option<i64>, override_content: Option<&str>) -> bool {
    VersionGate::from_override(override_content, BASELINE_BUILD).decide(host_build)
}
