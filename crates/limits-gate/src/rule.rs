//! Version rules

use crate::comparator::Comparator;
use crate::error::RuleParseError;
use std::fmt;
use std::str::FromStr;

/// Host build the plugin is built against
pub const BASELINE_BUILD: i64 = 76;

/// A comparator and the build it compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionRule {
    /// How the host build is compared
    pub comparator: Comparator,
    /// Build compared against
    pub target: i64,
}

impl VersionRule {
    /// Create new rule
    #[inline]
    #[must_use]
    pub const fn new(comparator: Comparator, target: i64) -> Self {
        Self { comparator, target }
    }

    /// Exact match against `build`
    #[inline]
    #[must_use]
    pub const fn baseline(build: i64) -> Self {
        Self::new(Comparator::Exact, build)
    }

    /// Rule from optional override content, falling back to the baseline
    ///
    /// Malformed content behaves exactly like absent content.
    #[must_use]
    pub fn from_override(content: Option<&str>, baseline: i64) -> Self {
        let Some(content) = content else {
            return Self::baseline(baseline);
        };

        match content.parse::<Self>() {
            Ok(rule) => {
                tracing::info!("Compatibility rule overridden to {}", rule);
                rule
            }
            Err(e) => {
                tracing::debug!(
                    "Ignoring malformed version override {:?}: {}",
                    content,
                    e
                );
                Self::baseline(baseline)
            }
        }
    }

    /// Whether `host` satisfies the rule
    #[inline]
    #[must_use]
    pub const fn accepts(&self, host: i64) -> bool {
        self.comparator.holds(host, self.target)
    }
}

impl Default for VersionRule {
    fn default() -> Self {
        Self::baseline(BASELINE_BUILD)
    }
}

impl FromStr for VersionRule {
    type Err = RuleParseError;

    /// Parse `[comparator]build`, e.g. `>=70` or `76`
    ///
    /// Surrounding whitespace is ignored. A missing comparator means `==`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim_end();
        let (comparator, number) =
            Comparator::split_prefix(text).unwrap_or((Comparator::Exact, text));

        let number = number.trim();
        if number.is_empty() {
            return Err(RuleParseError::Empty);
        }

        let target: i64 = number.parse().map_err(|source| RuleParseError::InvalidNumber {
            text: number.to_string(),
            source,
        })?;
        if target < 0 {
            return Err(RuleParseError::Negative(target));
        }

        Ok(Self::new(comparator, target))
    }
}

impl fmt::Display for VersionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.comparator, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_comparator() {
        for cmp in Comparator::PARSE_ORDER {
            let rule: VersionRule = format!("{}70", cmp.token()).parse().unwrap();
            assert_eq!(rule, VersionRule::new(cmp, 70));
        }
    }

    #[test]
    fn bare_number_is_exact() {
        assert_eq!("80".parse::<VersionRule>().unwrap(), VersionRule::baseline(80));
    }

    #[test]
    fn ignores_trailing_whitespace() {
        assert_eq!(
            ">= 70\r\n".parse::<VersionRule>().unwrap(),
            VersionRule::new(Comparator::NotLess, 70)
        );
    }

    #[test]
    fn comparator_must_lead() {
        assert!(matches!(
            " >=70".parse::<VersionRule>(),
            Err(RuleParseError::InvalidNumber { .. })
        ));
        assert_eq!(
            VersionRule::from_override(Some(" >=70"), 76),
            VersionRule::baseline(76)
        );
        assert!(!crate::decide(Some(71), Some(" >=70")));
        assert!(crate::decide(Some(76), Some(" >=70")));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!("".parse::<VersionRule>(), Err(RuleParseError::Empty));
        assert_eq!(">=".parse::<VersionRule>(), Err(RuleParseError::Empty));
        assert_eq!(">=-3".parse::<VersionRule>(), Err(RuleParseError::Negative(-3)));
        assert!(matches!(
            "garbage".parse::<VersionRule>(),
            Err(RuleParseError::InvalidNumber { .. })
        ));
        assert!(matches!(
            "=>70".parse::<VersionRule>(),
            Err(RuleParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn malformed_override_uses_whole_baseline() {
        // comparator parsed but number bad: the comparator is discarded too
        assert_eq!(
            VersionRule::from_override(Some(">=abc"), 76),
            VersionRule::baseline(76)
        );
        assert_eq!(VersionRule::from_override(None, 76), VersionRule::baseline(76));
    }

    #[test]
    fn display_round_trips() {
        let rule = VersionRule::new(Comparator::Less, 90);
        assert_eq!(rule.to_string(), "<90");
        assert_eq!(rule.to_string().parse::<VersionRule>().unwrap(), rule);
    }

    #[test]
    fn default_is_baseline() {
        assert_eq!(VersionRule::default(), VersionRule::baseline(BASELINE_BUILD));
    }
}
