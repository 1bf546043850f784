//! Build comparators

use std::fmt;

/// How the host build is compared with the target build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Comparator {
    /// `==`
    #[default]
    Exact,
    /// `>=`
    NotLess,
    /// `<=`
    NotBigger,
    /// `>`
    Bigger,
    /// `<`
    Less,
}

impl Comparator {
    /// Comparators in the order their tokens are tried when parsing.
    /// Two-character tokens come before their one-character prefixes.
    pub const PARSE_ORDER: [Self; 5] = [
        Self::NotLess,
        Self::NotBigger,
        Self::Bigger,
        Self::Less,
        Self::Exact,
    ];

    /// Textual token
    #[inline]
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Exact => "==",
            Self::NotLess => ">=",
            Self::NotBigger => "<=",
            Self::Bigger => ">",
            Self::Less => "<",
        }
    }

    /// Split a leading comparator token off `text`
    ///
    /// Returns `None` when `text` starts with no token.
    #[must_use]
    pub fn split_prefix(text: &str) -> Option<(Self, &str)> {
        Self::PARSE_ORDER
            .into_iter()
            .find_map(|cmp| text.strip_prefix(cmp.token()).map(|rest| (cmp, rest)))
    }

    /// Whether `host` satisfies the comparator against `target`
    #[inline]
    #[must_use]
    pub const fn holds(self, host: i64, target: i64) -> bool {
        match self {
            Self::Exact => host == target,
            Self::NotLess => host >= target,
            Self::NotBigger => host <= target,
            Self::Bigger => host > target,
            Self::Less => host < target,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
