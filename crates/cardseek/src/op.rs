//! Match modes for field expressions.
//!
//! The query language has two ways to compare a field against a value,
//! selected by the operator between them:
//!
//! | Operator | Mode |
//! |----------|------|
//! | `:`, `=` | [`MatchMode::Equals`] |
//! | `~` | [`MatchMode::Contains`] |

use crate::fields::ValueKind;

/// How a field expression compares its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Whole-value match, case-insensitive.
    Equals,
    /// Substring match, case-insensitive.
    Contains,
}

impl MatchMode {
    /// Maps a field operator character to its match mode.
    pub fn from_operator(op: char) -> Option<MatchMode> {
        match op {
            ':' | '=' => Some(MatchMode::Equals),
            '~' => Some(MatchMode::Contains),
            _ => None,
        }
    }

    /// Returns `true` if this mode can be applied to values of the given kind.
    pub fn is_valid_for(self, kind: ValueKind) -> bool {
        match kind {
            ValueKind::Text => true,
            ValueKind::Bool => self == MatchMode::Equals,
        }
    }

    /// Canonical operator used when rendering a query.
    pub fn symbol(self) -> char {
        match self {
            MatchMode::Equals => ':',
            MatchMode::Contains => '~',
        }
    }

    /// Returns the display name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::Equals => "equals",
            MatchMode::Contains => "contains",
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
