//! Clause types for query predicates.
//!
//! A [`Clause`] is the scalar test at the leaf of a compiled query: a match
//! mode and a comparison value, applied to one attribute value.

use crate::op::MatchMode;
use crate::value::{fold_case, Value};

/// A single scalar test.
///
/// Text clauses compare ordinally and ignore case; the comparison value is
/// folded once when the clause is built.
///
/// # Example
///
/// ```
/// use cardseek::{Clause, MatchMode, Value};
///
/// let clause = Clause::text(MatchMode::Contains, "NameA");
/// assert!(clause.matches(&Value::String("NameAA")));
/// assert!(!clause.matches(&Value::String("NameB")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// The comparison mode.
    pub mode: MatchMode,
    /// The value to compare against.
    pub value: ClauseValue,
}

impl Clause {
    /// Creates a text clause.
    pub fn text(mode: MatchMode, value: &str) -> Self {
        Clause {
            mode,
            value: ClauseValue::Text(fold_case(value)),
        }
    }

    /// Creates a boolean equality clause.
    pub fn boolean(value: bool) -> Self {
        Clause {
            mode: MatchMode::Equals,
            value: ClauseValue::Bool(value),
        }
    }

    /// Evaluates this clause against an attribute value.
    ///
    /// Absent values never match, and neither do values of another type.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match (&self.value, field_value) {
            (ClauseValue::Text(pattern), Value::String(s)) => self.match_text(s, pattern),
            (ClauseValue::Bool(expected), Value::Bool(b)) => {
                self.mode == MatchMode::Equals && b == expected
            }
            (_, Value::None) => false,
            _ => false,
        }
    }

    fn match_text(&self, field: &str, pattern: &str) -> bool {
        match self.mode {
            MatchMode::Equals => field.chars().flat_map(char::to_lowercase).eq(pattern.chars()),
            MatchMode::Contains => pattern.is_empty() || fold_case(field).contains(pattern),
        }
    }
}

/// Owned comparison value stored in a clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseValue {
    /// Case-folded text.
    Text(String),
    /// Boolean value.
    Bool(bool),
}

impl std::fmt::Display for ClauseValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClauseValue::Text(s) => write!(f, "{:?}", s),
            ClauseValue::Bool(b) => write!(f, "{}", b),
        }
    }
}
