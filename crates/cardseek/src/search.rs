//! Search facade: query text in, matching records out.
//!
//! [`CompiledQuery`] holds a query that has been lexed, parsed and compiled.
//! Build one per distinct query string and apply it to as many records as
//! needed. The free functions [`search`] and [`search_with`] do the whole
//! pipeline in one call.

use std::fmt;

use crate::compile::{compile, Predicate};
use crate::error::Result;
use crate::fields::FieldTable;
use crate::parser::parse_query;
use crate::traits::Searchable;

/// A parsed and compiled query, ready to filter records.
///
/// A query with no clauses matches every record.
///
/// # Example
///
/// ```
/// use cardseek::{Card, CompiledQuery};
///
/// let cards = vec![
///     Card { set_name: "OP10".into(), rarity: "Common".into(), ..Card::default() },
///     Card { set_name: "HNT".into(), rarity: "Common".into(), ..Card::default() },
/// ];
///
/// let query = CompiledQuery::parse("r:common -s:hnt").unwrap();
/// let results = query.filter(&cards);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].set_name, "OP10");
/// ```
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    source: String,
    predicate: Option<Predicate>,
}

impl CompiledQuery {
    /// Compiles query text against the standard field table.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &FieldTable::standard())
    }

    /// Compiles query text against a custom field table.
    pub fn parse_with(text: &str, fields: &FieldTable) -> Result<Self> {
        let query = parse_query(text)?;
        let predicate = query
            .root
            .as_ref()
            .map(|root| compile(root, fields))
            .transpose()?;
        Ok(CompiledQuery {
            source: text.to_string(),
            predicate,
        })
    }

    /// The query text this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled predicate, or `None` for a match-all query.
    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    /// Returns `true` if this query has no clauses (matches everything).
    pub fn is_match_all(&self) -> bool {
        self.predicate.is_none()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single record matches this query.
    pub fn matches<R: Searchable + ?Sized>(&self, record: &R) -> bool {
        self.predicate
            .as_ref()
            .map_or(true, |predicate| predicate.evaluate(record))
    }

    /// Filters a slice, returning references to matching records in input
    /// order.
    pub fn filter<'a, R: Searchable>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }

    /// Filters a slice, returning clones of matching records.
    pub fn filter_cloned<R: Searchable + Clone>(&self, records: &[R]) -> Vec<R> {
        records
            .iter()
            .filter(|r| self.matches(*r))
            .cloned()
            .collect()
    }

    /// Removes non-matching records in place.
    pub fn retain<R: Searchable>(&self, records: &mut Vec<R>) {
        if !self.is_match_all() {
            records.retain(|r| self.matches(r));
        }
    }

    /// Counts matching records.
    pub fn count<R: Searchable>(&self, records: &[R]) -> usize {
        records.iter().filter(|r| self.matches(*r)).count()
    }

    /// Returns `true` if any record matches.
    pub fn any<R: Searchable>(&self, records: &[R]) -> bool {
        records.iter().any(|r| self.matches(r))
    }

    /// Returns the first matching record.
    pub fn find<'a, R: Searchable>(&self, records: &'a [R]) -> Option<&'a R> {
        records.iter().find(|r| self.matches(*r))
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Filters records with a query using the standard field table.
///
/// An empty query returns every record. Errors are returned before any
/// record is examined.
///
/// ```
/// use cardseek::{search, Card};
///
/// let cards = vec![Card { game: "OP".into(), ..Card::default() }];
/// assert_eq!(search(&cards, "g:op").unwrap().len(), 1);
/// assert_eq!(search(&cards, "").unwrap().len(), 1);
/// assert!(search(&cards, "zz:foo").is_err());
/// ```
pub fn search<'a, R: Searchable>(records: &'a [R], text: &str) -> Result<Vec<&'a R>> {
    search_with(records, text, &FieldTable::standard())
}

/// Filters records with a query using a custom field table.
pub fn search_with<'a, R: Searchable>(
    records: &'a [R],
    text: &str,
    fields: &FieldTable,
) -> Result<Vec<&'a R>> {
    Ok(CompiledQuery::parse_with(text, fields)?.filter(records))
}
