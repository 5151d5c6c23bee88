//! Traits for records that can be searched.
//!
//! This module provides the [`Searchable`] trait which compiled queries use
//! to read attribute values off a record and its nested elements.

use crate::fields::{ElementAttr, RecordAttr};
use crate::value::Value;

/// Trait for records that compiled queries can evaluate.
///
/// [`Card`](crate::Card) implements it; other record types can implement it
/// manually to reuse the query engine.
///
/// # Manual Implementation
///
/// ```
/// use cardseek::{ElementAttr, RecordAttr, Searchable, Value};
///
/// struct Deck {
///     game: String,
///     card_names: Vec<String>,
/// }
///
/// impl Searchable for Deck {
///     fn record_value(&self, attr: RecordAttr) -> Value<'_> {
///         match attr {
///             RecordAttr::Game => Value::String(&self.game),
///             _ => Value::None,
///         }
///     }
///
///     fn any_element(&self, attr: ElementAttr, test: &dyn Fn(&Value<'_>) -> bool) -> bool {
///         match attr {
///             ElementAttr::Name => self.card_names.iter().any(|n| test(&Value::String(n))),
///             _ => false,
///         }
///     }
/// }
///
/// let deck = Deck { game: "OP".into(), card_names: vec!["Luffy".into()] };
/// assert!(cardseek::CompiledQuery::parse("g:op name:luffy").unwrap().matches(&deck));
/// ```
pub trait Searchable {
    /// Returns the value of a record-level attribute.
    ///
    /// Attributes the record does not carry return [`Value::None`].
    fn record_value(&self, attr: RecordAttr) -> Value<'_>;

    /// Returns `true` if `test` holds for the attribute of at least one
    /// element, across every group of the record.
    ///
    /// Implementations stop at the first element that passes. A record with
    /// no elements returns `false`.
    fn any_element(&self, attr: ElementAttr, test: &dyn Fn(&Value<'_>) -> bool) -> bool;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn record_value(&self, attr: RecordAttr) -> Value<'_> {
        (**self).record_value(attr)
    }

    fn any_element(&self, attr: ElementAttr, test: &dyn Fn(&Value<'_>) -> bool) -> bool {
        (**self).any_element(attr, test)
    }
}
