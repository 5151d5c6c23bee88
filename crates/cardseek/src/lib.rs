//! Cardseek - Query language and filter engine for trading-card collections.
//!
//! Cardseek turns compact, human-typed queries such as `set:OP10 AND name~luffy`
//! into reusable predicates and applies them to in-memory card collections. It
//! supports:
//!
//! - Field expressions: `field:value` and `field=value` (whole value),
//!   `field~value` (substring), with quoted phrases
//! - Boolean logic: `AND` (or juxtaposition), `OR`, `NOT` / `-`, grouping
//! - Nested matching: content fields match if any part of any face matches
//! - Extendable field tables and an in-memory store with a query cache
//!
//! # Quick Start
//!
//! ```rust
//! use cardseek::{search, Card, CardFace, CardPart};
//!
//! let cards = vec![
//!     Card {
//!         game: "OP".into(),
//!         set_name: "OP10".into(),
//!         faces: vec![CardFace {
//!             parts: vec![CardPart { name: "Monkey D. Luffy".into(), ..CardPart::default() }],
//!             ..CardFace::default()
//!         }],
//!         ..Card::default()
//!     },
//!     Card { game: "FAB".into(), set_name: "HNT".into(), ..Card::default() },
//! ];
//!
//! let results = search(&cards, "set:op10 name~luffy").unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].display_name(), "Monkey D. Luffy");
//! ```
//!
//! # Query Semantics
//!
//! Precedence from lowest to highest:
//!
//! ```text
//! OR  <  AND / juxtaposition  <  NOT / -  <  ( ... )
//! ```
//!
//! Every comparison is ordinal and ignores case. An empty query matches every
//! card. A term without a field (`luffy`) is a syntax error, and so is a
//! query that nests groups and negations more than [`MAX_DEPTH`] deep.
//!
//! # Fields
//!
//! | Alias | Attribute | Scope |
//! |-------|-----------|-------|
//! | `g`, `game` | `Game` | card |
//! | `r`, `rarity` | `Rarity` | card |
//! | `s`, `set` | `SetName` | card |
//! | `number` | `Number` | card |
//! | `language` | `Language` | card |
//! | `foil` | `IsFoil` (boolean) | card |
//! | `n`, `name` | `Name` | any part |
//! | `text` | `Text` | any part |
//! | `t`, `type` | `Type` | any part |
//! | `artist` | `Artist` | any part |
//!
//! Boolean fields accept `:` and `=` with `true`, `false`, `1` or `0`.

mod clause;
mod compile;
mod error;
mod fields;
mod lexer;
mod model;
mod op;
mod parser;
mod search;
mod store;
mod traits;
mod value;

// Re-export public API
pub use clause::{Clause, ClauseValue};
pub use compile::{compile, Predicate};
pub use error::{ErrorKind, QueryError, Result, StoreError};
pub use fields::{ElementAttr, FieldBinding, FieldTable, RecordAttr, ValueKind, STANDARD_FIELDS};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use model::{Card, CardFace, CardPart};
pub use op::MatchMode;
pub use parser::{parse_query, FieldMatch, Node, Query, MAX_DEPTH};
pub use search::{search, search_with, CompiledQuery};
pub use store::{CardStore, StoreConfig, DEFAULT_CACHE_CAPACITY};
pub use traits::Searchable;
pub use value::{fold_case, parse_bool, Value};
