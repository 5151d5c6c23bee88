//! Error types for the cardseek crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::fields::ValueKind;

/// Errors raised while turning a query string into a predicate.
///
/// Every variant is raised before any record is looked at: a query either
/// compiles completely or is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A double-quoted phrase was never closed.
    #[error("unterminated quoted string starting at position {position}")]
    UnterminatedQuote { position: usize },

    /// The token stream does not follow the query grammar.
    #[error("syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    /// The field alias is not present in the field table.
    #[error("unknown field '{field}' at position {position}")]
    UnknownField { field: String, position: usize },

    /// The field's value kind cannot support the requested match.
    #[error("field '{field}' holds {kind} values: {detail}")]
    TypeMismatch {
        field: String,
        kind: ValueKind,
        detail: String,
    },
}

/// Coarse classification of a [`QueryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed token stream.
    Lex,
    /// Structurally invalid query, including unknown fields.
    Syntax,
    /// Match mode or literal incompatible with the field type.
    TypeMismatch,
}

impl QueryError {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        QueryError::Syntax {
            position,
            message: message.into(),
        }
    }

    /// Returns the error's classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::UnterminatedQuote { .. } => ErrorKind::Lex,
            QueryError::Syntax { .. } | QueryError::UnknownField { .. } => ErrorKind::Syntax,
            QueryError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
        }
    }

    /// Byte offset of the offending token, when known.
    pub fn position(&self) -> Option<usize> {
        match self {
            QueryError::UnterminatedQuote { position }
            | QueryError::Syntax { position, .. }
            | QueryError::UnknownField { position, .. } => Some(*position),
            QueryError::TypeMismatch { .. } => None,
        }
    }
}

/// Errors raised by the in-memory card store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading a seed directory or file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A seed file is not a JSON array of cards.
    #[error("failed to decode cards from {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The search query was rejected.
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
