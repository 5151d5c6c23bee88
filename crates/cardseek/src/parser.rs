//! Recursive-descent parser for the query language.
//!
//! # Grammar
//!
//! Precedence from lowest to highest: `OR`, `AND` (explicit or by
//! juxtaposition), `NOT`/`-` prefix, grouping.
//!
//! ```text
//! query      := orGroup
//! orGroup    := andGroup ( "OR" andGroup )*
//! andGroup   := modClause ( ["AND"] modClause )*
//! modClause  := [ "-" | "+" | "NOT" ] clause
//! clause     := fieldExpr | "(" query ")"
//! fieldExpr  := FIELD_NAME ( ":" | "=" | "~" ) ( TERM | QUOTED )
//! ```
//!
//! A term without a field has no predicate meaning and is rejected.
//! Groups and negations may nest at most [`MAX_DEPTH`] deep.

use std::fmt;
use std::iter::Peekable;

use crate::error::{QueryError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::op::MatchMode;

/// A node of the query syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// True if any child is true.
    Or(Vec<Node>),
    /// True if every child is true.
    And(Vec<Node>),
    /// Logical negation.
    Not(Box<Node>),
    /// Leaf test against a field.
    FieldMatch(FieldMatch),
}

/// A `field<op>value` leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    /// Field alias as typed.
    pub field: String,
    pub mode: MatchMode,
    pub value: String,
    /// Byte offset of the field name.
    pub position: usize,
}

impl Node {
    /// Builds a conjunction, unwrapping a single child.
    fn and(mut children: Vec<Node>) -> Node {
        if children.len() == 1 {
            children.remove(0)
        } else {
            Node::And(children)
        }
    }

    /// Builds a disjunction, unwrapping a single child.
    fn or(mut children: Vec<Node>) -> Node {
        if children.len() == 1 {
            children.remove(0)
        } else {
            Node::Or(children)
        }
    }

    /// Visits every leaf of the tree, left to right.
    pub fn for_each_field_match<'a>(&'a self, visit: &mut impl FnMut(&'a FieldMatch)) {
        match self {
            Node::Or(children) | Node::And(children) => {
                for child in children {
                    child.for_each_field_match(visit);
                }
            }
            Node::Not(child) => child.for_each_field_match(visit),
            Node::FieldMatch(leaf) => visit(leaf),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Or(children) => write_joined(f, children, " OR "),
            Node::And(children) => write_joined(f, children, " AND "),
            Node::Not(child) => write!(f, "NOT {}", Parenthesized(child)),
            Node::FieldMatch(leaf) => write!(f, "{}", leaf),
        }
    }
}

impl fmt::Display for FieldMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain = !self.value.is_empty()
            && !self
                .value
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '"'));
        if plain {
            write!(f, "{}{}{}", self.field, self.mode.symbol(), self.value)
        } else {
            write!(f, "{}{}\"{}\"", self.field, self.mode.symbol(), self.value)
        }
    }
}

/// Wraps combinator children in parentheses when rendering.
struct Parenthesized<'a>(&'a Node);

impl fmt::Display for Parenthesized<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Node::Or(_) | Node::And(_) => write!(f, "({})", self.0),
            _ => write!(f, "{}", self.0),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Node], sep: &str) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", Parenthesized(child))?;
    }
    Ok(())
}

/// A parsed query string.
///
/// An empty or whitespace-only string parses to a query with no root, which
/// matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub root: Option<Node>,
}

impl Query {
    /// Check if this query matches everything (no filters applied).
    pub fn is_match_all(&self) -> bool {
        self.root.is_none()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{}", root),
            None => Ok(()),
        }
    }
}

/// Parses a query string into a syntax tree.
pub fn parse_query(input: &str) -> Result<Query> {
    if input.trim().is_empty() {
        return Ok(Query::default());
    }
    let mut parser = Parser {
        tokens: Lexer::new(input).peekable(),
        end: input.len(),
        depth: 0,
    };
    let root = parser.or_group()?;
    match parser.next()? {
        None => Ok(Query { root: Some(root) }),
        Some(token) if token.kind == TokenKind::RParen => Err(QueryError::syntax(
            token.position,
            "unmatched closing parenthesis",
        )),
        Some(token) => Err(unexpected(&token)),
    }
}

/// Deepest nesting of groups and negations a query may use.
pub const MAX_DEPTH: usize = 128;

struct Parser<'a> {
    tokens: Peekable<Lexer<'a>>,
    end: usize,
    // Open groups and negations around the current position.
    depth: usize,
}

impl Parser<'_> {
    fn enter(&mut self, position: usize) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(QueryError::syntax(position, "query nested too deeply"));
        }
        Ok(())
    }

    fn peek(&mut self) -> Result<Option<&Token>> {
        match self.tokens.peek() {
            Some(Ok(token)) => Ok(Some(token)),
            Some(Err(err)) => Err(err.clone()),
            None => Ok(None),
        }
    }

    fn peek_kind(&mut self) -> Result<Option<TokenKind>> {
        Ok(self.peek()?.map(|t| t.kind.clone()))
    }

    fn next(&mut self) -> Result<Option<Token>> {
        self.tokens.next().transpose()
    }

    fn or_group(&mut self) -> Result<Node> {
        let mut children = vec![self.and_group()?];
        while let Some(TokenKind::Or) = self.peek_kind()? {
            self.next()?;
            children.push(self.and_group()?);
        }
        Ok(Node::or(children))
    }

    fn and_group(&mut self) -> Result<Node> {
        let mut children = vec![self.mod_clause()?];
        loop {
            match self.peek_kind()? {
                None | Some(TokenKind::Or) | Some(TokenKind::RParen) => break,
                Some(TokenKind::And) => {
                    self.next()?;
                }
                Some(_) => {}
            }
            children.push(self.mod_clause()?);
        }
        Ok(Node::and(children))
    }

    fn mod_clause(&mut self) -> Result<Node> {
        match self.peek_kind()? {
            Some(TokenKind::Minus) | Some(TokenKind::Not) => {
                let position = self.next()?.map_or(self.end, |t| t.position);
                self.enter(position)?;
                let child = self.clause()?;
                self.depth -= 1;
                Ok(Node::Not(Box::new(child)))
            }
            Some(TokenKind::Plus) => {
                self.next()?;
                self.clause()
            }
            _ => self.clause(),
        }
    }

    fn clause(&mut self) -> Result<Node> {
        let token = match self.next()? {
            Some(token) => token,
            None => return Err(QueryError::syntax(self.end, "expected a clause")),
        };
        match token.kind {
            TokenKind::FieldName(field) => self.field_expr(field, token.position),
            TokenKind::LParen => {
                self.enter(token.position)?;
                let inner = self.group(token.position)?;
                self.depth -= 1;
                Ok(inner)
            }
            TokenKind::Term(term) | TokenKind::Quoted(term) => Err(QueryError::syntax(
                token.position,
                format!("'{}' has no field; use field:value", term),
            )),
            _ => Err(unexpected(&token)),
        }
    }

    /// Parses the rest of a group whose `(` is at `open`.
    fn group(&mut self, open: usize) -> Result<Node> {
        if let Some(TokenKind::RParen) = self.peek_kind()? {
            return Err(QueryError::syntax(open, "empty group"));
        }
        let inner = self.or_group()?;
        match self.next()? {
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => Ok(inner),
            Some(other) => Err(unexpected(&other)),
            None => Err(QueryError::syntax(open, "missing closing parenthesis")),
        }
    }

    fn field_expr(&mut self, field: String, position: usize) -> Result<Node> {
        let op = match self.next()? {
            Some(token) => token,
            None => {
                return Err(QueryError::syntax(
                    self.end,
                    format!("expected operator after field '{}'", field),
                ))
            }
        };
        let mode = match op.kind.operator_char().and_then(MatchMode::from_operator) {
            Some(mode) => mode,
            None => return Err(unexpected(&op)),
        };
        match self.next()? {
            Some(Token {
                kind: TokenKind::Term(value) | TokenKind::Quoted(value),
                ..
            }) => Ok(Node::FieldMatch(FieldMatch {
                field,
                mode,
                value,
                position,
            })),
            Some(other) => Err(QueryError::syntax(
                other.position,
                format!("expected a value for field '{}', found {}", field, other.kind),
            )),
            None => Err(QueryError::syntax(
                self.end,
                format!("missing value for field '{}'", field),
            )),
        }
    }
}

fn unexpected(token: &Token) -> QueryError {
    QueryError::syntax(token.position, format!("unexpected {}", token.kind))
}
