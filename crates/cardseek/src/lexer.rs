//! Tokenizer for the query language.
//!
//! [`Lexer`] is an iterator over [`Token`]s. It is cheap to clone, so a token
//! stream can be restarted from any point by cloning the lexer there.
//!
//! Token kinds:
//!
//! - `FieldName`: an identifier immediately followed by `:`, `=` or `~`
//! - `Colon`, `Equals`, `Tilde`: field operators
//! - `Term`: a bare word; after a field operator the next word is always a term
//! - `Quoted`: a double-quoted phrase with the quotes stripped
//! - `And`, `Or`, `Not`: keywords, any casing
//! - `Minus`, `Plus`: clause modifiers
//! - `LParen`, `RParen`: grouping

use std::fmt;

use crate::error::{QueryError, Result};

/// The kind of a token, with its text where it has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Term(String),
    Quoted(String),
    FieldName(String),
    Colon,
    Equals,
    Tilde,
    And,
    Or,
    Not,
    Minus,
    Plus,
    LParen,
    RParen,
}

impl TokenKind {
    /// Returns `true` for `:`, `=` and `~`.
    pub fn is_field_operator(&self) -> bool {
        self.operator_char().is_some()
    }

    /// The character of a field operator token.
    pub fn operator_char(&self) -> Option<char> {
        match self {
            TokenKind::Colon => Some(':'),
            TokenKind::Equals => Some('='),
            TokenKind::Tilde => Some('~'),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Term(s) => write!(f, "term '{}'", s),
            TokenKind::Quoted(s) => write!(f, "phrase \"{}\"", s),
            TokenKind::FieldName(s) => write!(f, "field '{}'", s),
            TokenKind::Colon => f.write_str("':'"),
            TokenKind::Equals => f.write_str("'='"),
            TokenKind::Tilde => f.write_str("'~'"),
            TokenKind::And => f.write_str("AND"),
            TokenKind::Or => f.write_str("OR"),
            TokenKind::Not => f.write_str("NOT"),
            TokenKind::Minus => f.write_str("'-'"),
            TokenKind::Plus => f.write_str("'+'"),
            TokenKind::LParen => f.write_str("'('"),
            TokenKind::RParen => f.write_str("')'"),
        }
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Lazy tokenizer over a query string.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    // Set after a field operator: the next word is a value, not a keyword.
    expect_value: bool,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            expect_value: false,
            failed: false,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    /// Consumes characters while `keep` holds and returns them.
    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let end = rest
            .char_indices()
            .find(|&(_, c)| !keep(c))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += end;
        &rest[..end]
    }

    fn quoted(&mut self, start: usize) -> Result<TokenKind> {
        // Opening quote.
        self.pos += 1;
        match self.rest().find('"') {
            Some(end) => {
                let phrase = &self.rest()[..end];
                self.pos += end + 1;
                Ok(TokenKind::Quoted(phrase.to_string()))
            }
            None => Err(QueryError::UnterminatedQuote { position: start }),
        }
    }

    fn value_word(&mut self) -> TokenKind {
        let word = self.take_while(|c| !c.is_whitespace() && c != '(' && c != ')');
        TokenKind::Term(word.to_string())
    }

    fn word(&mut self) -> TokenKind {
        let word = self.take_while(|c| !is_delimiter(c));
        if matches!(self.peek(), Some(':' | '=' | '~')) {
            return TokenKind::FieldName(word.to_string());
        }
        if word.eq_ignore_ascii_case("and") {
            TokenKind::And
        } else if word.eq_ignore_ascii_case("or") {
            TokenKind::Or
        } else if word.eq_ignore_ascii_case("not") {
            TokenKind::Not
        } else {
            TokenKind::Term(word.to_string())
        }
    }

    fn next_token(&mut self) -> Option<Result<Token>> {
        self.skip_whitespace();
        let position = self.pos;
        let c = self.peek()?;
        let expect_value = std::mem::take(&mut self.expect_value);

        let kind = match c {
            '"' => match self.quoted(position) {
                Ok(kind) => kind,
                Err(err) => return Some(Err(err)),
            },
            '(' | ')' | ':' | '=' | '~' => {
                self.pos += 1;
                match c {
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    ':' => TokenKind::Colon,
                    '=' => TokenKind::Equals,
                    _ => TokenKind::Tilde,
                }
            }
            _ if expect_value => self.value_word(),
            '-' | '+' => {
                self.pos += 1;
                if c == '-' {
                    TokenKind::Minus
                } else {
                    TokenKind::Plus
                }
            }
            _ => self.word(),
        };

        self.expect_value = kind.is_field_operator();
        Some(Ok(Token { kind, position }))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_token();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '"' | ':' | '=' | '~')
}

/// Tokenizes a whole query string.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn term(s: &str) -> TokenKind {
        TokenKind::Term(s.to_string())
    }

    fn field(s: &str) -> TokenKind {
        TokenKind::FieldName(s.to_string())
    }

    #[test]
    fn empty_input() {
        assert!(kinds("").is_empty());
        assert!(kinds("   \t ").is_empty());
    }

    #[test]
    fn field_expressions() {
        assert_eq!(
            kinds("set:OP10"),
            vec![field("set"), TokenKind::Colon, term("OP10")]
        );
        assert_eq!(
            kinds("name=namec"),
            vec![field("name"), TokenKind::Equals, term("namec")]
        );
        assert_eq!(
            kinds("name~NameA"),
            vec![field("name"), TokenKind::Tilde, term("NameA")]
        );
    }

    #[test]
    fn keywords_any_case() {
        assert_eq!(
            kinds("a AND b or c Not d"),
            vec![
                term("a"),
                TokenKind::And,
                term("b"),
                TokenKind::Or,
                term("c"),
                TokenKind::Not,
                term("d"),
            ]
        );
    }

    #[test]
    fn keyword_prefix_is_a_term() {
        assert_eq!(kinds("android"), vec![term("android")]);
        assert_eq!(kinds("ORB"), vec![term("ORB")]);
    }

    #[test]
    fn quoted_phrase() {
        assert_eq!(
            kinds(r#"text~"draw a card""#),
            vec![
                field("text"),
                TokenKind::Tilde,
                TokenKind::Quoted("draw a card".into())
            ]
        );
        assert_eq!(kinds(r#""""#), vec![TokenKind::Quoted(String::new())]);
    }

    #[test]
    fn unterminated_quote() {
        let err = tokenize(r#"name:"Monkey D"#).unwrap_err();
        assert_eq!(err, QueryError::UnterminatedQuote { position: 5 });
    }

    #[test]
    fn lexer_stops_after_error() {
        let mut lexer = Lexer::new(r#"a "b"#);
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn operator_chars() {
        assert_eq!(TokenKind::Colon.operator_char(), Some(':'));
        assert_eq!(TokenKind::Equals.operator_char(), Some('='));
        assert_eq!(TokenKind::Tilde.operator_char(), Some('~'));
        assert_eq!(TokenKind::Minus.operator_char(), None);
        assert!(!TokenKind::Term("x".into()).is_field_operator());
    }

    #[test]
    fn grouping_and_modifiers() {
        assert_eq!(
            kinds("-(r:Common) +s:HNT"),
            vec![
                TokenKind::Minus,
                TokenKind::LParen,
                field("r"),
                TokenKind::Colon,
                term("Common"),
                TokenKind::RParen,
                TokenKind::Plus,
                field("s"),
                TokenKind::Colon,
                term("HNT"),
            ]
        );
    }

    #[test]
    fn hyphen_inside_word() {
        assert_eq!(
            kinds("number:OP10-005"),
            vec![field("number"), TokenKind::Colon, term("OP10-005")]
        );
        assert_eq!(kinds("foo-bar"), vec![term("foo-bar")]);
    }

    #[test]
    fn value_position_is_literal() {
        assert_eq!(
            kinds("name:and"),
            vec![field("name"), TokenKind::Colon, term("and")]
        );
        assert_eq!(
            kinds("text:-1000"),
            vec![field("text"), TokenKind::Colon, term("-1000")]
        );
        assert_eq!(
            kinds("text~a:b"),
            vec![field("text"), TokenKind::Tilde, term("a:b")]
        );
    }

    #[test]
    fn value_after_whitespace() {
        assert_eq!(
            kinds("name: Luffy"),
            vec![field("name"), TokenKind::Colon, term("Luffy")]
        );
    }

    #[test]
    fn value_stops_at_paren() {
        assert_eq!(
            kinds("(s:HNT)"),
            vec![
                TokenKind::LParen,
                field("s"),
                TokenKind::Colon,
                term("HNT"),
                TokenKind::RParen
            ]
        );
    }

    #[test]
    fn positions_are_byte_offsets() {
        let tokens = tokenize("s:OP10  name~é").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 8, 12, 13]);
    }

    #[test]
    fn unknown_characters_are_terms() {
        assert_eq!(kinds("@#!"), vec![term("@#!")]);
        assert_eq!(kinds("ä&ö"), vec![term("ä&ö")]);
    }

    #[test]
    fn lexer_is_restartable() {
        let mut lexer = Lexer::new("a b c");
        lexer.next();
        let saved = lexer.clone();
        let first: Vec<_> = lexer.collect();
        let second: Vec<_> = saved.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
