//! Predicate compiler: syntax tree to reusable record predicate.
//!
//! [`compile`] resolves every field alias against a [`FieldTable`] and turns
//! the tree into a [`Predicate`]. All resolution and type checking happens
//! here, so evaluation is a plain walk with no lookups and no failure modes.

use crate::clause::Clause;
use crate::error::{QueryError, Result};
use crate::fields::{ElementAttr, FieldBinding, FieldTable, RecordAttr, ValueKind};
use crate::parser::{FieldMatch, Node};
use crate::traits::Searchable;
use crate::value::parse_bool;

/// A compiled boolean test over one record.
///
/// Predicates own all their data and hold no per-call state, so one value
/// can be shared between threads and evaluated any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// True if any child is true; false when empty.
    Or(Vec<Predicate>),
    /// True if every child is true; true when empty.
    And(Vec<Predicate>),
    Not(Box<Predicate>),
    /// Test on a record-level attribute.
    Direct { attr: RecordAttr, clause: Clause },
    /// Test that passes if any element of any group passes.
    Nested { attr: ElementAttr, clause: Clause },
}

impl Predicate {
    /// Evaluates the predicate against a record.
    pub fn evaluate<R: Searchable + ?Sized>(&self, record: &R) -> bool {
        match self {
            Predicate::Or(children) => children.iter().any(|c| c.evaluate(record)),
            Predicate::And(children) => children.iter().all(|c| c.evaluate(record)),
            Predicate::Not(child) => !child.evaluate(record),
            Predicate::Direct { attr, clause } => clause.matches(&record.record_value(*attr)),
            Predicate::Nested { attr, clause } => {
                record.any_element(*attr, &|value| clause.matches(value))
            }
        }
    }
}

/// Compiles a syntax tree against a field table.
///
/// Fails with [`QueryError::UnknownField`] for aliases missing from the
/// table, and with [`QueryError::TypeMismatch`] when a boolean field is used
/// with `~` or with a literal that is not `true`, `false`, `1` or `0`.
///
/// # Example
///
/// ```
/// use cardseek::{compile, parse_query, FieldTable};
///
/// let query = parse_query("s:OP10 -r:Common").unwrap();
/// let predicate = compile(query.root.as_ref().unwrap(), &FieldTable::standard()).unwrap();
/// assert!(matches!(predicate, cardseek::Predicate::And(_)));
/// ```
pub fn compile(node: &Node, fields: &FieldTable) -> Result<Predicate> {
    let predicate = compile_node(node, fields)?;
    log::debug!("compiled query: {}", node);
    Ok(predicate)
}

fn compile_node(node: &Node, fields: &FieldTable) -> Result<Predicate> {
    match node {
        Node::Or(children) => Ok(Predicate::Or(compile_all(children, fields)?)),
        Node::And(children) => Ok(Predicate::And(compile_all(children, fields)?)),
        Node::Not(child) => Ok(Predicate::Not(Box::new(compile_node(child, fields)?))),
        Node::FieldMatch(leaf) => compile_leaf(leaf, fields),
    }
}

fn compile_all(children: &[Node], fields: &FieldTable) -> Result<Vec<Predicate>> {
    children.iter().map(|c| compile_node(c, fields)).collect()
}

fn compile_leaf(leaf: &FieldMatch, fields: &FieldTable) -> Result<Predicate> {
    let binding = fields
        .resolve(&leaf.field)
        .ok_or_else(|| QueryError::UnknownField {
            field: leaf.field.clone(),
            position: leaf.position,
        })?;
    let clause = build_clause(leaf, binding.kind())?;
    Ok(match binding {
        FieldBinding::Direct(attr) => Predicate::Direct { attr, clause },
        FieldBinding::Nested(attr) => Predicate::Nested { attr, clause },
    })
}

fn build_clause(leaf: &FieldMatch, kind: ValueKind) -> Result<Clause> {
    if !leaf.mode.is_valid_for(kind) {
        return Err(QueryError::TypeMismatch {
            field: leaf.field.clone(),
            kind,
            detail: format!("operator '{}' is not valid", leaf.mode),
        });
    }
    match kind {
        ValueKind::Text => Ok(Clause::text(leaf.mode, &leaf.value)),
        ValueKind::Bool => parse_bool(&leaf.value)
            .map(Clause::boolean)
            .ok_or_else(|| QueryError::TypeMismatch {
                field: leaf.field.clone(),
                kind,
                detail: format!(
                    "'{}' is not a boolean (expected true, false, 1 or 0)",
                    leaf.value
                ),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::op::MatchMode;
    use crate::parser::parse_query;
    use crate::value::Value;

    struct Item {
        set: &'static str,
        foil: bool,
        number: Option<&'static str>,
        names: Vec<Vec<&'static str>>,
    }

    impl Searchable for Item {
        fn record_value(&self, attr: RecordAttr) -> Value<'_> {
            match attr {
                RecordAttr::SetName => Value::String(self.set),
                RecordAttr::IsFoil => Value::Bool(self.foil),
                RecordAttr::Number => self.number.into(),
                _ => Value::None,
            }
        }

        fn any_element(&self, attr: ElementAttr, test: &dyn Fn(&Value<'_>) -> bool) -> bool {
            attr == ElementAttr::Name
                && self
                    .names
                    .iter()
                    .flatten()
                    .any(|name| test(&Value::String(name)))
        }
    }

    fn item() -> Item {
        Item {
            set: "OP10",
            foil: true,
            number: None,
            names: vec![vec!["Part1"], vec!["Part2", "NameC"]],
        }
    }

    fn predicate(input: &str) -> Result<Predicate> {
        let query = parse_query(input)?;
        compile(query.root.as_ref().unwrap(), &FieldTable::standard())
    }

    fn eval(input: &str) -> bool {
        predicate(input).unwrap().evaluate(&item())
    }

    #[test]
    fn direct_and_nested() {
        assert!(eval("set:op10"));
        assert!(!eval("set:OP1"));
        assert!(eval("set~op"));
        assert!(eval("name:part1"));
        assert!(eval("name:namec"));
        assert!(!eval("name:Part3"));
        assert!(eval("name~art2"));
    }

    #[test]
    fn combinators() {
        assert!(eval("set:OP10 name:Part2"));
        assert!(!eval("set:OP10 name:Part3"));
        assert!(eval("name:Part3 OR name:Part1"));
        assert!(eval("-name:Part3"));
        assert!(!eval("NOT (set:OP10 OR name:zz)"));
    }

    #[test]
    fn absent_value_never_matches() {
        assert!(!eval("number:1"));
        assert!(!eval("number~\"\""));
        assert!(eval("-number:1"));
    }

    #[test]
    fn empty_combinators() {
        assert!(!Predicate::Or(Vec::new()).evaluate(&item()));
        assert!(Predicate::And(Vec::new()).evaluate(&item()));
    }

    #[test]
    fn no_elements() {
        let empty = Item {
            names: Vec::new(),
            ..item()
        };
        assert!(!predicate("name~\"\"").unwrap().evaluate(&empty));
        assert!(predicate("-name:x").unwrap().evaluate(&empty));
    }

    #[test]
    fn boolean_field() {
        assert!(eval("foil:true"));
        assert!(eval("foil=1"));
        assert!(eval("foil:TRUE"));
        assert!(!eval("foil:false"));
        assert!(eval("-foil:0"));
    }

    #[test]
    fn boolean_contains_is_type_mismatch() {
        let err = predicate("foil~true").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(err.to_string().contains("contains"));
    }

    #[test]
    fn boolean_literal_must_parse() {
        let err = predicate("foil:yes").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(matches!(err, QueryError::TypeMismatch { ref field, .. } if field == "foil"));
    }

    #[test]
    fn unknown_field() {
        let err = predicate("s:OP10 zz:foo").unwrap_err();
        assert_eq!(
            err,
            QueryError::UnknownField {
                field: "zz".into(),
                position: 7
            }
        );
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn unknown_field_under_not_is_still_an_error() {
        assert!(predicate("-(zz:foo)").is_err());
    }

    #[test]
    fn field_case_is_ignored() {
        assert_eq!(predicate("SET:OP10").unwrap(), predicate("set:OP10").unwrap());
        assert_eq!(predicate("g:OP").unwrap(), predicate("game:op").unwrap());
    }

    #[test]
    fn custom_table() {
        let fields = FieldTable::empty().with_alias("nm", FieldBinding::Nested(ElementAttr::Name));
        let query = parse_query("nm:Part2").unwrap();
        let compiled = compile(query.root.as_ref().unwrap(), &fields).unwrap();
        assert!(compiled.evaluate(&item()));
        assert!(predicate("nm:Part2").is_err());
    }

    #[test]
    fn compiled_shape() {
        assert_eq!(
            predicate("s:OP10").unwrap(),
            Predicate::Direct {
                attr: RecordAttr::SetName,
                clause: Clause::text(MatchMode::Equals, "OP10"),
            }
        );
    }
}
