use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// A literal as produced by the lexer/parser, before any identifier
/// resolution. Corresponds to the `Value` kinds of spec.md §3, minus the
/// `Other` sentinel which only exists after name resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Boolean(bool),
    Integer(i32),
    Float(f64),
    String(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Integer(i) => write!(f, "{i}"),
            Literal::Float(v) => write!(f, "{v}"),
            Literal::String(s) => write!(f, "{s:?}"),
        }
    }
}
