//! Error type shared by the lexer, parser and compiler crates.

use std::fmt::{self, Debug, Display, Formatter};

use serde::Serialize;

use crate::Span;

#[derive(Debug, Clone)]
pub struct Error {
    pub kind: MessageKind,
    pub span: Option<Span>,
    pub reason: Reason,
    pub hints: Vec<String>,
    pub code: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct Errors(pub Vec<Error>);

/// Compile message kind. Currently only `Error` is produced by this compiler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum MessageKind {
    Error,
}

#[derive(Debug, Clone)]
pub enum Reason {
    Simple(String),
    /// A parser recognition failure: the expected token display names and
    /// the actual token text, per spec.md §4.8.
    Expected {
        expected: Vec<String>,
        found: String,
    },
    /// `spec.md` §7 "Name conflict".
    Conflict { namespace: &'static str, name: String },
    /// `spec.md` §7 "Place conflict".
    PlaceConflict { namespace: &'static str, place: i64 },
    /// `spec.md` §7 "Unresolved reference".
    NotFound { namespace: &'static str, name: String },
    /// `spec.md` §7 "Circular reference".
    Circular { namespace: &'static str, name: String },
    /// `spec.md` §7 "Type mismatch".
    TypeMismatch { detail: String },
}

impl Error {
    pub fn new(reason: Reason) -> Self {
        Error {
            kind: MessageKind::Error,
            span: None,
            reason,
            hints: Vec::new(),
            code: None,
        }
    }

    pub fn new_simple<S: ToString>(reason: S) -> Self {
        Error::new(Reason::Simple(reason.to_string()))
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Simple(text) => f.write_str(text),
            Reason::Expected { expected, found } => {
                write!(f, "expected {}, but found {found}", expected.join(" or "))
            }
            Reason::Conflict { namespace, name } => {
                write!(f, "{namespace} '{name}' is already defined")
            }
            Reason::PlaceConflict { namespace, place } => {
                write!(f, "place @{place} is already used in this {namespace}")
            }
            Reason::NotFound { namespace, name } => {
                write!(f, "{namespace} '{name}' could not be found")
            }
            Reason::Circular { namespace, name } => {
                write!(
                    f,
                    "unable to evaluate {namespace} '{name}' due to circular reference"
                )
            }
            Reason::TypeMismatch { detail } => f.write_str(detail),
        }
    }
}

impl std::error::Error for Error {}
impl std::error::Error for Errors {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(span) = &self.span {
            write!(f, "{span:?}: ")?;
        }
        write!(f, "{}", self.reason)?;
        for hint in &self.hints {
            write!(f, "\n\u{21b3} Hint: {hint}")?;
        }
        Ok(())
    }
}

impl Debug for Errors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl Display for Errors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl From<Error> for Errors {
    fn from(error: Error) -> Self {
        Errors(vec![error])
    }
}

pub trait WithErrorInfo: Sized {
    fn push_hint<S: Into<String>>(self, hint: S) -> Self;
    fn with_span(self, span: Option<Span>) -> Self;
    fn with_span_fallback(self, span: Option<Span>) -> Self;
    fn with_code(self, code: &'static str) -> Self;
}

impl WithErrorInfo for Error {
    fn push_hint<S: Into<String>>(mut self, hint: S) -> Self {
        self.hints.push(hint.into());
        self
    }

    fn with_span(mut self, span: Option<Span>) -> Self {
        self.span = span;
        self
    }

    fn with_span_fallback(mut self, span: Option<Span>) -> Self {
        self.span = self.span.or(span);
        self
    }

    fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }
}

impl<T, E: WithErrorInfo> WithErrorInfo for Result<T, E> {
    fn push_hint<S: Into<String>>(self, hint: S) -> Self {
        self.map_err(|e| e.push_hint(hint))
    }

    fn with_span(self, span: Option<Span>) -> Self {
        self.map_err(|e| e.with_span(span))
    }

    fn with_span_fallback(self, span: Option<Span>) -> Self {
        self.map_err(|e| e.with_span_fallback(span))
    }

    fn with_code(self, code: &'static str) -> Self {
        self.map_err(|e| e.with_code(code))
    }
}
