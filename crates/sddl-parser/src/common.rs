use std::ops::Range;

use chumsky::prelude::*;
use sddl_ast::{Kind, Literal, Span, TypeRef};

use crate::lexer::Token;
use crate::line_index::LineIndex;

pub type PErr = Simple<Token>;

/// Spans built while parsing a well-formed file carry a placeholder `line`;
/// [`crate::finalize::stamp_lines`] re-stamps every one of them from the
/// real `LineIndex` in a second pass once the whole file has parsed, so the
/// grammar in `expr.rs`/`stmt.rs` never needs one in scope.
pub fn mk_span(source_id: u16, range: Range<usize>) -> Span {
    Span::new(source_id, 0, range)
}

/// Builds a `Span` with its line resolved immediately. Used for error spans:
/// a failed parse never reaches `stamp_lines`, so these must carry the real
/// line from the start rather than the placeholder `mk_span` leaves behind.
pub fn mk_error_span(source_id: u16, range: Range<usize>, line_index: &LineIndex) -> Span {
    let line = line_index.line_of(range.start);
    Span::new(source_id, line, range)
}

pub fn ctrl(c: &str) -> impl Parser<Token, (), Error = PErr> + Clone {
    just(Token::Control(c.to_string())).ignored()
}

pub fn kw(k: &'static str) -> impl Parser<Token, (), Error = PErr> + Clone {
    just(Token::Keyword(k)).ignored()
}

pub fn ident() -> impl Parser<Token, String, Error = PErr> + Clone {
    select! { Token::Ident(name) => name }
}

pub fn place() -> impl Parser<Token, i64, Error = PErr> + Clone {
    select! { Token::Place(p) => p }
}

pub fn literal() -> impl Parser<Token, Literal, Error = PErr> + Clone {
    select! { Token::Literal(l) => l }
}

/// `boolean | integer | number | string`
pub fn builtin_kind() -> impl Parser<Token, Kind, Error = PErr> + Clone {
    kw("boolean")
        .to(Kind::Boolean)
        .or(kw("integer").to(Kind::Integer))
        .or(kw("number").to(Kind::Number))
        .or(kw("string").to(Kind::String))
}

/// `builtin-kind | NAME`, used for entry/alias/call type positions.
pub fn type_ref() -> impl Parser<Token, TypeRef, Error = PErr> + Clone {
    builtin_kind()
        .map(TypeRef::Builtin)
        .or(ident().map(TypeRef::Other))
}
