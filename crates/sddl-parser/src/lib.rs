//! Turns SDDL source text into an [`sddl_ast::File`]. Mirrors the shape of
//! `prqlc-parser`: a standalone lexer feeding a chumsky grammar over tokens,
//! with errors translated into the shared `sddl_ast::Error` type rather than
//! chumsky's own `Simple`.

mod common;
mod expr;
mod finalize;
mod lexer;
mod line_index;
mod stmt;

use chumsky::prelude::*;
use chumsky::Stream;

use lexer::Token;
use line_index::LineIndex;
use sddl_ast::{Error, Errors, Reason, WithErrorInfo};

/// Parses a single SDDL source file. `source_id` identifies this file among
/// the others a compilation may `require`, and is stamped onto every span
/// produced so diagnostics can point back at the right file.
pub fn parse_source(source_id: u16, source: &str) -> Result<sddl_ast::File, Errors> {
    let line_index = LineIndex::new(source);

    let (tokens, lex_errors) = lexer::lexer().parse_recovery(source);

    if !lex_errors.is_empty() {
        return Err(Errors(
            lex_errors
                .into_iter()
                .map(|e| convert_lex_error(e, source_id, &line_index))
                .collect(),
        ));
    }
    let tokens = tokens.expect("no lex errors implies a token stream");

    let len = source.chars().count();
    let stream = Stream::from_iter(len..len + 1, tokens.into_iter());

    let (file, parse_errors) = stmt::file(source_id).parse_recovery(stream);

    if !parse_errors.is_empty() {
        return Err(Errors(
            parse_errors
                .into_iter()
                .map(|e| convert_parse_error(e, source_id, &line_index))
                .collect(),
        ));
    }
    let mut file = file.expect("no parse errors implies a File");

    finalize::stamp_lines(&mut file, &line_index);

    Ok(file)
}

fn convert_lex_error(e: Simple<char>, source_id: u16, line_index: &LineIndex) -> Error {
    let span = common::mk_error_span(source_id, e.span(), line_index);
    let found = e
        .found()
        .map(|c| format!("'{c}'"))
        .unwrap_or_else(|| "<EOF>".to_string());
    let expected = vec!["a valid token".to_string()];
    Error::new(Reason::Expected { expected, found }).with_span(Some(span))
}

fn convert_parse_error(e: Simple<Token>, source_id: u16, line_index: &LineIndex) -> Error {
    let span = common::mk_error_span(source_id, e.span(), line_index);
    let expected: Vec<String> = e
        .expected()
        .map(|t| match t {
            Some(t) => t.to_string(),
            None => "<EOF>".to_string(),
        })
        .collect();
    let found = e
        .found()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "<EOF>".to_string());
    Error::new(Reason::Expected { expected, found }).with_span(Some(span))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_a_constant() {
        let file = parse_source(0, "auto x = 1 + 2;").unwrap();
        assert_eq!(file.items.len(), 1);
    }

    #[test]
    fn parses_a_message() {
        let file = parse_source(0, "Point { integer x@1; integer y@2; }").unwrap();
        assert_eq!(file.items.len(), 1);
    }

    #[test]
    fn reports_expected_tokens_on_error() {
        let err = parse_source(0, "auto x = ;").unwrap_err();
        assert!(!err.0.is_empty());
    }

    #[test]
    fn parse_error_carries_the_line_it_occurred_on() {
        let err = parse_source(0, "auto x = 1;\nauto y = ;").unwrap_err();
        let span = err.0[0].span.expect("parse errors carry a span");
        assert_eq!(span.line, 2);
    }

    #[test]
    fn lex_error_carries_the_line_it_occurred_on() {
        let err = parse_source(0, "auto x = 1;\nauto y = `;").unwrap_err();
        let span = err.0[0].span.expect("lex errors carry a span");
        assert_eq!(span.line, 2);
    }

    #[test]
    fn a_minus_sign_glued_to_a_digit_lexes_as_a_signed_literal() {
        use sddl_ast::{Item, Literal};

        let file = parse_source(0, "integer X = -5;").unwrap();
        let Item::Constant(c) = &file.items[0] else {
            panic!("expected a constant");
        };
        assert_eq!(c.expr.kind, sddl_ast::ExprKind::Literal(Literal::Integer(-5)));
    }

    #[test]
    fn a_minus_sign_followed_by_whitespace_is_still_subtraction() {
        let file = parse_source(0, "auto X = 10 - 5;").unwrap();
        assert_eq!(file.items.len(), 1);
    }
}
