//! Tokenizer for SDDL source, in the style of `prql-compiler`'s hand-rolled
//! chumsky lexer (`parser/lexer.rs` in the teacher): a flat `Token` enum fed
//! by a single `Parser<char, ...>` combinator, run once up front so the
//! grammar parser itself only ever sees tokens.

use chumsky::prelude::*;
use sddl_ast::Literal;

#[derive(Clone, PartialEq, Debug)]
pub enum Token {
    Ident(String),
    Literal(Literal),
    /// `@123`
    Place(i64),
    Keyword(&'static str),
    /// Single- or double-character punctuation: `{ } [ ] ( ) ; , @ = -> .. ! < <= > >= == != + - * / % ^`
    Control(String),
}

const KEYWORDS: &[&str] = &[
    "require", "auto", "local", "boolean", "integer", "number", "string", "delete", "null",
    "option", "array", "table", "and", "or",
];

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(s) => write!(f, "`{s}`"),
            Token::Literal(l) => write!(f, "{l}"),
            Token::Place(p) => write!(f, "@{p}"),
            Token::Keyword(k) => write!(f, "'{k}'"),
            Token::Control(c) => write!(f, "'{c}'"),
        }
    }
}

pub fn lexer() -> impl Parser<char, Vec<(Token, std::ops::Range<usize>)>, Error = Simple<char>> {
    let place = just('@')
        .ignore_then(text::int(10))
        .map(|s: String| Token::Place(s.parse().unwrap()));

    let control_multi = just("->")
        .or(just(".."))
        .or(just("=="))
        .or(just("!="))
        .or(just(">="))
        .or(just("<="))
        .map(|s: &str| Token::Control(s.to_string()));

    let control = one_of("{}[]();,=<>!+-*/%^")
        .map(|c: char| Token::Control(c.to_string()));

    let ident = ident_or_keyword();

    let literal = literal().map(Token::Literal);

    let comment = just('#').then(filter(|c: &char| *c != '\n').repeated());

    // `literal` must be tried before `control`: spec.md §4.7 parses INTEGER
    // and FLOAT as signed, so a `-` immediately followed by a digit has to
    // lex as part of the number, not as a standalone `Control("-")` token
    // (the number parser itself declines when `-` isn't glued to a digit,
    // falling through to `control` for plain subtraction like `a - b`).
    place
        .or(control_multi)
        .or(literal)
        .or(control)
        .or(ident)
        .map_with_span(|tok, span| (tok, span))
        .padded_by(comment.repeated())
        .padded()
        .repeated()
        .then_ignore(end())
}

fn ident_or_keyword() -> impl Parser<char, Token, Error = Simple<char>> {
    raw_ident().map(|name| {
        if let Some(kw) = KEYWORDS.iter().find(|k| **k == name) {
            Token::Keyword(kw)
        } else {
            Token::Ident(name)
        }
    })
}

fn raw_ident() -> impl Parser<char, String, Error = Simple<char>> {
    filter(|c: &char| c.is_ascii_alphabetic() || *c == '_')
        .map(Some)
        .chain::<char, Vec<_>, _>(
            filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_').repeated(),
        )
        .collect()
}

fn literal() -> impl Parser<char, Literal, Error = Simple<char>> {
    let hex = just("0x")
        .or(just("0X"))
        .ignore_then(
            filter(|c: &char| c.is_ascii_hexdigit())
                .repeated()
                .at_least(1)
                .collect::<String>(),
        )
        .try_map(|digits, span| {
            i32::from_str_radix(&digits, 16)
                .map(Literal::Integer)
                .map_err(|_| Simple::custom(span, "invalid hex literal"))
        });

    let int_part = filter(|c: &char| c.is_ascii_digit())
        .repeated()
        .at_least(1)
        .collect::<String>();

    let frac_part = just('.').ignore_then(int_part.clone()).or_not();

    let exp_part = one_of::<_, _, Simple<char>>("eE")
        .ignore_then(one_of("+-").or_not())
        .then(int_part.clone())
        .map(|(sign, digits)| format!("{}{digits}", sign.map(String::from).unwrap_or_default()))
        .or_not();

    let number = just('-')
        .or_not()
        .then(int_part)
        .then(frac_part)
        .then(exp_part)
        .map(|(((sign, int_s), frac_s), exp_s)| {
            let mut s = String::new();
            if sign.is_some() {
                s.push('-');
            }
            s.push_str(&int_s);
            let mut is_float = false;
            if let Some(f) = &frac_s {
                is_float = true;
                s.push('.');
                s.push_str(f);
            }
            if let Some(e) = &exp_s {
                is_float = true;
                s.push('e');
                s.push_str(e);
            }
            (s, is_float)
        })
        .try_map(|(s, is_float), span| {
            if is_float {
                s.parse::<f64>()
                    .map(Literal::Float)
                    .map_err(|_| Simple::custom(span, "invalid number"))
            } else {
                s.parse::<i32>()
                    .map(Literal::Integer)
                    .map_err(|_| Simple::custom(span, "invalid number"))
            }
        });

    let bool_ = just("true")
        .to(true)
        .or(just("false").to(false))
        .map(Literal::Boolean);

    let string = string_literal().map(Literal::String);

    hex.or(string).or(bool_).or(number).labelled("literal")
}

/// Decodes the escape set of spec.md §4.6. `\uXXXX` decodes all four hex
/// digits uniformly (see SPEC_FULL.md Open Question 3), including `\u0000`,
/// which must round-trip to a real NUL code unit rather than vanish;
/// unrecognised `\X` sequences are silently dropped, matching the source's
/// behaviour.
fn string_literal() -> impl Parser<char, String, Error = Simple<char>> {
    // `None` means "this escape decodes to nothing" (the drop-silently
    // case); a decoded `'\0'` is a real character and must stay `Some`, so
    // the two can't share a sentinel.
    let escape = just('\\').ignore_then(
        just('f')
            .to(Some('\x0C'))
            .or(just('n').to(Some('\n')))
            .or(just('r').to(Some('\r')))
            .or(just('t').to(Some('\t')))
            .or(just('"').to(Some('"')))
            .or(just('\'').to(Some('"'))) // Open Question 2: preserved verbatim.
            .or(just('\\').to(Some('\\')))
            .or(just('u').ignore_then(
                filter(|c: &char| c.is_ascii_hexdigit())
                    .repeated()
                    .exactly(4)
                    .collect::<String>()
                    .map(|hex| {
                        Some(
                            u32::from_str_radix(&hex, 16)
                                .ok()
                                .and_then(char::from_u32)
                                .unwrap_or('\u{FFFD}'),
                        )
                    }),
            ))
            .or(any().ignored().to(None)),
    );

    let dq_body = filter(|c: &char| *c != '\\' && *c != '"')
        .map(Some)
        .or(escape.clone())
        .repeated()
        .collect::<Vec<_>>()
        .map(|cs| cs.into_iter().flatten().collect::<String>());

    let sq_body = filter(|c: &char| *c != '\\' && *c != '\'')
        .map(Some)
        .or(escape)
        .repeated()
        .collect::<Vec<_>>()
        .map(|cs| cs.into_iter().flatten().collect::<String>());

    just('"')
        .ignore_then(dq_body)
        .then_ignore(just('"'))
        .or(just('\'').ignore_then(sq_body).then_ignore(just('\'')))
        .labelled("string")
}
