use chumsky::prelude::*;
use chumsky::BoxedParser;
use sddl_ast::{BinOp, Expr, ExprKind, UnOp};

use crate::common::{ctrl, ident, kw, literal, mk_span, PErr};
use crate::lexer::Token;

type BExpr<'a> = BoxedParser<'a, Token, Expr, PErr>;

/// Builds the expression grammar of spec.md §6 (`expr` production), each
/// precedence tier a thin wrapper around the next: `or` is built on `and`,
/// `and` on equality, equality on comparison, comparison on `..` (string
/// concatenation), concatenation on `+`/`-`, those on `*`/`/`/`%`, those on
/// `^` (the only right-associative operator), and `^` on unary `!`.
/// `source_id` is threaded in rather than read from global state, per the
/// "process-global working directory" design note in spec.md §9.
pub fn expr(source_id: u16) -> impl Parser<Token, Expr, Error = PErr> + Clone {
    recursive(|expr| {
        let atom: BExpr = literal()
            .map_with_span(move |l, s| Expr::new(ExprKind::Literal(l), mk_span(source_id, s)))
            .or(ident().map_with_span(move |name, s| {
                Expr::new(ExprKind::Ident(name), mk_span(source_id, s))
            }))
            .or(expr.delimited_by(ctrl("("), ctrl(")")))
            .boxed();

        let unary: BExpr = ctrl("!")
            .map_with_span(move |_, s| mk_span(source_id, s))
            .repeated()
            .then(atom)
            .foldr(|bang_span, e| {
                let span = sddl_ast::Span::merge(bang_span, e.span);
                Expr::new(
                    ExprKind::Unary {
                        op: UnOp::Not,
                        expr: Box::new(e),
                    },
                    span,
                )
            })
            .boxed();

        let pow: BExpr = unary
            .clone()
            .then(ctrl("^").ignore_then(unary).repeated())
            .map(|(first, rest)| fold_right(BinOp::Pow, first, rest))
            .boxed();

        let product = binary_left(
            pow,
            choice((
                ctrl("*").to(BinOp::Mul),
                ctrl("/").to(BinOp::Div),
                ctrl("%").to(BinOp::Mod),
            )),
        );

        let sum = binary_left(
            product,
            choice((ctrl("+").to(BinOp::Add), ctrl("-").to(BinOp::Sub))),
        );

        let concat = binary_left(sum, ctrl("..").to(BinOp::Concat));

        let comparison = binary_left(
            concat,
            choice((
                ctrl("<=").to(BinOp::Le),
                ctrl(">=").to(BinOp::Ge),
                ctrl("<").to(BinOp::Lt),
                ctrl(">").to(BinOp::Gt),
            )),
        );

        let equality = binary_left(
            comparison,
            choice((ctrl("==").to(BinOp::Eq), ctrl("!=").to(BinOp::Ne))),
        );

        let and = binary_left(equality, kw("and").to(BinOp::And));

        binary_left(and, kw("or").to(BinOp::Or))
    })
}

fn fold_right(op: BinOp, first: Expr, rest: Vec<Expr>) -> Expr {
    let mut all = vec![first];
    all.extend(rest);
    let mut iter = all.into_iter().rev();
    let mut acc = iter.next().expect("at least one operand");
    for e in iter {
        let span = sddl_ast::Span::merge(e.span, acc.span);
        acc = Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(e),
                right: Box::new(acc),
            },
            span,
        );
    }
    acc
}

/// `a (op a)*`, left-associative: `a1 op a2 op a3` becomes `(a1 op a2) op a3`.
fn binary_left<'a>(
    operand: BExpr<'a>,
    op: impl Parser<Token, BinOp, Error = PErr> + Clone + 'a,
) -> BExpr<'a> {
    operand
        .clone()
        .then(op.then(operand).repeated())
        .foldl(|left, (op, right)| {
            let span = sddl_ast::Span::merge(left.span, right.span);
            Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            )
        })
        .boxed()
}
