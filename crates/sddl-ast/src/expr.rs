use serde::Serialize;

use crate::{BinOp, Literal, Span, UnOp};

/// Raw expression tree produced by the parser. Corresponds to spec.md §3
/// "Expression"'s grammar shape, prior to the adapter lowering it into
/// `sddl::expr::Expr` (which carries resolved identifier references instead
/// of bare names).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    Literal(Literal),
    Ident(String),
    Unary {
        op: UnOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}
