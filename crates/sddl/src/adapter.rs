//! Bridges the generated parse tree (`sddl_ast::Expr`) to the internal,
//! evaluable expression tree (`crate::expr::Expr`). Identifier atoms always
//! resolve successfully here by forward-declaring a constant stub if one
//! doesn't exist yet — an unresolved name is only an error later, at
//! Collect, when the stub turns out never to have been defined.

use sddl_ast::{ExprKind, Literal};

use crate::expr::Expr;
use crate::tables::{Arena, ConstantDescriptor};
use crate::value::Value;

/// Lowers `ast` into an evaluable `Expr`, forward-declaring any identifier
/// it references in `constants` and reporting each such reference id to
/// `on_ref` (so the caller can record a dependency edge, or ignore it when
/// lowering a message entry default, which doesn't participate in the
/// constant dependency graph).
pub fn lower(ast: &sddl_ast::Expr, constants: &mut Arena<ConstantDescriptor>, on_ref: &mut dyn FnMut(usize)) -> Expr {
    match &ast.kind {
        ExprKind::Literal(lit) => Expr::Value(literal_value(lit)),
        ExprKind::Ident(name) => {
            let id = constants.ensure(name, || ConstantDescriptor::stub(ast.span));
            on_ref(id);
            Expr::Ref(id)
        }
        ExprKind::Unary { op, expr } => Expr::Unary {
            op: *op,
            expr: Box::new(lower(expr, constants, on_ref)),
        },
        ExprKind::Binary { op, left, right } => Expr::Binary {
            op: *op,
            left: Box::new(lower(left, constants, on_ref)),
            right: Box::new(lower(right, constants, on_ref)),
        },
    }
}

fn literal_value(l: &Literal) -> Value {
    match l {
        Literal::Boolean(b) => Value::Bool(*b),
        Literal::Integer(i) => Value::Int(*i),
        Literal::Float(f) => Value::Float(*f),
        Literal::String(s) => Value::String(s.clone()),
    }
}
