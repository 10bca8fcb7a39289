//! Two-pass constant collection (spec.md §4.2).

use sddl_ast::{ConstKindDecl, ConstantDecl, Error, Errors, Reason, WithErrorInfo};

use crate::adapter;
use crate::graph;
use crate::tables::{ConstantDescriptor, ConstantTable};

/// Pass A ("Enter"): create or reuse the named descriptor, reject a
/// redeclaration, and lower the right-hand side into an evaluable
/// expression, forward-declaring any identifier it references.
pub fn enter(table: &mut ConstantTable, decl: &ConstantDecl) -> Result<(), Errors> {
    let id = table.arena.ensure(&decl.name, || ConstantDescriptor::stub(decl.name_span));

    if table.arena.get(id).expr.is_some() {
        return Err(Errors::from(
            Error::new(Reason::Conflict {
                namespace: "constant",
                name: decl.name.clone(),
            })
            .with_span(Some(decl.name_span)),
        ));
    }

    let hide = matches!(decl.kind, ConstKindDecl::Local);
    let declared_kind = match decl.kind {
        ConstKindDecl::Explicit(kind) => Some(kind),
        ConstKindDecl::Auto | ConstKindDecl::Local => None,
    };

    let mut deps = Vec::new();
    let expr = adapter::lower(&decl.expr, &mut table.arena, &mut |dep_id| deps.push(dep_id));

    let descriptor = table.arena.get_mut(id);
    descriptor.span = decl.span;
    descriptor.hide = hide;
    descriptor.declared_kind = declared_kind;
    descriptor.expr = Some(expr);
    descriptor.deps = deps;

    log::debug!("constant '{}' entered (hide={hide})", decl.name);
    Ok(())
}

/// Pass B ("Collect"): every descriptor must be defined, topologically
/// evaluate them in name order, and store each result into `table.values`.
pub fn collect(table: &mut ConstantTable) -> Result<(), Errors> {
    let n = table.arena.len();

    for name in table.arena.names_sorted() {
        let id = table.arena.id_of(name).expect("from this arena");
        if table.arena.get(id).expr.is_none() {
            let span = table.arena.get(id).span;
            return Err(Errors::from(
                Error::new(Reason::NotFound {
                    namespace: "constant",
                    name: name.to_string(),
                })
                .with_span(Some(span)),
            ));
        }
    }

    let dag: Vec<Vec<usize>> = (0..n).map(|id| table.arena.get(id).deps.clone()).collect();
    let start_order: Vec<usize> = table
        .arena
        .names_sorted()
        .into_iter()
        .map(|name| table.arena.id_of(name).expect("from this arena"))
        .collect();

    let visit_order = graph::toposort_in_order(&dag, &start_order).map_err(|cycle_id| {
        let span = table.arena.get(cycle_id).span;
        Errors::from(
            Error::new(Reason::Circular {
                namespace: "constant",
                name: table.arena.name_of(cycle_id).to_string(),
            })
            .with_span(Some(span)),
        )
    })?;

    table.values = vec![None; n];
    for id in visit_order {
        let (expr, declared_kind, span) = {
            let descriptor = table.arena.get(id);
            (
                descriptor.expr.clone().expect("checked above"),
                descriptor.declared_kind,
                descriptor.span,
            )
        };

        let value = match declared_kind {
            Some(kind) => expr.try_convert(&table.values, kind),
            None => expr
                .typeof_kind(&table.values)
                .and_then(|kind| expr.try_convert(&table.values, kind)),
        }
        .map_err(|detail| Errors::from(Error::new(Reason::TypeMismatch { detail }).with_span(Some(span))))?;

        log::debug!("constant '{}' evaluated to {value:?}", table.arena.name_of(id));
        table.values[id] = Some(value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use sddl_ast::{BinOp, Expr, ExprKind, Literal, Span};

    fn span() -> Span {
        Span::new(0, 1, 0..1)
    }

    fn lit(l: Literal) -> Expr {
        Expr::new(ExprKind::Literal(l), span())
    }

    fn ident(name: &str) -> Expr {
        Expr::new(ExprKind::Ident(name.to_string()), span())
    }

    fn decl(name: &str, kind: ConstKindDecl, expr: Expr) -> ConstantDecl {
        ConstantDecl {
            name: name.to_string(),
            name_span: span(),
            kind,
            expr,
            span: span(),
        }
    }

    #[test]
    fn forward_reference_resolves_by_name_order() {
        let mut table = ConstantTable::default();
        enter(
            &mut table,
            &decl(
                "A",
                ConstKindDecl::Auto,
                Expr::new(
                    ExprKind::Binary {
                        op: BinOp::Add,
                        left: Box::new(ident("B")),
                        right: Box::new(lit(Literal::Integer(1))),
                    },
                    span(),
                ),
            ),
        )
        .unwrap();
        enter(
            &mut table,
            &decl("B", ConstKindDecl::Explicit(sddl_ast::Kind::Integer), lit(Literal::Integer(5))),
        )
        .unwrap();

        collect(&mut table).unwrap();

        let a = table.arena.id_of("A").unwrap();
        let b = table.arena.id_of("B").unwrap();
        assert_eq!(table.values[a], Some(Value::Int(6)));
        assert_eq!(table.values[b], Some(Value::Int(5)));
    }

    #[test]
    fn detects_circular_reference() {
        let mut table = ConstantTable::default();
        enter(&mut table, &decl("A", ConstKindDecl::Auto, ident("B"))).unwrap();
        enter(&mut table, &decl("B", ConstKindDecl::Auto, ident("A"))).unwrap();

        let err = collect(&mut table).unwrap_err();
        assert!(matches!(err.0[0].reason, Reason::Circular { .. }));
    }

    #[test]
    fn local_constants_are_hidden_but_visible_locally() {
        let mut table = ConstantTable::default();
        enter(&mut table, &decl("Hidden", ConstKindDecl::Local, lit(Literal::Integer(7)))).unwrap();
        enter(
            &mut table,
            &decl(
                "Visible",
                ConstKindDecl::Auto,
                Expr::new(
                    ExprKind::Binary {
                        op: BinOp::Add,
                        left: Box::new(ident("Hidden")),
                        right: Box::new(lit(Literal::Integer(1))),
                    },
                    span(),
                ),
            ),
        )
        .unwrap();

        collect(&mut table).unwrap();

        let public = table.public_sorted();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].0, "Visible");
        assert_eq!(*public[0].1, Value::Int(8));
    }
}
