//! Second pass over a freshly-parsed `File`: stamps every `Span.line` using
//! a `LineIndex` built from the original source text. Keeping this as a
//! separate walk (instead of computing line numbers during parsing) means
//! the grammar in `expr.rs`/`stmt.rs` only ever has to carry byte offsets.

use sddl_ast::{EntryAssign, Expr, ExprKind, File, Item, Span};

use crate::line_index::LineIndex;

pub fn stamp_lines(file: &mut File, li: &LineIndex) {
    for r in &mut file.requires {
        stamp(&mut r.span, li);
    }
    for item in &mut file.items {
        match item {
            Item::Constant(c) => {
                stamp(&mut c.span, li);
                stamp(&mut c.name_span, li);
                stamp_expr(&mut c.expr, li);
            }
            Item::Message(m) => {
                stamp(&mut m.span, li);
                stamp(&mut m.name_span, li);
                for e in &mut m.entries {
                    stamp(&mut e.span, li);
                    stamp(&mut e.place_span, li);
                    if let Some(EntryAssign::Default(expr)) = &mut e.assign {
                        stamp_expr(expr, li);
                    }
                }
            }
            Item::Typedef(t) => {
                stamp(&mut t.span, li);
                stamp(&mut t.name_span, li);
                for a in &mut t.aliases {
                    stamp(&mut a.span, li);
                    stamp(&mut a.place_span, li);
                }
            }
            Item::Rpc(r) => {
                stamp(&mut r.span, li);
                stamp(&mut r.name_span, li);
                for c in &mut r.calls {
                    stamp(&mut c.span, li);
                    stamp(&mut c.place_span, li);
                }
            }
        }
    }
}

fn stamp(span: &mut Span, li: &LineIndex) {
    span.line = li.line_of(span.start);
}

fn stamp_expr(e: &mut Expr, li: &LineIndex) {
    stamp(&mut e.span, li);
    match &mut e.kind {
        ExprKind::Literal(_) | ExprKind::Ident(_) => {}
        ExprKind::Unary { expr, .. } => stamp_expr(expr, li),
        ExprKind::Binary { left, right, .. } => {
            stamp_expr(left, li);
            stamp_expr(right, li);
        }
    }
}
