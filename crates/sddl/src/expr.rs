//! Evaluable expression tree (spec.md §3), distinct from `sddl_ast::Expr`
//! (the raw parse tree): operator nodes over [`Value`]s plus a `Ref` leaf
//! for a not-yet-evaluated constant, resolved by index into the caller's
//! value table once its dependencies have been evaluated in topological
//! order. Every node supports the four typed-conversion attempts and a
//! `typeof`, matching the "both `Value` and `Expr` use runtime type-casing"
//! design note in spec.md §9 — reimplemented here as a closed sum type
//! rather than overloaded operators.

use sddl_ast::{BinOp, Kind, UnOp};

use crate::value::{Value, EPSILON};

#[derive(Clone, Debug)]
pub enum Expr {
    Value(Value),
    /// Index into the evaluation context's value table — a reference to
    /// another constant in the same dependency graph.
    Ref(usize),
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

/// Per-id evaluated values of the constants a dependency graph has already
/// visited. Topological evaluation order guarantees every `Ref` an `Expr`
/// contains is `Some` by the time it is looked up.
pub type ValueTable = [Option<Value>];

impl Expr {
    pub fn eval(&self, values: &ValueTable) -> Result<Value, String> {
        match self {
            Expr::Value(v) => Ok(v.clone()),
            Expr::Ref(id) => values
                .get(*id)
                .and_then(|v| v.clone())
                .ok_or_else(|| "reference to an unevaluated constant".to_string()),
            Expr::Unary { op: UnOp::Not, expr } => match expr.eval(values)? {
                Value::Bool(b) => Ok(Value::Bool(!b)),
                _ => Err("type mismatch in the expression".to_string()),
            },
            Expr::Binary { op, left, right } => {
                let l = left.eval(values)?;
                let r = right.eval(values)?;
                eval_binary(*op, l, r)
            }
        }
    }

    /// Evaluates and attempts the typed conversion named by `kind`.
    pub fn try_convert(&self, values: &ValueTable, kind: Kind) -> Result<Value, String> {
        let value = self.eval(values)?;
        value
            .convert_to(kind)
            .ok_or_else(|| format!("value cannot convert to '{kind}'"))
    }

    /// Statically resolvable result kind, per the propagation rules of
    /// spec.md §3. Fails with a type-mismatch message on any combination
    /// not named there.
    pub fn typeof_kind(&self, values: &ValueTable) -> Result<Kind, String> {
        match self {
            Expr::Value(v) => v.kind().ok_or_else(|| "type mismatch in the expression".to_string()),
            Expr::Ref(id) => values
                .get(*id)
                .and_then(|v| v.as_ref())
                .and_then(Value::kind)
                .ok_or_else(|| "type mismatch in the expression".to_string()),
            Expr::Unary { op: UnOp::Not, expr } => match expr.typeof_kind(values)? {
                Kind::Boolean => Ok(Kind::Boolean),
                _ => Err("type mismatch in the expression".to_string()),
            },
            Expr::Binary { op, left, right } => {
                let lk = left.typeof_kind(values)?;
                let rk = right.typeof_kind(values)?;
                typeof_binary(*op, lk, rk)
            }
        }
    }
}

/// `{Int,Int}`→Int; Float paired with Int or Float→Number. `None` for any
/// other pairing (including anything involving Bool/String/Other).
fn numeric_join(a: Kind, b: Kind) -> Option<Kind> {
    match (a, b) {
        (Kind::Integer, Kind::Integer) => Some(Kind::Integer),
        (Kind::Integer, Kind::Number) | (Kind::Number, Kind::Integer) | (Kind::Number, Kind::Number) => {
            Some(Kind::Number)
        }
        _ => None,
    }
}

fn typeof_binary(op: BinOp, l: Kind, r: Kind) -> Result<Kind, String> {
    let mismatch = || "type mismatch in the expression".to_string();
    match op {
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Pow => {
            numeric_join(l, r).ok_or_else(mismatch)
        }
        BinOp::Concat => {
            if l == Kind::String && r == Kind::String {
                Ok(Kind::String)
            } else {
                Err(mismatch())
            }
        }
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => numeric_join(l, r).map(|_| Kind::Boolean).ok_or_else(mismatch),
        BinOp::Eq | BinOp::Ne => {
            let matched = (l == Kind::Boolean && r == Kind::Boolean)
                || numeric_join(l, r).is_some()
                || (l == Kind::String && r == Kind::String);
            if matched {
                Ok(Kind::Boolean)
            } else {
                Err(mismatch())
            }
        }
        BinOp::And | BinOp::Or => {
            if l == Kind::Boolean && r == Kind::Boolean {
                Ok(Kind::Boolean)
            } else {
                Err(mismatch())
            }
        }
    }
}

fn eval_binary(op: BinOp, l: Value, r: Value) -> Result<Value, String> {
    match op {
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Pow => eval_arith(op, l, r),
        BinOp::Concat => match (l, r) {
            (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
            _ => Err("type mismatch in the expression".to_string()),
        },
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => eval_cmp(op, l, r),
        BinOp::Eq | BinOp::Ne => eval_eq(op, l, r),
        BinOp::And | BinOp::Or => match (l, r) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if op == BinOp::And { a && b } else { a || b })),
            _ => Err("type mismatch in the expression".to_string()),
        },
    }
}

fn eval_arith(op: BinOp, l: Value, r: Value) -> Result<Value, String> {
    if let (Value::Int(a), Value::Int(b)) = (&l, &r) {
        let (a, b) = (*a, *b);
        let result = match op {
            BinOp::Add => a.checked_add(b),
            BinOp::Sub => a.checked_sub(b),
            BinOp::Mul => a.checked_mul(b),
            BinOp::Div => a.checked_div(b),
            BinOp::Mod => a.checked_rem(b),
            BinOp::Pow if b >= 0 => a.checked_pow(b as u32),
            BinOp::Pow => None,
            _ => unreachable!("eval_arith only called for arithmetic operators"),
        };
        return result
            .map(Value::Int)
            .ok_or_else(|| "arithmetic overflow or division by zero".to_string());
    }

    let a = l
        .try_to_float()
        .ok_or_else(|| "type mismatch in the expression".to_string())?;
    let b = r
        .try_to_float()
        .ok_or_else(|| "type mismatch in the expression".to_string())?;
    let result = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => a / b,
        BinOp::Mod => a % b,
        BinOp::Pow => a.powf(b),
        _ => unreachable!("eval_arith only called for arithmetic operators"),
    };
    Ok(Value::Float(result))
}

/// Strict `<`/`>` require a gap exceeding [`EPSILON`]; `<=`/`>=` accept a
/// near-equal pair as satisfying the comparison (spec.md §3).
fn eval_cmp(op: BinOp, l: Value, r: Value) -> Result<Value, String> {
    if let (Value::Int(a), Value::Int(b)) = (&l, &r) {
        let (a, b) = (*a, *b);
        return Ok(Value::Bool(match op {
            BinOp::Lt => a < b,
            BinOp::Le => a <= b,
            BinOp::Gt => a > b,
            BinOp::Ge => a >= b,
            _ => unreachable!(),
        }));
    }

    let a = l
        .try_to_float()
        .ok_or_else(|| "type mismatch in the expression".to_string())?;
    let b = r
        .try_to_float()
        .ok_or_else(|| "type mismatch in the expression".to_string())?;
    let diff = a - b;
    Ok(Value::Bool(match op {
        BinOp::Lt => diff < -EPSILON,
        BinOp::Gt => diff > EPSILON,
        BinOp::Le => diff <= EPSILON,
        BinOp::Ge => diff >= -EPSILON,
        _ => unreachable!(),
    }))
}

fn eval_eq(op: BinOp, l: Value, r: Value) -> Result<Value, String> {
    let equal = match (&l, &r) {
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            let a = l.try_to_float().expect("checked above");
            let b = r.try_to_float().expect("checked above");
            (a - b).abs() < EPSILON
        }
        _ => return Err("type mismatch in the expression".to_string()),
    };
    Ok(Value::Bool(if op == BinOp::Eq { equal } else { !equal }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(v: Value) -> Box<Expr> {
        Box::new(Expr::Value(v))
    }

    #[test]
    fn right_associative_power() {
        // 2^(3^2) = 512, not (2^3)^2 = 64.
        let inner = Expr::Binary {
            op: BinOp::Pow,
            left: lit(Value::Int(3)),
            right: lit(Value::Int(2)),
        };
        let outer = Expr::Binary {
            op: BinOp::Pow,
            left: lit(Value::Int(2)),
            right: Box::new(inner),
        };
        assert_eq!(outer.eval(&[]).unwrap(), Value::Int(512));
    }

    #[test]
    fn float_equality_within_epsilon() {
        let e = Expr::Binary {
            op: BinOp::Eq,
            left: lit(Value::Float(1.0)),
            right: lit(Value::Float(1.0 + EPSILON / 2.0)),
        };
        assert_eq!(e.eval(&[]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn arithmetic_promotes_to_float() {
        let e = Expr::Binary {
            op: BinOp::Add,
            left: lit(Value::Int(1)),
            right: lit(Value::Float(2.5)),
        };
        assert_eq!(e.typeof_kind(&[]).unwrap(), Kind::Number);
        assert_eq!(e.eval(&[]).unwrap(), Value::Float(3.5));
    }

    #[test]
    fn ref_resolves_from_value_table() {
        let values = vec![Some(Value::Int(5))];
        let e = Expr::Binary {
            op: BinOp::Add,
            left: Box::new(Expr::Ref(0)),
            right: lit(Value::Int(1)),
        };
        assert_eq!(e.eval(&values).unwrap(), Value::Int(6));
    }
}
