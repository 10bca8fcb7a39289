//! Span, literal and raw syntax-tree types shared by `sddl-parser` and
//! `sddl`. Kept as a separate crate, the same way `prqlc-ast` is split out
//! from `prqlc-parser`/`prqlc`, so the grammar and the semantic passes can
//! each depend on a stable, dependency-light vocabulary of types.

mod error;
mod expr;
mod literal;
mod ops;
mod span;
mod stmt;

pub use error::{Error, Errors, MessageKind, Reason, WithErrorInfo};
pub use expr::{Expr, ExprKind};
pub use literal::Literal;
pub use ops::{BinOp, UnOp};
pub use span::Span;
pub use stmt::{
    AliasAssign, AliasDecl, CallAssign, CallDecl, ConstKindDecl, ConstantDecl, EntryAssign,
    EntryDecl, File, Item, Kind, MessageDecl, RequireItem, RpcDecl, TypeRef, TypedefDecl,
};

pub type Result<T, E = Error> = core::result::Result<T, E>;
