use serde::Serialize;

use crate::{Expr, Span};

/// One parsed schema file: an optional `require` block followed by a mix of
/// top-level items. Corresponds to the `file` production of spec.md §6.
#[derive(Debug, Clone, Default, Serialize)]
pub struct File {
    pub requires: Vec<RequireItem>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequireItem {
    pub path: String,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum Item {
    Constant(ConstantDecl),
    Message(MessageDecl),
    Typedef(TypedefDecl),
    Rpc(RpcDecl),
}

/// One of the four built-in value kinds a constant/entry/alias/call can
/// declare. "number" is the grammar's spelling for the floating-point kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Kind {
    Boolean,
    Integer,
    Number,
    String,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Number => "number",
            Kind::String => "string",
        })
    }
}

/// A field/alias/call type: either one of the built-ins or a late-bound
/// reference to a user-defined message/typedef/rpc name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeRef {
    Builtin(Kind),
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstKindDecl {
    Auto,
    Local,
    Explicit(Kind),
}

#[derive(Debug, Clone, Serialize)]
pub struct ConstantDecl {
    pub name: String,
    pub name_span: Span,
    pub kind: ConstKindDecl,
    pub expr: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageDecl {
    pub name: String,
    pub name_span: Span,
    pub entries: Vec<EntryDecl>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryDecl {
    pub type_ref: TypeRef,
    pub name: String,
    pub place: i64,
    pub place_span: Span,
    pub assign: Option<EntryAssign>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum EntryAssign {
    Delete,
    Option,
    Array,
    Table,
    Default(Expr),
}

#[derive(Debug, Clone, Serialize)]
pub struct TypedefDecl {
    pub name: String,
    pub name_span: Span,
    pub aliases: Vec<AliasDecl>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct AliasDecl {
    pub name: String,
    pub place: i64,
    pub place_span: Span,
    pub assign: AliasAssign,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum AliasAssign {
    Delete,
    Null,
    Type(TypeRef),
}

#[derive(Debug, Clone, Serialize)]
pub struct RpcDecl {
    pub name: String,
    pub name_span: Span,
    pub calls: Vec<CallDecl>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallDecl {
    pub name: String,
    pub place: i64,
    pub place_span: Span,
    pub assign: CallAssign,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum CallAssign {
    Delete,
    Types {
        request: Option<TypeRef>,
        response: Option<TypeRef>,
    },
}
