use chumsky::prelude::*;
use sddl_ast::{
    AliasAssign, AliasDecl, CallAssign, CallDecl, ConstKindDecl, ConstantDecl, EntryAssign,
    EntryDecl, File, Item, Literal, MessageDecl, RequireItem, RpcDecl, TypedefDecl,
};

use crate::common::{builtin_kind, ctrl, ident, kw, literal, mk_span, place, type_ref, PErr};
use crate::expr::expr;
use crate::lexer::Token;

fn require_block(source_id: u16) -> impl Parser<Token, Vec<RequireItem>, Error = PErr> + Clone {
    let path = literal().map_with_span(move |l, span| (l, mk_span(source_id, span)));

    kw("require")
        .ignore_then(
            path.repeated()
                .delimited_by(ctrl("{"), ctrl("}")),
        )
        .try_map(|items, span| {
            items
                .into_iter()
                .map(|(l, span)| match l {
                    Literal::String(path) => Ok(RequireItem { path, span }),
                    _ => Err(Simple::custom(span, "expected a string path in require block")),
                })
                .collect()
        })
        .or_not()
        .map(|v| v.unwrap_or_default())
}

fn const_kind() -> impl Parser<Token, ConstKindDecl, Error = PErr> + Clone {
    kw("auto")
        .to(ConstKindDecl::Auto)
        .or(kw("local").to(ConstKindDecl::Local))
        .or(builtin_kind().map(ConstKindDecl::Explicit))
}

fn constant_decl(source_id: u16) -> impl Parser<Token, ConstantDecl, Error = PErr> + Clone {
    const_kind()
        .then(ident().map_with_span(move |n, s| (n, mk_span(source_id, s))))
        .then_ignore(ctrl("="))
        .then(expr(source_id))
        .map_with_span(move |((kind, (name, name_span)), expr), span| ConstantDecl {
            name,
            name_span,
            kind,
            expr,
            span: mk_span(source_id, span),
        })
}

fn entry_assign(source_id: u16) -> impl Parser<Token, EntryAssign, Error = PErr> + Clone {
    ctrl("=").ignore_then(
        kw("delete")
            .to(EntryAssign::Delete)
            .or(kw("option").to(EntryAssign::Option))
            .or(kw("array").to(EntryAssign::Array))
            .or(kw("table").to(EntryAssign::Table))
            .or(expr(source_id).map(EntryAssign::Default)),
    )
}

fn entry_decl(source_id: u16) -> impl Parser<Token, EntryDecl, Error = PErr> + Clone {
    type_ref()
        .then(ident())
        .then(place().map_with_span(move |p, s| (p, mk_span(source_id, s))))
        .then(entry_assign(source_id).or_not())
        .map_with_span(
            move |(((type_ref, name), (place, place_span)), assign), span| EntryDecl {
                type_ref,
                name,
                place,
                place_span,
                assign,
                span: mk_span(source_id, span),
            },
        )
}

fn message_decl(source_id: u16) -> impl Parser<Token, MessageDecl, Error = PErr> + Clone {
    ident()
        .map_with_span(move |n, s| (n, mk_span(source_id, s)))
        .then(
            entry_decl(source_id)
                .then_ignore(ctrl(";").or_not())
                .repeated()
                .delimited_by(ctrl("{"), ctrl("}")),
        )
        .map_with_span(move |((name, name_span), entries), span| MessageDecl {
            name,
            name_span,
            entries,
            span: mk_span(source_id, span),
        })
}

fn alias_assign() -> impl Parser<Token, AliasAssign, Error = PErr> + Clone {
    ctrl("=").ignore_then(
        kw("delete")
            .to(AliasAssign::Delete)
            .or(kw("null").to(AliasAssign::Null))
            .or(type_ref().map(AliasAssign::Type)),
    )
}

fn alias_decl(source_id: u16) -> impl Parser<Token, AliasDecl, Error = PErr> + Clone {
    ident()
        .then(place().map_with_span(move |p, s| (p, mk_span(source_id, s))))
        .then(alias_assign())
        .map_with_span(move |((name, (place, place_span)), assign), span| AliasDecl {
            name,
            place,
            place_span,
            assign,
            span: mk_span(source_id, span),
        })
}

fn typedef_decl(source_id: u16) -> impl Parser<Token, TypedefDecl, Error = PErr> + Clone {
    ident()
        .map_with_span(move |n, s| (n, mk_span(source_id, s)))
        .then(
            alias_decl(source_id)
                .then_ignore(ctrl(";").or_not())
                .repeated()
                .delimited_by(ctrl("["), ctrl("]")),
        )
        .map_with_span(move |((name, name_span), aliases), span| TypedefDecl {
            name,
            name_span,
            aliases,
            span: mk_span(source_id, span),
        })
}

fn call_assign() -> impl Parser<Token, CallAssign, Error = PErr> + Clone {
    ctrl("=").ignore_then(
        kw("delete").to(CallAssign::Delete).or(type_ref()
            .or_not()
            .then(ctrl("->").ignore_then(type_ref()).or_not())
            .map(|(request, response)| CallAssign::Types { request, response })),
    )
}

fn call_decl(source_id: u16) -> impl Parser<Token, CallDecl, Error = PErr> + Clone {
    ident()
        .then(place().map_with_span(move |p, s| (p, mk_span(source_id, s))))
        .then(call_assign())
        .map_with_span(move |((name, (place, place_span)), assign), span| CallDecl {
            name,
            place,
            place_span,
            assign,
            span: mk_span(source_id, span),
        })
}

fn rpc_decl(source_id: u16) -> impl Parser<Token, RpcDecl, Error = PErr> + Clone {
    ident()
        .map_with_span(move |n, s| (n, mk_span(source_id, s)))
        .then(
            call_decl(source_id)
                .then_ignore(ctrl(";").or_not())
                .repeated()
                .delimited_by(ctrl("("), ctrl(")")),
        )
        .map_with_span(move |((name, name_span), calls), span| RpcDecl {
            name,
            name_span,
            calls,
            span: mk_span(source_id, span),
        })
}

/// Top-level `file` production of spec.md §6: an optional `require` block
/// followed by any mix of `message` / `typedef` / `rpc` / `constant` items.
pub fn file(source_id: u16) -> impl Parser<Token, File, Error = PErr> {
    let item = constant_decl(source_id)
        .map(Item::Constant)
        .or(message_decl(source_id).map(Item::Message))
        .or(typedef_decl(source_id).map(Item::Typedef))
        .or(rpc_decl(source_id).map(Item::Rpc));

    require_block(source_id)
        .then(item.then_ignore(ctrl(";").or_not()).repeated())
        .map(|(requires, items)| File { requires, items })
        .then_ignore(end())
}
