//! RPC collection (spec.md §4.4): place/name uniqueness within a block,
//! request/response typing driven by the `->` token's position, `delete`
//! markers dropped, no cross-RPC dependency tracking.

use std::collections::HashSet;

use sddl_ast::{CallAssign, Error, Errors, Reason, RpcDecl, TypeRef, WithErrorInfo};

use crate::tables::{Call, CallType, RpcDescriptor, RpcTable};

pub fn enter(table: &mut RpcTable, decl: &RpcDecl) -> Result<(), Errors> {
    if table.arena.id_of(&decl.name).is_some() {
        return Err(Errors::from(
            Error::new(Reason::Conflict {
                namespace: "rpc",
                name: decl.name.clone(),
            })
            .with_span(Some(decl.name_span)),
        ));
    }

    let mut places = HashSet::new();
    let mut names = HashSet::new();
    let mut calls = Vec::new();

    for call_decl in &decl.calls {
        if matches!(call_decl.assign, CallAssign::Delete) {
            continue;
        }
        if !places.insert(call_decl.place) {
            return Err(Errors::from(
                Error::new(Reason::PlaceConflict {
                    namespace: "rpc",
                    place: call_decl.place,
                })
                .with_span(Some(call_decl.place_span)),
            ));
        }
        if !names.insert(call_decl.name.clone()) {
            return Err(Errors::from(
                Error::new(Reason::Conflict {
                    namespace: "call",
                    name: call_decl.name.clone(),
                })
                .with_span(Some(call_decl.span)),
            ));
        }

        let (request, response) = match &call_decl.assign {
            CallAssign::Types { request, response } => (request.as_ref().map(convert), response.as_ref().map(convert)),
            CallAssign::Delete => unreachable!("deleted calls are skipped above"),
        };

        calls.push(Call {
            name: call_decl.name.clone(),
            place: call_decl.place,
            place_span: call_decl.place_span,
            request,
            response,
            span: call_decl.span,
        });
    }

    table.arena.ensure(&decl.name, || RpcDescriptor { span: decl.span, calls });

    log::debug!("rpc '{}' entered", decl.name);
    Ok(())
}

fn convert(type_ref: &TypeRef) -> CallType {
    match type_ref {
        TypeRef::Builtin(kind) => CallType::Builtin(*kind),
        TypeRef::Other(name) => CallType::Other(name.clone()),
    }
}
