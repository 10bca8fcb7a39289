//! Message collection (spec.md §4.3): entries, place/name uniqueness,
//! forward-declared `Other` targets, and the message dependency graph.

use std::collections::HashSet;

use sddl_ast::{Error, Errors, MessageDecl, Reason, TypeRef, WithErrorInfo};

use crate::adapter;
use crate::graph;
use crate::tables::{ConstantTable, Entry, EntryOption, EntryType, MessageDescriptor, MessageTable};
use crate::value::Value;

pub fn enter(messages: &mut MessageTable, constants: &mut ConstantTable, decl: &MessageDecl) -> Result<(), Errors> {
    let id = messages.arena.ensure(&decl.name, || MessageDescriptor::stub(decl.name_span));

    if messages.arena.get(id).entries.is_some() {
        return Err(Errors::from(
            Error::new(Reason::Conflict {
                namespace: "message",
                name: decl.name.clone(),
            })
            .with_span(Some(decl.name_span)),
        ));
    }

    let mut entries = Vec::new();
    let mut places = HashSet::new();
    let mut names = HashSet::new();
    let mut deps = Vec::new();

    for entry_decl in &decl.entries {
        if matches!(entry_decl.assign, Some(sddl_ast::EntryAssign::Delete)) {
            continue;
        }

        if !places.insert(entry_decl.place) {
            return Err(Errors::from(
                Error::new(Reason::PlaceConflict {
                    namespace: "message",
                    place: entry_decl.place,
                })
                .with_span(Some(entry_decl.place_span)),
            ));
        }
        if !names.insert(entry_decl.name.clone()) {
            return Err(Errors::from(
                Error::new(Reason::Conflict {
                    namespace: "field",
                    name: entry_decl.name.clone(),
                })
                .with_span(Some(entry_decl.span)),
            ));
        }

        let (ty, is_require_other_dep) = match &entry_decl.type_ref {
            TypeRef::Builtin(kind) => (EntryType::Builtin(*kind), None),
            TypeRef::Other(name) => {
                let target = messages.arena.ensure(name, || MessageDescriptor::stub(entry_decl.span));
                (EntryType::Other(target), Some(target))
            }
        };

        let option = match &entry_decl.assign {
            None => EntryOption::Require,
            Some(sddl_ast::EntryAssign::Option) => EntryOption::Option,
            Some(sddl_ast::EntryAssign::Array) => EntryOption::Array,
            Some(sddl_ast::EntryAssign::Table) => EntryOption::Table,
            Some(sddl_ast::EntryAssign::Default(_)) => EntryOption::Require,
            Some(sddl_ast::EntryAssign::Delete) => unreachable!("deleted entries are skipped above"),
        };

        if option == EntryOption::Require {
            if let Some(target) = is_require_other_dep {
                deps.push(target);
            }
        }

        let default_expr = match &entry_decl.assign {
            Some(sddl_ast::EntryAssign::Default(expr)) if option == EntryOption::Require => {
                Some(adapter::lower(expr, &mut constants.arena, &mut |_| {}))
            }
            _ => None,
        };

        entries.push(Entry {
            name: entry_decl.name.clone(),
            place: entry_decl.place,
            place_span: entry_decl.place_span,
            ty,
            option,
            default_expr,
            default: None,
            span: entry_decl.span,
        });
    }

    entries.sort_by_key(|e| e.place);

    let descriptor = messages.arena.get_mut(id);
    descriptor.span = decl.span;
    descriptor.entries = Some(entries);
    descriptor.deps = deps;

    log::debug!("message '{}' entered with {} entries", decl.name, decl.entries.len());
    Ok(())
}

pub fn collect(messages: &mut MessageTable, constants: &ConstantTable) -> Result<(), Errors> {
    let n = messages.arena.len();

    for name in messages.arena.names_sorted() {
        let id = messages.arena.id_of(name).expect("from this arena");
        if messages.arena.get(id).entries.is_none() {
            let span = messages.arena.get(id).span;
            return Err(Errors::from(
                Error::new(Reason::NotFound {
                    namespace: "message",
                    name: name.to_string(),
                })
                .with_span(Some(span)),
            ));
        }
    }

    let dag: Vec<Vec<usize>> = (0..n).map(|id| messages.arena.get(id).deps.clone()).collect();
    let start_order: Vec<usize> = messages
        .arena
        .names_sorted()
        .into_iter()
        .map(|name| messages.arena.id_of(name).expect("from this arena"))
        .collect();

    let visit_order = graph::toposort_in_order(&dag, &start_order).map_err(|cycle_id| {
        let span = messages.arena.get(cycle_id).span;
        Errors::from(
            Error::new(Reason::Circular {
                namespace: "message",
                name: messages.arena.name_of(cycle_id).to_string(),
            })
            .with_span(Some(span)),
        )
    })?;

    for id in visit_order {
        verify_defaults(messages, constants, id)?;
    }

    Ok(())
}

/// `VerifyDefault` (spec.md §4.3 Collect): for each `Require` entry,
/// evaluate its default (or the zero value of its declared kind) and
/// check it matches the entry's declared type; `Other`-kind entries get a
/// null default with no further check.
fn verify_defaults(messages: &mut MessageTable, constants: &ConstantTable, id: usize) -> Result<(), Errors> {
    let entry_count = messages.arena.get(id).entries.as_ref().expect("checked above").len();

    for i in 0..entry_count {
        let (ty, option, default_expr, entry_span) = {
            let entry = &messages.arena.get(id).entries.as_ref().unwrap()[i];
            (entry.ty, entry.option, entry.default_expr.clone(), entry.span)
        };

        if option != EntryOption::Require {
            continue;
        }

        let value = match ty {
            EntryType::Other(_) => Value::Other,
            EntryType::Builtin(kind) => match default_expr {
                Some(expr) => expr
                    .try_convert(&constants.values, kind)
                    .map_err(|detail| Errors::from(Error::new(Reason::TypeMismatch { detail }).with_span(Some(entry_span))))?,
                None => Value::zero_of(kind),
            },
        };

        let descriptor = messages.arena.get_mut(id);
        descriptor.entries.as_mut().unwrap()[i].default = Some(value);
    }

    log::debug!("message '{}' defaults verified", messages.arena.name_of(id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sddl_ast::{EntryAssign, EntryDecl, Kind, Span};

    fn span() -> Span {
        Span::new(0, 1, 0..1)
    }

    fn entry(name: &str, place: i64, type_ref: TypeRef, assign: Option<EntryAssign>) -> EntryDecl {
        EntryDecl {
            type_ref,
            name: name.to_string(),
            place,
            place_span: span(),
            assign,
            span: span(),
        }
    }

    #[test]
    fn sorts_entries_by_place() {
        let mut messages = MessageTable::default();
        let mut constants = ConstantTable::default();
        let decl = MessageDecl {
            name: "M".to_string(),
            name_span: span(),
            entries: vec![
                entry("second", 2, TypeRef::Builtin(Kind::Integer), None),
                entry("first", 1, TypeRef::Builtin(Kind::Integer), None),
            ],
            span: span(),
        };
        enter(&mut messages, &mut constants, &decl).unwrap();

        let id = messages.arena.id_of("M").unwrap();
        let entries = messages.arena.get(id).entries.as_ref().unwrap();
        assert_eq!(entries[0].name, "first");
        assert_eq!(entries[1].name, "second");
    }

    #[test]
    fn detects_circular_message_reference() {
        let mut messages = MessageTable::default();
        let mut constants = ConstantTable::default();

        let a = MessageDecl {
            name: "A".to_string(),
            name_span: span(),
            entries: vec![entry("b", 1, TypeRef::Other("B".to_string()), None)],
            span: span(),
        };
        let b = MessageDecl {
            name: "B".to_string(),
            name_span: span(),
            entries: vec![entry("a", 1, TypeRef::Other("A".to_string()), None)],
            span: span(),
        };
        enter(&mut messages, &mut constants, &a).unwrap();
        enter(&mut messages, &mut constants, &b).unwrap();

        let err = collect(&mut messages, &constants).unwrap_err();
        assert!(matches!(err.0[0].reason, Reason::Circular { .. }));
    }

    #[test]
    fn zero_value_default_when_unspecified() {
        let mut messages = MessageTable::default();
        let mut constants = ConstantTable::default();
        let decl = MessageDecl {
            name: "M".to_string(),
            name_span: span(),
            entries: vec![entry("x", 1, TypeRef::Builtin(Kind::Integer), None)],
            span: span(),
        };
        enter(&mut messages, &mut constants, &decl).unwrap();
        collect(&mut messages, &constants).unwrap();

        let id = messages.arena.id_of("M").unwrap();
        let entries = messages.arena.get(id).entries.as_ref().unwrap();
        assert_eq!(entries[0].default, Some(Value::Int(0)));
    }
}
