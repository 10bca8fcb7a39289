//! Typedef collection (spec.md §4.4): place/name uniqueness within a
//! block, `delete` markers dropped, no cross-typedef dependency tracking.

use std::collections::HashSet;

use sddl_ast::{AliasAssign, Error, Errors, Reason, TypedefDecl, WithErrorInfo};

use crate::tables::{Alias, AliasType, TypedefDescriptor, TypedefTable};

pub fn enter(table: &mut TypedefTable, decl: &TypedefDecl) -> Result<(), Errors> {
    if table.arena.id_of(&decl.name).is_some() {
        return Err(Errors::from(
            Error::new(Reason::Conflict {
                namespace: "typedef",
                name: decl.name.clone(),
            })
            .with_span(Some(decl.name_span)),
        ));
    }

    let mut places = HashSet::new();
    let mut names = HashSet::new();
    let mut aliases = Vec::new();

    for alias_decl in &decl.aliases {
        if matches!(alias_decl.assign, AliasAssign::Delete) {
            continue;
        }
        if !places.insert(alias_decl.place) {
            return Err(Errors::from(
                Error::new(Reason::PlaceConflict {
                    namespace: "typedef",
                    place: alias_decl.place,
                })
                .with_span(Some(alias_decl.place_span)),
            ));
        }
        if !names.insert(alias_decl.name.clone()) {
            return Err(Errors::from(
                Error::new(Reason::Conflict {
                    namespace: "alias",
                    name: alias_decl.name.clone(),
                })
                .with_span(Some(alias_decl.span)),
            ));
        }

        let ty = match &alias_decl.assign {
            AliasAssign::Null => AliasType::Null,
            AliasAssign::Type(sddl_ast::TypeRef::Builtin(kind)) => AliasType::Builtin(*kind),
            AliasAssign::Type(sddl_ast::TypeRef::Other(name)) => AliasType::Other(name.clone()),
            AliasAssign::Delete => unreachable!("deleted aliases are skipped above"),
        };

        aliases.push(Alias {
            name: alias_decl.name.clone(),
            place: alias_decl.place,
            place_span: alias_decl.place_span,
            ty,
            span: alias_decl.span,
        });
    }

    table
        .arena
        .ensure(&decl.name, || TypedefDescriptor { span: decl.span, aliases });

    log::debug!("typedef '{}' entered", decl.name);
    Ok(())
}
