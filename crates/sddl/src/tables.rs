//! Forward-declared descriptor arenas (spec.md §9 "Forward-declared
//! descriptors → arena with lookup by name"): every name is assigned an id
//! on first mention, the descriptor at that id starts as a stub, and later
//! definition fills it in. This sidesteps aliased mutable stub references
//! by routing every access through `Arena::get`/`get_mut`.
//!
//! A single arena spans the whole compile batch rather than being reset
//! per file, matching spec.md §5's note that constants/messages only
//! promote to their public tables once *every* file has parsed — within a
//! single `compile()` call there is no separate "preloaded" table to
//! distinguish from the "in-progress" one (see DESIGN.md).

use std::collections::HashMap;

use sddl_ast::{Kind, Span};

use crate::expr::Expr;
use crate::value::Value;

pub struct Arena<T> {
    index: HashMap<String, usize>,
    items: Vec<T>,
    names: Vec<String>,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Arena {
            index: HashMap::new(),
            items: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Returns the existing id for `name`, or creates one via `make` if
    /// this is the first mention (a forward reference).
    pub fn ensure(&mut self, name: &str, make: impl FnOnce() -> T) -> usize {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.items.len();
        self.items.push(make());
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        id
    }

    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn name_of(&self, id: usize) -> &str {
        &self.names[id]
    }

    pub fn get(&self, id: usize) -> &T {
        &self.items[id]
    }

    pub fn get_mut(&mut self, id: usize) -> &mut T {
        &mut self.items[id]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn names_sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.index.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn name_to_id(&self) -> &HashMap<String, usize> {
        &self.index
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------

pub struct ConstantDescriptor {
    pub span: Span,
    pub hide: bool,
    pub declared_kind: Option<Kind>,
    /// `None` until Pass A's `constant` production fills it in; still
    /// `None` at Collect time is the "could not be found" error.
    pub expr: Option<Expr>,
    /// Edges to other constant ids this expression references.
    pub deps: Vec<usize>,
}

impl ConstantDescriptor {
    pub fn stub(span: Span) -> Self {
        ConstantDescriptor {
            span,
            hide: false,
            declared_kind: None,
            expr: None,
            deps: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct ConstantTable {
    pub arena: Arena<ConstantDescriptor>,
    /// Filled in during Collect, parallel to `arena`'s ids.
    pub values: Vec<Option<Value>>,
}

impl ConstantTable {
    pub fn public_sorted(&self) -> Vec<(&str, &Value)> {
        let mut out = Vec::new();
        for name in self.arena.names_sorted() {
            let id = self.arena.id_of(name).expect("name came from this arena");
            let descriptor = self.arena.get(id);
            if descriptor.hide {
                continue;
            }
            if let Some(Some(value)) = self.values.get(id) {
                out.push((name, value));
            }
        }
        out
    }
}

// ---------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntryOption {
    Require,
    Option,
    Array,
    Table,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntryType {
    Builtin(Kind),
    /// Index into the message arena of the referenced type.
    Other(usize),
}

pub struct Entry {
    pub name: String,
    pub place: i64,
    pub place_span: Span,
    pub ty: EntryType,
    pub option: EntryOption,
    /// Parsed `= expr` default, only meaningful when `option == Require`.
    pub default_expr: Option<Expr>,
    /// Resolved and verified default, filled in during message Collect.
    pub default: Option<Value>,
    pub span: Span,
}

pub struct MessageDescriptor {
    pub span: Span,
    /// `None` until the `message` production defines it.
    pub entries: Option<Vec<Entry>>,
    /// Edges to other message ids referenced by `Other`-typed entries.
    pub deps: Vec<usize>,
}

impl MessageDescriptor {
    pub fn stub(span: Span) -> Self {
        MessageDescriptor {
            span,
            entries: None,
            deps: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct MessageTable {
    pub arena: Arena<MessageDescriptor>,
}

// ---------------------------------------------------------------------
// Typedefs
// ---------------------------------------------------------------------

#[derive(Clone, Debug)]
pub enum AliasType {
    Builtin(Kind),
    Other(String),
    Null,
}

pub struct Alias {
    pub name: String,
    pub place: i64,
    pub place_span: Span,
    pub ty: AliasType,
    pub span: Span,
}

pub struct TypedefDescriptor {
    pub span: Span,
    pub aliases: Vec<Alias>,
}

#[derive(Default)]
pub struct TypedefTable {
    pub arena: Arena<TypedefDescriptor>,
}

// ---------------------------------------------------------------------
// RPCs
// ---------------------------------------------------------------------

#[derive(Clone, Debug)]
pub enum CallType {
    Builtin(Kind),
    Other(String),
}

pub struct Call {
    pub name: String,
    pub place: i64,
    pub place_span: Span,
    pub request: Option<CallType>,
    pub response: Option<CallType>,
    pub span: Span,
}

pub struct RpcDescriptor {
    pub span: Span,
    pub calls: Vec<Call>,
}

#[derive(Default)]
pub struct RpcTable {
    pub arena: Arena<RpcDescriptor>,
}
