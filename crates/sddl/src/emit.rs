//! Emission driver (spec.md §4.5): a `Target` is the back-end contract —
//! the core never inspects what it writes, only sequences the calls. The
//! CLI's reference back-ends (`debug`, `json`) implement this trait; any
//! other back-end discovered by whatever registry a caller wires up can
//! too.

use std::io::{self, Write};

use sddl_ast::Kind;

use crate::tables::{Alias, AliasType, Call, CallType, ConstantTable, Entry, EntryOption, EntryType, MessageTable, RpcTable, TypedefTable};
use crate::value::Value;

#[derive(Clone, Copy, Debug)]
pub enum EntryTypeView<'a> {
    Builtin(Kind),
    Other(&'a str),
}

pub struct EmitEntry<'a> {
    pub name: &'a str,
    pub place: i64,
    pub ty: EntryTypeView<'a>,
    pub option: EntryOption,
    pub default: Option<&'a Value>,
}

#[derive(Clone, Copy, Debug)]
pub enum AliasTypeView<'a> {
    Builtin(Kind),
    Other(&'a str),
    Null,
}

pub struct EmitAlias<'a> {
    pub name: &'a str,
    pub place: i64,
    pub ty: AliasTypeView<'a>,
}

#[derive(Clone, Copy, Debug)]
pub enum CallTypeView<'a> {
    Builtin(Kind),
    Other(&'a str),
}

pub struct EmitCall<'a> {
    pub name: &'a str,
    pub place: i64,
    pub request: Option<CallTypeView<'a>>,
    pub response: Option<CallTypeView<'a>>,
}

/// Back-end contract (spec.md §6): a declared encoding and newline
/// sequence, plus the fixed operation sequence the driver below calls.
pub trait Target {
    fn encoding(&self) -> &str {
        "UTF-8"
    }

    fn newline(&self) -> &str {
        "\n"
    }

    fn prepare(&mut self, sink: &mut dyn Write) -> io::Result<()>;

    fn value_bool(&mut self, sink: &mut dyn Write, name: &str, value: bool) -> io::Result<()>;
    fn value_int(&mut self, sink: &mut dyn Write, name: &str, value: i32) -> io::Result<()>;
    fn value_float(&mut self, sink: &mut dyn Write, name: &str, value: f64) -> io::Result<()>;
    fn value_string(&mut self, sink: &mut dyn Write, name: &str, value: &str) -> io::Result<()>;

    fn message(&mut self, sink: &mut dyn Write, name: &str, entries: &[EmitEntry]) -> io::Result<()>;
    fn typedef(&mut self, sink: &mut dyn Write, name: &str, aliases: &[EmitAlias]) -> io::Result<()>;
    fn rpc(&mut self, sink: &mut dyn Write, name: &str, calls: &[EmitCall]) -> io::Result<()>;

    fn flush(&mut self, sink: &mut dyn Write) -> io::Result<()>;
}

/// Runs the fixed sequence of spec.md §4.5: `Prepare`, sorted constants
/// dispatched by kind, sorted messages with place-sorted entries, sorted
/// typedefs with name-sorted aliases, sorted RPCs with name-sorted calls,
/// `Flush`. Never inspects what `target` writes to `sink`.
pub fn run(
    target: &mut dyn Target,
    sink: &mut dyn Write,
    constants: &ConstantTable,
    messages: &MessageTable,
    typedefs: &TypedefTable,
    rpcs: &RpcTable,
) -> io::Result<()> {
    target.prepare(sink)?;

    for (name, value) in constants.public_sorted() {
        match value {
            Value::Bool(b) => target.value_bool(sink, name, *b)?,
            Value::Int(i) => target.value_int(sink, name, *i)?,
            Value::Float(f) => target.value_float(sink, name, *f)?,
            Value::String(s) => target.value_string(sink, name, s)?,
            Value::Other => unreachable!("Other never reaches the public constant table"),
        }
    }

    for name in messages.arena.names_sorted() {
        let id = messages.arena.id_of(name).expect("from this arena");
        let entries: &Vec<Entry> = messages.arena.get(id).entries.as_ref().expect("collected successfully");
        let views: Vec<EmitEntry> = entries
            .iter()
            .map(|e| EmitEntry {
                name: &e.name,
                place: e.place,
                ty: match e.ty {
                    EntryType::Builtin(kind) => EntryTypeView::Builtin(kind),
                    EntryType::Other(target_id) => EntryTypeView::Other(messages.arena.name_of(target_id)),
                },
                option: e.option,
                default: e.default.as_ref(),
            })
            .collect();
        target.message(sink, name, &views)?;
    }

    for name in typedefs.arena.names_sorted() {
        let id = typedefs.arena.id_of(name).expect("from this arena");
        let mut aliases: Vec<&Alias> = typedefs.arena.get(id).aliases.iter().collect();
        aliases.sort_by(|a, b| a.name.cmp(&b.name));
        let views: Vec<EmitAlias> = aliases
            .iter()
            .map(|a| EmitAlias {
                name: &a.name,
                place: a.place,
                ty: match &a.ty {
                    AliasType::Builtin(kind) => AliasTypeView::Builtin(*kind),
                    AliasType::Other(name) => AliasTypeView::Other(name),
                    AliasType::Null => AliasTypeView::Null,
                },
            })
            .collect();
        target.typedef(sink, name, &views)?;
    }

    for name in rpcs.arena.names_sorted() {
        let id = rpcs.arena.id_of(name).expect("from this arena");
        let mut calls: Vec<&Call> = rpcs.arena.get(id).calls.iter().collect();
        calls.sort_by(|a, b| a.name.cmp(&b.name));
        let views: Vec<EmitCall> = calls
            .iter()
            .map(|c| EmitCall {
                name: &c.name,
                place: c.place,
                request: c.request.as_ref().map(call_type_view),
                response: c.response.as_ref().map(call_type_view),
            })
            .collect();
        target.rpc(sink, name, &views)?;
    }

    target.flush(sink)
}

fn call_type_view(t: &CallType) -> CallTypeView<'_> {
    match t {
        CallType::Builtin(kind) => CallTypeView::Builtin(*kind),
        CallType::Other(name) => CallTypeView::Other(name),
    }
}
