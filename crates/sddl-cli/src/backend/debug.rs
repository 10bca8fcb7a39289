use std::io::{self, Write};

use sddl::emit::{AliasTypeView, CallTypeView, EmitAlias, EmitCall, EmitEntry, EntryTypeView, Target};
use sddl::value::Value;

/// Human-readable dump of the emitted tables, namespaced by a leading
/// comment. Exists only so the CLI has a backend to run against; carries no
/// semantics of its own.
pub struct DebugTarget {
    namespace: String,
}

impl DebugTarget {
    pub fn new(namespace: &str) -> Self {
        DebugTarget {
            namespace: namespace.to_string(),
        }
    }
}

impl Target for DebugTarget {
    fn prepare(&mut self, sink: &mut dyn Write) -> io::Result<()> {
        writeln!(sink, "# namespace {}", self.namespace)
    }

    fn value_bool(&mut self, sink: &mut dyn Write, name: &str, value: bool) -> io::Result<()> {
        writeln!(sink, "const {name} = {value}")
    }

    fn value_int(&mut self, sink: &mut dyn Write, name: &str, value: i32) -> io::Result<()> {
        writeln!(sink, "const {name} = {value}")
    }

    fn value_float(&mut self, sink: &mut dyn Write, name: &str, value: f64) -> io::Result<()> {
        writeln!(sink, "const {name} = {value}")
    }

    fn value_string(&mut self, sink: &mut dyn Write, name: &str, value: &str) -> io::Result<()> {
        writeln!(sink, "const {name} = {value:?}")
    }

    fn message(&mut self, sink: &mut dyn Write, name: &str, entries: &[EmitEntry]) -> io::Result<()> {
        writeln!(sink, "message {name} {{")?;
        for entry in entries {
            let ty = match entry.ty {
                EntryTypeView::Builtin(kind) => kind.to_string(),
                EntryTypeView::Other(name) => name.to_string(),
            };
            write!(sink, "  {ty} {}@{}", entry.name, entry.place)?;
            if let Some(default) = entry.default {
                write!(sink, " = {}", display_value(default))?;
            }
            writeln!(sink, " [{:?}]", entry.option)?;
        }
        writeln!(sink, "}}")
    }

    fn typedef(&mut self, sink: &mut dyn Write, name: &str, aliases: &[EmitAlias]) -> io::Result<()> {
        writeln!(sink, "typedef {name} [")?;
        for alias in aliases {
            let ty = match alias.ty {
                AliasTypeView::Builtin(kind) => kind.to_string(),
                AliasTypeView::Other(name) => name.to_string(),
                AliasTypeView::Null => "null".to_string(),
            };
            writeln!(sink, "  {}@{} = {ty}", alias.name, alias.place)?;
        }
        writeln!(sink, "]")
    }

    fn rpc(&mut self, sink: &mut dyn Write, name: &str, calls: &[EmitCall]) -> io::Result<()> {
        writeln!(sink, "rpc {name} (")?;
        for call in calls {
            write!(sink, "  {}@{}", call.name, call.place)?;
            if call.request.is_some() || call.response.is_some() {
                write!(sink, " = ")?;
                if let Some(req) = call.request {
                    write!(sink, "{}", call_type_name(req))?;
                }
                if let Some(resp) = call.response {
                    write!(sink, " -> {}", call_type_name(resp))?;
                }
            }
            writeln!(sink)?;
        }
        writeln!(sink, ")")
    }

    fn flush(&mut self, sink: &mut dyn Write) -> io::Result<()> {
        sink.flush()
    }
}

fn call_type_name(view: CallTypeView<'_>) -> String {
    match view {
        CallTypeView::Builtin(kind) => kind.to_string(),
        CallTypeView::Other(name) => name.to_string(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Other => "null".to_string(),
    }
}
