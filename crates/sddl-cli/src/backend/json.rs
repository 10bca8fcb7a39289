use std::io::{self, Write};

use sddl::emit::{AliasTypeView, CallTypeView, EmitAlias, EmitCall, EmitEntry, EntryTypeView, Target};
use sddl::value::Value;
use serde_json::{json, Map};

/// Accumulates the emitted tables into one `serde_json::Value` document,
/// written out on `flush`. A reference backend only, not part of the core's
/// contract.
pub struct JsonTarget {
    namespace: String,
    constants: Map<String, serde_json::Value>,
    messages: Map<String, serde_json::Value>,
    typedefs: Map<String, serde_json::Value>,
    rpcs: Map<String, serde_json::Value>,
}

impl JsonTarget {
    pub fn new(namespace: &str) -> Self {
        JsonTarget {
            namespace: namespace.to_string(),
            constants: Map::new(),
            messages: Map::new(),
            typedefs: Map::new(),
            rpcs: Map::new(),
        }
    }
}

impl Target for JsonTarget {
    fn prepare(&mut self, _sink: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    fn value_bool(&mut self, _sink: &mut dyn Write, name: &str, value: bool) -> io::Result<()> {
        self.constants.insert(name.to_string(), json!(value));
        Ok(())
    }

    fn value_int(&mut self, _sink: &mut dyn Write, name: &str, value: i32) -> io::Result<()> {
        self.constants.insert(name.to_string(), json!(value));
        Ok(())
    }

    fn value_float(&mut self, _sink: &mut dyn Write, name: &str, value: f64) -> io::Result<()> {
        self.constants.insert(name.to_string(), json!(value));
        Ok(())
    }

    fn value_string(&mut self, _sink: &mut dyn Write, name: &str, value: &str) -> io::Result<()> {
        self.constants.insert(name.to_string(), json!(value));
        Ok(())
    }

    fn message(&mut self, _sink: &mut dyn Write, name: &str, entries: &[EmitEntry]) -> io::Result<()> {
        let entries: Vec<serde_json::Value> = entries
            .iter()
            .map(|e| {
                json!({
                    "name": e.name,
                    "place": e.place,
                    "type": entry_type_json(e.ty),
                    "option": format!("{:?}", e.option),
                    "default": e.default.map(value_json),
                })
            })
            .collect();
        self.messages.insert(name.to_string(), json!(entries));
        Ok(())
    }

    fn typedef(&mut self, _sink: &mut dyn Write, name: &str, aliases: &[EmitAlias]) -> io::Result<()> {
        let aliases: Vec<serde_json::Value> = aliases
            .iter()
            .map(|a| {
                json!({
                    "name": a.name,
                    "place": a.place,
                    "type": alias_type_json(a.ty),
                })
            })
            .collect();
        self.typedefs.insert(name.to_string(), json!(aliases));
        Ok(())
    }

    fn rpc(&mut self, _sink: &mut dyn Write, name: &str, calls: &[EmitCall]) -> io::Result<()> {
        let calls: Vec<serde_json::Value> = calls
            .iter()
            .map(|c| {
                json!({
                    "name": c.name,
                    "place": c.place,
                    "request": c.request.map(call_type_json),
                    "response": c.response.map(call_type_json),
                })
            })
            .collect();
        self.rpcs.insert(name.to_string(), json!(calls));
        Ok(())
    }

    fn flush(&mut self, sink: &mut dyn Write) -> io::Result<()> {
        let doc = json!({
            "namespace": self.namespace,
            "constants": self.constants,
            "messages": self.messages,
            "typedefs": self.typedefs,
            "rpcs": self.rpcs,
        });
        serde_json::to_writer_pretty(&mut *sink, &doc)?;
        writeln!(sink)
    }
}

fn value_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Bool(b) => json!(b),
        Value::Int(i) => json!(i),
        Value::Float(f) => json!(f),
        Value::String(s) => json!(s),
        Value::Other => serde_json::Value::Null,
    }
}

fn entry_type_json(ty: EntryTypeView<'_>) -> serde_json::Value {
    match ty {
        EntryTypeView::Builtin(kind) => json!(kind.to_string()),
        EntryTypeView::Other(name) => json!(name),
    }
}

fn alias_type_json(ty: AliasTypeView<'_>) -> serde_json::Value {
    match ty {
        AliasTypeView::Builtin(kind) => json!(kind.to_string()),
        AliasTypeView::Other(name) => json!(name),
        AliasTypeView::Null => serde_json::Value::Null,
    }
}

fn call_type_json(ty: CallTypeView<'_>) -> serde_json::Value {
    match ty {
        CallTypeView::Builtin(kind) => json!(kind.to_string()),
        CallTypeView::Other(name) => json!(name),
    }
}
