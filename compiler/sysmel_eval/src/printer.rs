//! Human-readable rendering of values for REPL and debug output.
//!
//! Not a serialization format: functions, boxes and namespaces print as
//! opaque `<...>` tags, and self-referencing aggregates print `...` where
//! the cycle closes.

use std::fmt::Write;

use sysmel_ir::{IdentityDictionary, Interner};

use crate::{Aggregate, AggregateId, Field, Heap, Payload, TypeKind, TypeRegistry, Value};

/// Renders values against the runtime that owns them.
pub struct Printer<'a> {
    interner: &'a Interner,
    types: &'a TypeRegistry,
    heap: &'a Heap,
}

impl<'a> Printer<'a> {
    pub fn new(interner: &'a Interner, types: &'a TypeRegistry, heap: &'a Heap) -> Self {
        Printer {
            interner,
            types,
            heap,
        }
    }

    /// Literal-like rendering: strings quoted, symbols with `#`.
    pub fn print_string(&self, value: &Value) -> String {
        let mut out = String::new();
        // Aggregates mapped to `true` are currently being printed.
        let mut open = IdentityDictionary::new();
        self.write_value(&mut out, value, &mut open);
        out
    }

    /// Rendering used by `printLine`: strings and symbols without quoting.
    pub fn display_string(&self, value: &Value) -> String {
        match &value.payload {
            Payload::String(text) => text.to_string(),
            Payload::Symbol(symbol) => self.interner.lookup(*symbol).to_owned(),
            Payload::Character(c) => c.to_string(),
            _ => self.print_string(value),
        }
    }

    fn write_value(
        &self,
        out: &mut String,
        value: &Value,
        open: &mut IdentityDictionary<AggregateId, bool>,
    ) {
        match &value.payload {
            Payload::Void => out.push_str("void"),
            Payload::Nil => out.push_str("nil"),
            Payload::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Payload::Integer(_) | Payload::Unsigned(_) | Payload::Float(_)
                if self.write_enum_constant(out, value) => {}
            Payload::Integer(n) => {
                let _ = write!(out, "{n}");
            }
            Payload::Unsigned(n) => {
                let _ = write!(out, "{n}");
            }
            Payload::Float(x) => {
                let _ = write!(out, "{x:?}");
            }
            Payload::Character(c) => {
                let _ = write!(out, "${c}");
            }
            Payload::Symbol(symbol) => {
                let _ = write!(out, "#{}", self.interner.lookup(*symbol));
            }
            Payload::String(text) => {
                let _ = write!(out, "\"{}\"", text.replace('"', "\"\""));
            }
            Payload::Type(ty) => out.push_str(self.types.name(*ty, self.interner)),
            Payload::Function(function) => match self.heap.function(*function).name {
                Some(name) => {
                    let _ = write!(out, "<function {}>", self.interner.lookup(name));
                }
                None => out.push_str("<function>"),
            },
            Payload::Syntax(node) => {
                let _ = write!(out, "<syntax {}>", node.kind.name());
            }
            Payload::Box(cell) => match self.heap.box_contents(*cell) {
                Some(contents) => {
                    out.push_str("<box ");
                    self.write_value(out, contents, open);
                    out.push('>');
                }
                None => out.push_str("<box>"),
            },
            Payload::Namespace(namespace) => {
                let name = self.heap.namespace(*namespace).name;
                let _ = write!(out, "<namespace {}>", self.interner.lookup(name));
            }
            Payload::Aggregate(id) => {
                if open.lookup(id) == Some(&true) {
                    out.push_str("...");
                    return;
                }
                open.insert(*id, true);
                self.write_aggregate(out, value, *id, open);
                open.insert(*id, false);
            }
        }
    }

    /// Enum constants print as `Type constant`.
    fn write_enum_constant(&self, out: &mut String, value: &Value) -> bool {
        if value.ty.is_basic() {
            return false;
        }
        let TypeKind::Enum { values, .. } = &self.types.get(value.ty).kind else {
            return false;
        };
        match values.iter().find(|(_, constant)| constant == value) {
            Some((name, _)) => {
                let _ = write!(
                    out,
                    "{} {}",
                    self.types.name(value.ty, self.interner),
                    self.interner.lookup(*name)
                );
                true
            }
            None => false,
        }
    }

    fn write_aggregate(
        &self,
        out: &mut String,
        value: &Value,
        id: AggregateId,
        open: &mut IdentityDictionary<AggregateId, bool>,
    ) {
        match self.heap.aggregate(id) {
            Aggregate::Array(elements) => {
                out.push('[');
                self.write_separated(out, elements, ". ", open);
                out.push(']');
            }
            Aggregate::Tuple(elements) => {
                out.push('(');
                self.write_separated(out, elements, ", ", open);
                out.push(')');
            }
            Aggregate::ByteArray(bytes) => {
                out.push_str("#[");
                for (index, byte) in bytes.iter().enumerate() {
                    if index > 0 {
                        out.push(' ');
                    }
                    let _ = write!(out, "{byte}");
                }
                out.push(']');
            }
            Aggregate::Record(fields) => {
                out.push_str(self.types.name(value.ty, self.interner));
                out.push('(');
                let names: &[Field] = match &self.types.get(value.ty).kind {
                    TypeKind::Record { fields } => fields.as_slice(),
                    _ => &[],
                };
                for (index, field) in fields.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    if let Some(descriptor) = names.get(index) {
                        let _ = write!(out, "{}: ", self.interner.lookup(descriptor.name));
                    }
                    self.write_value(out, field, open);
                }
                out.push(')');
            }
            Aggregate::Sum { payload, .. } => {
                out.push_str(self.types.name(value.ty, self.interner));
                out.push('(');
                self.write_value(out, payload, open);
                out.push(')');
            }
            Aggregate::Association { key, value } => {
                self.write_value(out, key, open);
                out.push_str(" :");
                if let Some(value) = value {
                    out.push(' ');
                    self.write_value(out, value, open);
                }
            }
            Aggregate::Dictionary(associations) => {
                out.push_str("#{");
                self.write_separated(out, associations, ". ", open);
                out.push('}');
            }
        }
    }

    fn write_separated(
        &self,
        out: &mut String,
        elements: &[Value],
        separator: &str,
        open: &mut IdentityDictionary<AggregateId, bool>,
    ) {
        for (index, element) in elements.iter().enumerate() {
            if index > 0 {
                out.push_str(separator);
            }
            self.write_value(out, element, open);
        }
    }
}
