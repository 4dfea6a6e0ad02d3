//! Arrays, tuples, byte arrays, dictionaries, associations, boxes and
//! namespaces.

use super::require_args;
use crate::errors::{index_out_of_bounds, unbound_identifier, uninitialized_box};
use crate::{Aggregate, EvalError, EvalResult, Interpreter, Payload, PrimitiveFn, TypeId, Value};

fn aggregate<'h>(
    interpreter: &'h Interpreter<'_>,
    value: &Value,
    expected: &str,
) -> Result<&'h Aggregate, EvalError> {
    match value.payload {
        Payload::Aggregate(id) => Ok(interpreter.heap.aggregate(id)),
        _ => Err(interpreter.receiver_mismatch(expected, value)),
    }
}

fn count(length: usize) -> Value {
    Value::integer(i64::try_from(length).unwrap_or(i64::MAX))
}

/// Zero-based position of `index` in a collection of `size` elements.
fn position(interpreter: &Interpreter<'_>, index: &Value, size: usize) -> Result<usize, EvalError> {
    let Some(integer) = index.as_integer() else {
        return Err(interpreter.receiver_mismatch("Integer", index));
    };
    usize::try_from(integer)
        .ok()
        .filter(|position| *position < size)
        .ok_or_else(|| index_out_of_bounds(i64::try_from(integer).unwrap_or(i64::MAX), size))
}

fn size(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver] = require_args("size", arguments)?;
    match aggregate(interpreter, receiver, "a collection")? {
        Aggregate::Array(elements) | Aggregate::Tuple(elements) | Aggregate::Dictionary(elements) => {
            Ok(count(elements.len()))
        }
        Aggregate::ByteArray(bytes) => Ok(count(bytes.len())),
        _ => Err(interpreter.receiver_mismatch("a collection", receiver)),
    }
}

fn at(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver, index] = require_args("at:", arguments)?;
    match aggregate(interpreter, receiver, "an indexable collection")? {
        Aggregate::Array(elements) | Aggregate::Tuple(elements) => {
            let position = position(interpreter, index, elements.len())?;
            Ok(elements[position].clone())
        }
        Aggregate::ByteArray(bytes) => {
            let position = position(interpreter, index, bytes.len())?;
            Ok(Value::new(TypeId::UINT8, Payload::Unsigned(u64::from(bytes[position]))))
        }
        _ => Err(interpreter.receiver_mismatch("an indexable collection", receiver)),
    }
}

/// Overwrite an array element in place; yields the stored value.
fn at_put(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver, index, value] = require_args("at:put:", arguments)?;
    let Payload::Aggregate(id) = receiver.payload else {
        return Err(interpreter.receiver_mismatch("Array", receiver));
    };
    let size = match interpreter.heap.aggregate(id) {
        Aggregate::Array(elements) => elements.len(),
        _ => return Err(interpreter.receiver_mismatch("Array", receiver)),
    };
    let position = position(interpreter, index, size)?;
    if let Aggregate::Array(elements) = interpreter.heap.aggregate_mut(id) {
        elements[position] = value.clone();
    }
    Ok(value.clone())
}

fn key(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver] = require_args("key", arguments)?;
    match aggregate(interpreter, receiver, "Association")? {
        Aggregate::Association { key, .. } => Ok(key.clone()),
        _ => Err(interpreter.receiver_mismatch("Association", receiver)),
    }
}

/// Value of an association, void when it has none.
fn association_value(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver] = require_args("value", arguments)?;
    match aggregate(interpreter, receiver, "Association")? {
        Aggregate::Association { value, .. } => Ok(value.clone().unwrap_or_else(Value::void)),
        _ => Err(interpreter.receiver_mismatch("Association", receiver)),
    }
}

fn box_value(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver] = require_args("value", arguments)?;
    match receiver.payload {
        Payload::Box(cell) => interpreter
            .heap
            .box_contents(cell)
            .cloned()
            .ok_or_else(uninitialized_box),
        _ => Err(interpreter.receiver_mismatch("Box", receiver)),
    }
}

/// Make a binding of the namespace body visible to `namespace name`
/// sends. Yields the namespace.
fn export(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver, name] = require_args("export:", arguments)?;
    let Payload::Namespace(namespace) = receiver.payload else {
        return Err(interpreter.receiver_mismatch("Namespace", receiver));
    };
    let Some(name) = name.as_symbol() else {
        return Err(interpreter.receiver_mismatch("Symbol", name));
    };

    let (scope, environment) = {
        let namespace = interpreter.heap.namespace(namespace);
        (namespace.scope, namespace.environment)
    };
    let binding = interpreter
        .environments
        .lookup_local(scope, name)
        .or_else(|| interpreter.environments.lookup_local(environment, name))
        .cloned()
        .ok_or_else(|| unbound_identifier(interpreter.symbol_text(name)))?;
    interpreter
        .heap
        .namespace_mut(namespace)
        .exported
        .insert(name, binding);
    tracing::debug!(name = interpreter.symbol_text(name), "exported binding");
    Ok(receiver.clone())
}

const SEQUENCE_METHODS: [(&str, PrimitiveFn); 2] = [("size", size), ("at:", at)];

pub(super) fn install(interpreter: &mut Interpreter<'_>) {
    for ty in [TypeId::ARRAY, TypeId::TUPLE, TypeId::BYTE_ARRAY] {
        for (selector, method) in SEQUENCE_METHODS {
            interpreter.define_primitive(ty, selector, method);
        }
    }
    interpreter.define_primitive(TypeId::ARRAY, "at:put:", at_put);
    interpreter.define_primitive(TypeId::DICTIONARY, "size", size);
    interpreter.define_primitive(TypeId::ASSOCIATION, "key", key);
    interpreter.define_primitive(TypeId::ASSOCIATION, "value", association_value);
    interpreter.define_primitive(TypeId::BOX, "value", box_value);
    interpreter.define_primitive(TypeId::NAMESPACE, "export:", export);
}
