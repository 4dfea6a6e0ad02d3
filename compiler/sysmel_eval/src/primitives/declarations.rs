//! `Record`, `Sum` and `Enum`: type declarations callable from programs.
//!
//! They are macro functions so that type names can appear in their
//! argument lists: `Sum(#Number, (Integer, Float))` reads `Integer` and
//! `Float` in type position. Called from the host with evaluated
//! arguments, they accept the equivalent runtime values instead.
//!
//! ```text
//! Record(#Point, #(#x #y))
//! Record(#Pixel, #(#x : Int32. #y : Int32))
//! Sum(#Number, (Integer, Float))
//! Enum(#Color, Integer, #{#red : 1. #green : 2})
//! ```

use sysmel_ir::{IdentitySet, NodeKind, Symbol, Syntax};

use super::numeric;
use super::require_args;
use crate::errors::{invalid_binding, type_mismatch};
use crate::{
    Aggregate, EnvId, EvalError, EvalResult, Field, Interpreter, Payload, TypeId, TypeKind, Value,
};

/// One declaration argument or list element: a node when called from
/// source, a value when called from the host.
enum Element {
    Node(Syntax),
    Value(Value),
}

impl Element {
    fn of(argument: &Value) -> Element {
        match argument.as_syntax() {
            Some(node) => Element::Node(node.clone()),
            None => Element::Value(argument.clone()),
        }
    }

    fn value(&self, interpreter: &mut Interpreter<'_>, env: EnvId) -> EvalResult {
        match self {
            Element::Node(node) => interpreter.evaluate_decayed(env, node),
            Element::Value(value) => Ok(value.clone()),
        }
    }

    fn symbol(&self, interpreter: &mut Interpreter<'_>, env: EnvId) -> Result<Symbol, EvalError> {
        match self {
            Element::Node(node) => interpreter.evaluate_symbol(env, node),
            Element::Value(value) => value
                .as_symbol()
                .ok_or_else(|| interpreter.receiver_mismatch("Symbol", value)),
        }
    }

    fn type_id(&self, interpreter: &mut Interpreter<'_>, env: EnvId) -> Result<TypeId, EvalError> {
        match self {
            Element::Node(node) => interpreter.evaluate_type_expression(env, node),
            Element::Value(value) => value
                .as_type()
                .ok_or_else(|| interpreter.receiver_mismatch("Type", value)),
        }
    }

    /// Split `key : value` into its halves; anything else is a lone key.
    fn split_association(self, interpreter: &Interpreter<'_>) -> (Element, Option<Element>) {
        match &self {
            Element::Node(node) => {
                if let NodeKind::Association { key, value } = &node.kind {
                    return (
                        Element::Node(key.clone()),
                        value.clone().map(Element::Node),
                    );
                }
            }
            Element::Value(Value {
                payload: Payload::Aggregate(id),
                ..
            }) => {
                if let Aggregate::Association { key, value } = interpreter.heap.aggregate(*id) {
                    return (
                        Element::Value(key.clone()),
                        value.clone().map(Element::Value),
                    );
                }
            }
            Element::Value(_) => {}
        }
        (self, None)
    }
}

/// Elements of a list argument: the children of an array, tuple or
/// dictionary literal, or the elements of such a runtime collection.
fn elements(interpreter: &mut Interpreter<'_>, env: EnvId, argument: &Value) -> Result<Vec<Element>, EvalError> {
    if let Some(node) = argument.as_syntax() {
        if let NodeKind::Array(items) | NodeKind::Tuple(items) | NodeKind::Dictionary(items) =
            &node.kind
        {
            return Ok(items.iter().cloned().map(Element::Node).collect());
        }
    }

    let list = Element::of(argument).value(interpreter, env)?;
    if let Payload::Aggregate(id) = list.payload {
        if let Aggregate::Array(items) | Aggregate::Tuple(items) | Aggregate::Dictionary(items) =
            interpreter.heap.aggregate(id)
        {
            return Ok(items.iter().cloned().map(Element::Value).collect());
        }
    }
    Err(interpreter.receiver_mismatch("Array", &list))
}

/// `Record(name, fields)`; a field is `#name` (of type `Any`) or
/// `#name : Type`.
fn record(interpreter: &mut Interpreter<'_>, env: EnvId, arguments: &[Value]) -> EvalResult {
    let [name, fields] = require_args("Record", arguments)?;
    let name = Element::of(name).symbol(interpreter, env)?;

    let mut seen = IdentitySet::new();
    let mut declared = Vec::new();
    for element in elements(interpreter, env, fields)? {
        let (field_name, field_type) = element.split_association(interpreter);
        let field_name = field_name.symbol(interpreter, env)?;
        if !seen.insert(field_name) {
            return Err(invalid_binding(
                interpreter.symbol_text(field_name),
                "duplicate record field",
            ));
        }
        let ty = match field_type {
            Some(field_type) => field_type.type_id(interpreter, env)?,
            None => TypeId::ANY,
        };
        declared.push(Field {
            name: field_name,
            ty,
        });
    }

    let ty = interpreter
        .types
        .define_record(interpreter.interner, Some(name), declared);
    Ok(Value::type_ref(ty))
}

/// `Sum(name, alternatives)`.
fn sum(interpreter: &mut Interpreter<'_>, env: EnvId, arguments: &[Value]) -> EvalResult {
    let [name, alternatives] = require_args("Sum", arguments)?;
    let name = Element::of(name).symbol(interpreter, env)?;
    let alternatives = elements(interpreter, env, alternatives)?
        .iter()
        .map(|alternative| alternative.type_id(interpreter, env))
        .collect::<Result<Vec<_>, _>>()?;

    let ty = interpreter
        .types
        .define_sum(interpreter.interner, Some(name), alternatives);
    Ok(Value::type_ref(ty))
}

/// `Enum(name, base, constants)`; constants are `#name : value`
/// associations whose values are converted to the base type.
fn enumeration(interpreter: &mut Interpreter<'_>, env: EnvId, arguments: &[Value]) -> EvalResult {
    let [name, base, constants] = require_args("Enum", arguments)?;
    let name = Element::of(name).symbol(interpreter, env)?;
    let base = Element::of(base).type_id(interpreter, env)?;

    let mut seen = IdentitySet::new();
    let mut declared = Vec::new();
    for element in elements(interpreter, env, constants)? {
        let (constant, value) = element.split_association(interpreter);
        let constant = constant.symbol(interpreter, env)?;
        let Some(value) = value else {
            return Err(type_mismatch(
                "#name : value",
                interpreter.symbol_text(constant),
            ));
        };
        if !seen.insert(constant) {
            return Err(invalid_binding(
                interpreter.symbol_text(constant),
                "duplicate enum constant",
            ));
        }
        let value = value.value(interpreter, env)?;
        declared.push((constant, base_payload(interpreter, base, &value)?));
    }

    let ty = interpreter
        .types
        .define_enum(interpreter.interner, Some(name), base, declared);
    Ok(Value::type_ref(ty))
}

/// Payload of `value` as a value of `base`.
fn base_payload(interpreter: &Interpreter<'_>, base: TypeId, value: &Value) -> Result<Payload, EvalError> {
    if interpreter.types.is_subtype(value.ty, base) {
        return Ok(value.payload.clone());
    }
    if let TypeKind::Basic(kind) = interpreter.types.get(base).kind {
        if let Some(converted) = numeric::convert(kind, value) {
            return Ok(converted.payload);
        }
    }
    Err(type_mismatch(
        interpreter.type_name(base),
        interpreter.value_type_name(value),
    ))
}

pub(super) fn install(interpreter: &mut Interpreter<'_>, env: EnvId) {
    interpreter.define_macro_function(env, "Record", record);
    interpreter.define_macro_function(env, "Sum", sum);
    interpreter.define_macro_function(env, "Enum", enumeration);
}
