//! String and symbol methods.

use super::require_args;
use crate::{EvalError, EvalResult, Interpreter, Payload, PrimitiveFn, TypeId, Value};

/// Text of a string or symbol.
fn text_of<'v>(interpreter: &Interpreter<'_>, value: &'v Value) -> Result<&'v str, EvalError> {
    match &value.payload {
        Payload::String(text) => Ok(&**text),
        Payload::Symbol(symbol) => Ok(interpreter.symbol_text(*symbol)),
        _ => Err(interpreter.receiver_mismatch("String or Symbol", value)),
    }
}

/// Size in characters.
fn size(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver] = require_args("size", arguments)?;
    let count = text_of(interpreter, receiver)?.chars().count();
    Ok(Value::integer(i64::try_from(count).unwrap_or(i64::MAX)))
}

/// Concatenation; the result has the receiver's kind.
fn concatenate(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver, operand] = require_args(",", arguments)?;
    let joined = format!(
        "{}{}",
        text_of(interpreter, receiver)?,
        text_of(interpreter, operand)?
    );
    Ok(match receiver.payload {
        Payload::Symbol(_) => Value::symbol(interpreter.interner.intern(&joined)),
        _ => Value::string(joined),
    })
}

fn as_symbol(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver] = require_args("asSymbol", arguments)?;
    let text = text_of(interpreter, receiver)?;
    Ok(Value::symbol(interpreter.interner.intern(text)))
}

fn as_string(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver] = require_args("asString", arguments)?;
    Ok(Value::string(text_of(interpreter, receiver)?))
}

const METHODS: [(&str, PrimitiveFn); 4] = [
    ("size", size),
    (",", concatenate),
    ("asSymbol", as_symbol),
    ("asString", as_string),
];

pub(super) fn install(interpreter: &mut Interpreter<'_>) {
    for ty in [TypeId::STRING, TypeId::SYMBOL] {
        for (selector, method) in METHODS {
            interpreter.define_primitive(ty, selector, method);
        }
    }
}
