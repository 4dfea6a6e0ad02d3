//! Methods of the gradual root type, inherited by every type in the
//! hierarchy.

use super::require_args;
use crate::{EvalResult, Interpreter, PrimitiveFn, TypeId, Value};

/// Same type and same payload; heap objects compare by handle.
fn identical(_: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver, operand] = require_args("==", arguments)?;
    Ok(Value::boolean(receiver == operand))
}

fn not_identical(_: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver, operand] = require_args("~~", arguments)?;
    Ok(Value::boolean(receiver != operand))
}

fn equals(_: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver, operand] = require_args("=", arguments)?;
    Ok(Value::boolean(receiver == operand))
}

fn not_equals(_: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver, operand] = require_args("~=", arguments)?;
    Ok(Value::boolean(receiver != operand))
}

fn print_string(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver] = require_args("printString", arguments)?;
    Ok(Value::string(interpreter.print_string(receiver)))
}

/// Write the receiver's display text and a newline; yields the receiver.
fn print_line(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver] = require_args("printLine", arguments)?;
    let text = interpreter.display_string(receiver);
    interpreter.print_handler.println(&text);
    Ok(receiver.clone())
}

fn yourself(_: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver] = require_args("yourself", arguments)?;
    Ok(receiver.clone())
}

const METHODS: [(&str, PrimitiveFn); 7] = [
    ("==", identical),
    ("~~", not_identical),
    ("=", equals),
    ("~=", not_equals),
    ("printString", print_string),
    ("printLine", print_line),
    ("yourself", yourself),
];

pub(super) fn install(interpreter: &mut Interpreter<'_>) {
    for (selector, method) in METHODS {
        interpreter.define_primitive(TypeId::ANY, selector, method);
    }
}
