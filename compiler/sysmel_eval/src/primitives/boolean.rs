//! Boolean logic and the conditional macros.
//!
//! `ifTrue:`, `ifFalse:`, `ifTrue:ifFalse:`, `and:` and `or:` are macros:
//! they receive their arguments unevaluated and expand to the branch that
//! should run, so the branch not taken is never evaluated.

use super::require_args;
use crate::{EnvId, EvalResult, Interpreter, MacroFn, PrimitiveFn, TypeId, Value};

fn receiver_flag(interpreter: &Interpreter<'_>, receiver: &Value) -> Result<bool, crate::EvalError> {
    receiver
        .as_boolean()
        .ok_or_else(|| interpreter.receiver_mismatch("Boolean", receiver))
}

fn not(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver] = require_args("not", arguments)?;
    Ok(Value::boolean(!receiver_flag(interpreter, receiver)?))
}

fn and(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver, operand] = require_args("&", arguments)?;
    let left = receiver_flag(interpreter, receiver)?;
    let right = receiver_flag(interpreter, operand)?;
    Ok(Value::boolean(left && right))
}

fn or(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver, operand] = require_args("|", arguments)?;
    let left = receiver_flag(interpreter, receiver)?;
    let right = receiver_flag(interpreter, operand)?;
    Ok(Value::boolean(left || right))
}

fn if_true(interpreter: &mut Interpreter<'_>, _: EnvId, arguments: &[Value]) -> EvalResult {
    let [receiver, branch] = require_args("ifTrue:", arguments)?;
    Ok(if receiver_flag(interpreter, receiver)? {
        branch.clone()
    } else {
        Value::void()
    })
}

fn if_false(interpreter: &mut Interpreter<'_>, _: EnvId, arguments: &[Value]) -> EvalResult {
    let [receiver, branch] = require_args("ifFalse:", arguments)?;
    Ok(if receiver_flag(interpreter, receiver)? {
        Value::void()
    } else {
        branch.clone()
    })
}

fn if_true_if_false(interpreter: &mut Interpreter<'_>, _: EnvId, arguments: &[Value]) -> EvalResult {
    let [receiver, true_branch, false_branch] = require_args("ifTrue:ifFalse:", arguments)?;
    Ok(if receiver_flag(interpreter, receiver)? {
        true_branch.clone()
    } else {
        false_branch.clone()
    })
}

/// Short-circuit conjunction.
fn and_then(interpreter: &mut Interpreter<'_>, _: EnvId, arguments: &[Value]) -> EvalResult {
    let [receiver, operand] = require_args("and:", arguments)?;
    Ok(if receiver_flag(interpreter, receiver)? {
        operand.clone()
    } else {
        Value::boolean(false)
    })
}

/// Short-circuit disjunction.
fn or_else(interpreter: &mut Interpreter<'_>, _: EnvId, arguments: &[Value]) -> EvalResult {
    let [receiver, operand] = require_args("or:", arguments)?;
    Ok(if receiver_flag(interpreter, receiver)? {
        Value::boolean(true)
    } else {
        operand.clone()
    })
}

const METHODS: [(&str, PrimitiveFn); 3] = [("not", not), ("&", and), ("|", or)];

const MACROS: [(&str, MacroFn); 5] = [
    ("ifTrue:", if_true),
    ("ifFalse:", if_false),
    ("ifTrue:ifFalse:", if_true_if_false),
    ("and:", and_then),
    ("or:", or_else),
];

pub(super) fn install(interpreter: &mut Interpreter<'_>) {
    for (selector, method) in METHODS {
        interpreter.define_primitive(TypeId::BOOLEAN, selector, method);
    }
    for (selector, expander) in MACROS {
        interpreter.define_macro(TypeId::BOOLEAN, selector, expander);
    }
}
