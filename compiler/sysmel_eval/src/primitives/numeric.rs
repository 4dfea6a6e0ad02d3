//! Arithmetic, comparison and conversion for integers and floats.
//!
//! Methods live on `Integer` and `Float`; the fixed-width types inherit
//! them. Integer results take the receiver's type and wrap to its width.
//! Mixing an integer with a float computes in floating point.

use std::cmp::Ordering;

use super::require_args;
use crate::errors::division_by_zero;
use crate::{BasicKind, EvalResult, Interpreter, Payload, PrimitiveFn, TypeId, Value};

/// Numeric payload of a value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Number {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl Number {
    pub(crate) fn of(value: &Value) -> Option<Number> {
        match value.payload {
            Payload::Integer(integer) => Some(Number::Signed(integer)),
            Payload::Unsigned(unsigned) => Some(Number::Unsigned(unsigned)),
            Payload::Float(float) => Some(Number::Float(float)),
            _ => None,
        }
    }

    fn as_integer(self) -> Option<i128> {
        match self {
            Number::Signed(integer) => Some(i128::from(integer)),
            Number::Unsigned(unsigned) => Some(i128::from(unsigned)),
            Number::Float(_) => None,
        }
    }

    #[expect(clippy::cast_precision_loss, reason = "integer to float conversion")]
    fn as_float(self) -> f64 {
        match self {
            Number::Signed(integer) => integer as f64,
            Number::Unsigned(unsigned) => unsigned as f64,
            Number::Float(float) => float,
        }
    }

    /// Integer value, truncating floats toward zero (saturating).
    #[expect(clippy::cast_possible_truncation, reason = "float truncation saturates")]
    fn truncate(self) -> i128 {
        match self {
            Number::Signed(integer) => i128::from(integer),
            Number::Unsigned(unsigned) => i128::from(unsigned),
            Number::Float(float) => float as i128,
        }
    }
}

pub(crate) fn is_numeric(kind: BasicKind) -> bool {
    is_integer(kind) || is_float(kind)
}

fn is_integer(kind: BasicKind) -> bool {
    matches!(
        kind,
        BasicKind::Integer
            | BasicKind::Int8
            | BasicKind::Int16
            | BasicKind::Int32
            | BasicKind::Int64
            | BasicKind::UInt8
            | BasicKind::UInt16
            | BasicKind::UInt32
            | BasicKind::UInt64
    )
}

fn is_float(kind: BasicKind) -> bool {
    matches!(kind, BasicKind::Float | BasicKind::Float32 | BasicKind::Float64)
}

/// Integer of type `ty`, wrapped to the type's width.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "fixed-width integers wrap"
)]
pub(crate) fn fit_integer(ty: TypeId, integer: i128) -> Value {
    let payload = match ty {
        TypeId::INT8 => Payload::Integer(i64::from(integer as i8)),
        TypeId::INT16 => Payload::Integer(i64::from(integer as i16)),
        TypeId::INT32 => Payload::Integer(i64::from(integer as i32)),
        TypeId::UINT8 => Payload::Unsigned(u64::from(integer as u8)),
        TypeId::UINT16 => Payload::Unsigned(u64::from(integer as u16)),
        TypeId::UINT32 => Payload::Unsigned(u64::from(integer as u32)),
        TypeId::UINT64 => Payload::Unsigned(integer as u64),
        TypeId::INT64 => Payload::Integer(integer as i64),
        _ => return Value::integer(integer as i64),
    };
    Value::new(ty, payload)
}

/// Float of type `ty`; `Float32` rounds to single precision.
#[expect(clippy::cast_possible_truncation, reason = "single precision rounding")]
pub(crate) fn fit_float(ty: TypeId, float: f64) -> Value {
    let float = if ty == TypeId::FLOAT32 {
        f64::from(float as f32)
    } else {
        float
    };
    Value::new(ty, Payload::Float(float))
}

/// Convert a number or character into the built-in scalar `kind`.
pub(crate) fn convert(kind: BasicKind, value: &Value) -> Option<Value> {
    let number = match value.payload {
        Payload::Character(character) => Number::Unsigned(u64::from(u32::from(character))),
        _ => Number::of(value)?,
    };
    let ty = kind.id();
    if is_float(kind) {
        Some(fit_float(ty, number.as_float()))
    } else if is_integer(kind) {
        Some(fit_integer(ty, number.truncate()))
    } else if kind == BasicKind::Character {
        number
            .as_integer()
            .and_then(|code| u32::try_from(code).ok())
            .and_then(char::from_u32)
            .map(Value::character)
    } else {
        None
    }
}

#[derive(Copy, Clone, Debug)]
enum Arithmetic {
    Add,
    Subtract,
    Multiply,
    Divide,
    FloorDivide,
    Modulo,
}

impl Arithmetic {
    fn selector(self) -> &'static str {
        match self {
            Arithmetic::Add => "+",
            Arithmetic::Subtract => "-",
            Arithmetic::Multiply => "*",
            Arithmetic::Divide => "/",
            Arithmetic::FloorDivide => "//",
            Arithmetic::Modulo => "%",
        }
    }

    fn apply_integer(self, left: i128, right: i128) -> Option<i128> {
        match self {
            Arithmetic::Add => Some(left + right),
            Arithmetic::Subtract => Some(left - right),
            Arithmetic::Multiply => Some(left.wrapping_mul(right)),
            _ if right == 0 => None,
            Arithmetic::Divide => Some(left / right),
            Arithmetic::FloorDivide => Some(floor_divide(left, right)),
            Arithmetic::Modulo => Some(left - right * floor_divide(left, right)),
        }
    }

    fn apply_float(self, left: f64, right: f64) -> f64 {
        match self {
            Arithmetic::Add => left + right,
            Arithmetic::Subtract => left - right,
            Arithmetic::Multiply => left * right,
            Arithmetic::Divide => left / right,
            Arithmetic::FloorDivide => (left / right).floor(),
            Arithmetic::Modulo => left - right * (left / right).floor(),
        }
    }
}

fn floor_divide(left: i128, right: i128) -> i128 {
    let quotient = left / right;
    if left % right != 0 && (left < 0) != (right < 0) {
        quotient - 1
    } else {
        quotient
    }
}

fn arithmetic(interpreter: &mut Interpreter<'_>, arguments: &[Value], operator: Arithmetic) -> EvalResult {
    let [receiver, operand] = require_args(operator.selector(), arguments)?;
    let Some(left) = Number::of(receiver) else {
        return Err(interpreter.receiver_mismatch("Number", receiver));
    };
    let Some(right) = Number::of(operand) else {
        return Err(interpreter.receiver_mismatch("Number", operand));
    };

    match (left.as_integer(), right.as_integer()) {
        (Some(left), Some(right)) => operator
            .apply_integer(left, right)
            .map(|result| fit_integer(receiver.ty, result))
            .ok_or_else(division_by_zero),
        _ => {
            let ty = if matches!(left, Number::Float(_)) {
                receiver.ty
            } else {
                operand.ty
            };
            Ok(fit_float(
                ty,
                operator.apply_float(left.as_float(), right.as_float()),
            ))
        }
    }
}

/// Ordering of two numbers; `None` when either is NaN.
fn compare(left: Number, right: Number) -> Option<Ordering> {
    match (left.as_integer(), right.as_integer()) {
        (Some(left), Some(right)) => Some(left.cmp(&right)),
        _ => left.as_float().partial_cmp(&right.as_float()),
    }
}

fn ordering(
    interpreter: &mut Interpreter<'_>,
    selector: &str,
    arguments: &[Value],
    accept: fn(Ordering) -> bool,
) -> EvalResult {
    let [receiver, operand] = require_args(selector, arguments)?;
    let (Some(left), Some(right)) = (Number::of(receiver), Number::of(operand)) else {
        return Err(interpreter.receiver_mismatch("Number", operand));
    };
    Ok(Value::boolean(compare(left, right).is_some_and(accept)))
}

/// Numeric equality; a non-number operand is simply unequal.
fn equal(arguments: &[Value], selector: &str) -> Result<bool, crate::EvalError> {
    let [receiver, operand] = require_args(selector, arguments)?;
    Ok(match (Number::of(receiver), Number::of(operand)) {
        (Some(left), Some(right)) => compare(left, right) == Some(Ordering::Equal),
        _ => false,
    })
}

fn add(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    arithmetic(interpreter, arguments, Arithmetic::Add)
}

fn subtract(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    arithmetic(interpreter, arguments, Arithmetic::Subtract)
}

fn multiply(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    arithmetic(interpreter, arguments, Arithmetic::Multiply)
}

fn divide(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    arithmetic(interpreter, arguments, Arithmetic::Divide)
}

fn floor_divide_method(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    arithmetic(interpreter, arguments, Arithmetic::FloorDivide)
}

fn modulo(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    arithmetic(interpreter, arguments, Arithmetic::Modulo)
}

fn less(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    ordering(interpreter, "<", arguments, Ordering::is_lt)
}

fn less_equal(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    ordering(interpreter, "<=", arguments, Ordering::is_le)
}

fn greater(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    ordering(interpreter, ">", arguments, Ordering::is_gt)
}

fn greater_equal(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    ordering(interpreter, ">=", arguments, Ordering::is_ge)
}

fn equals(_: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    equal(arguments, "=").map(Value::boolean)
}

fn not_equals(_: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    equal(arguments, "~=").map(|equal| Value::boolean(!equal))
}

fn negated(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let [receiver] = require_args("negated", arguments)?;
    match Number::of(receiver) {
        Some(Number::Float(float)) => Ok(fit_float(receiver.ty, -float)),
        Some(number) => Ok(fit_integer(receiver.ty, -number.truncate())),
        None => Err(interpreter.receiver_mismatch("Number", receiver)),
    }
}

const METHODS: [(&str, PrimitiveFn); 13] = [
    ("+", add),
    ("-", subtract),
    ("*", multiply),
    ("/", divide),
    ("//", floor_divide_method),
    ("%", modulo),
    ("<", less),
    ("<=", less_equal),
    (">", greater),
    (">=", greater_equal),
    ("=", equals),
    ("~=", not_equals),
    ("negated", negated),
];

pub(super) fn install(interpreter: &mut Interpreter<'_>) {
    for ty in [TypeId::INTEGER, TypeId::FLOAT] {
        for (selector, method) in METHODS {
            interpreter.define_primitive(ty, selector, method);
        }
    }
}
