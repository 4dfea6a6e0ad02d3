//! Intrinsic values, functions and built-in methods.
//!
//! Everything here is installed once, when the intrinsic environment is
//! created. Methods go into the method tables of the built-in types;
//! values and functions are bound in the intrinsic environment itself.

mod boolean;
mod collection;
mod declarations;
pub(crate) mod numeric;
mod root;
mod text;

use crate::errors::arity_mismatch;
use crate::{Binding, EnvId, EvalError, Interpreter, Value};

pub(crate) fn install(interpreter: &mut Interpreter<'_>, env: EnvId) {
    interpreter.bind_intrinsic(env, "true", Binding::Value(Value::boolean(true)));
    interpreter.bind_intrinsic(env, "false", Binding::Value(Value::boolean(false)));
    interpreter.bind_intrinsic(env, "nil", Binding::Value(Value::nil()));
    interpreter.bind_intrinsic(env, "void", Binding::Value(Value::void()));

    declarations::install(interpreter, env);
    root::install(interpreter);
    numeric::install(interpreter);
    boolean::install(interpreter);
    text::install(interpreter);
    collection::install(interpreter);
}

/// Check the argument count of a primitive, receiver included.
fn require_args<'v, const N: usize>(
    name: &str,
    arguments: &'v [Value],
) -> Result<&'v [Value; N], EvalError> {
    arguments
        .try_into()
        .map_err(|_| arity_mismatch(name, N, arguments.len()))
}
