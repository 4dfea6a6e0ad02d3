//! Callable objects.

use sysmel_ir::{Symbol, Syntax};

use crate::{EnvId, EvalResult, Interpreter, Value};

sysmel_ir::define_index! {
    /// Handle of a [`Function`] in the heap.
    pub struct FunctionId;
}

/// Native function receiving evaluated arguments.
///
/// For methods the receiver is the first argument.
pub type PrimitiveFn = fn(&mut Interpreter<'_>, &[Value]) -> EvalResult;

/// Native macro receiving the caller's environment and its arguments as
/// unevaluated syntax values (after the receiver, for methods).
///
/// A syntax value returned from a macro is evaluated once more in the
/// caller's environment.
pub type MacroFn = fn(&mut Interpreter<'_>, EnvId, &[Value]) -> EvalResult;

/// A formal parameter of a closure.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    /// `None` for anonymous parameters, which accept but ignore an argument.
    pub name: Option<Symbol>,
    /// Mutable parameters are bound to a fresh box holding the argument.
    pub is_mutable: bool,
}

/// User-defined function: captured environment, parameters and body.
#[derive(Clone, Debug)]
pub struct Closure {
    /// Function-analysis environment chained to the definition site.
    pub environment: EnvId,
    pub parameters: Vec<Parameter>,
    pub body: Syntax,
}

#[derive(Clone)]
pub enum FunctionKind {
    Primitive(PrimitiveFn),
    PrimitiveMacro(MacroFn),
    Interpreted(Closure),
}

impl std::fmt::Debug for FunctionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FunctionKind::Primitive(_) => f.write_str("Primitive"),
            FunctionKind::PrimitiveMacro(_) => f.write_str("PrimitiveMacro"),
            FunctionKind::Interpreted(closure) => f.debug_tuple("Interpreted").field(closure).finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Function {
    /// Name used for recursive self-reference and for printing.
    pub name: Option<Symbol>,
    pub kind: FunctionKind,
}

impl Function {
    pub fn primitive(name: Option<Symbol>, function: PrimitiveFn) -> Self {
        Function {
            name,
            kind: FunctionKind::Primitive(function),
        }
    }

    pub fn primitive_macro(name: Option<Symbol>, function: MacroFn) -> Self {
        Function {
            name,
            kind: FunctionKind::PrimitiveMacro(function),
        }
    }

    pub fn interpreted(name: Option<Symbol>, closure: Closure) -> Self {
        Function {
            name,
            kind: FunctionKind::Interpreted(closure),
        }
    }
}
