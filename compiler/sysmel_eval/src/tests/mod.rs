//! Whole-program scenarios run through the interpreter.
//!
//! Trees are assembled with [`SyntaxBuilder`] and evaluated in the
//! top-level environment of a fresh module, with output captured in a
//! buffer.

mod closure_tests;
mod declaration_tests;
mod message_tests;

use sysmel_ir::{Interner, Syntax, SyntaxBuilder};

use crate::{
    buffer_handler, EnvId, ErrorPolicy, EvalError, EvalErrorKind, EvalResult, Interpreter,
    InterpreterBuilder, SharedPrintHandler, Value,
};

/// An interpreter, a top-level environment and a tree builder.
pub(crate) struct Session<'a> {
    pub(crate) interpreter: Interpreter<'a>,
    pub(crate) env: EnvId,
    pub(crate) syntax: SyntaxBuilder<'a>,
    pub(crate) output: SharedPrintHandler,
}

impl<'a> Session<'a> {
    pub(crate) fn new(interner: &'a Interner) -> Self {
        Self::with_policy(interner, ErrorPolicy::AbortProgram)
    }

    pub(crate) fn with_policy(interner: &'a Interner, policy: ErrorPolicy) -> Self {
        let output = buffer_handler();
        let mut interpreter = InterpreterBuilder::new(interner)
            .error_policy(policy)
            .print_handler(output.clone())
            .build();
        let module = interpreter.create_module(interner.intern("Test"));
        let env = interpreter
            .create_top_level_environment(module)
            .unwrap_or_else(|error| panic!("{error}"));
        Session {
            interpreter,
            env,
            syntax: SyntaxBuilder::new(interner),
            output,
        }
    }

    pub(crate) fn eval(&mut self, node: &Syntax) -> EvalResult {
        self.interpreter.evaluate(self.env, node)
    }

    /// Evaluate and unbox; panics with the error message on failure.
    pub(crate) fn value(&mut self, node: &Syntax) -> Value {
        match self.eval(node).and_then(|value| self.interpreter.decay(value)) {
            Ok(value) => value,
            Err(error) => panic!("evaluation failed: {error}"),
        }
    }

    /// Evaluate and render the unboxed result with `printString` rules.
    pub(crate) fn print(&mut self, node: &Syntax) -> String {
        let value = self.value(node);
        self.interpreter.print_string(&value)
    }

    /// Evaluate, expecting an error; returns it.
    pub(crate) fn error(&mut self, node: &Syntax) -> EvalError {
        match self.eval(node) {
            Ok(value) => panic!(
                "expected an error, got {}",
                self.interpreter.print_string(&value)
            ),
            Err(error) => error,
        }
    }

    pub(crate) fn error_kind(&mut self, node: &Syntax) -> EvalErrorKind {
        self.error(node).kind
    }

    pub(crate) fn output(&self) -> String {
        self.output.get_output()
    }
}
