//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use sysmel_ir::Interner;

use super::{Interpreter, Names};
use crate::{stdout_handler, Environments, ErrorPolicy, Heap, SharedPrintHandler, TypeRegistry};

/// Name given to the module `evaluate_program` creates when none is set.
const DEFAULT_MODULE_NAME: &str = "Main";

/// Builder for creating Interpreter instances with various configurations.
///
/// Defaults suit batch evaluation: the first error aborts the program and
/// output goes to stdout. A REPL would use [`ErrorPolicy::AbortStatement`];
/// tests usually capture output with a buffer handler.
pub struct InterpreterBuilder<'a> {
    interner: &'a Interner,
    error_policy: ErrorPolicy,
    print_handler: Option<SharedPrintHandler>,
    module_name: Option<String>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a Interner) -> Self {
        Self {
            interner,
            error_policy: ErrorPolicy::default(),
            print_handler: None,
            module_name: None,
        }
    }

    /// Set what an evaluation error aborts.
    #[must_use]
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Set where `printLine` output goes. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the name of the module `evaluate_program` creates.
    #[must_use]
    pub fn module_name(mut self, name: &str) -> Self {
        self.module_name = Some(name.to_owned());
        self
    }

    /// Build the interpreter.
    ///
    /// The runtime starts empty; built-in types and the intrinsic
    /// environment are created on first use.
    pub fn build(self) -> Interpreter<'a> {
        let module_name = self
            .interner
            .intern(self.module_name.as_deref().unwrap_or(DEFAULT_MODULE_NAME));

        Interpreter {
            interner: self.interner,
            types: TypeRegistry::new(),
            environments: Environments::new(),
            heap: Heap::new(),
            names: Names::new(self.interner),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            error_policy: self.error_policy,
            module_name,
        }
    }
}
