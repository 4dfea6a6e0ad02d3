//! Sysmel Eval - tree-walking evaluator for the Sysmel bootstrap core.
//!
//! Turns syntax trees into runtime values by walking them against a chain of
//! lexical, namespace and module environments.
//!
//! # Architecture
//!
//! The [`Interpreter`] owns every runtime structure:
//! - `TypeRegistry`: built-in type descriptors plus user records, sums and enums
//! - `Environments`: the parent-linked scope chain
//! - `Heap`: grow-only arenas for boxes, aggregates, functions, namespaces
//!   and modules
//!
//! Nothing is freed individually. Dropping the interpreter releases the
//! whole runtime at once; building a fresh interpreter (or calling
//! [`Interpreter::reset`]) starts over from an empty runtime.
//!
//! Evaluation entry points:
//! - [`Interpreter::create_module`] and
//!   [`Interpreter::create_top_level_environment`] bootstrap a session
//! - [`Interpreter::evaluate`] evaluates one tree in an environment
//! - [`Interpreter::evaluate_program`] evaluates statements under the
//!   configured [`ErrorPolicy`]

mod config;
mod environment;
pub mod errors;
mod function;
mod heap;
pub mod interpreter;
mod namespace;
mod primitives;
mod print_handler;
mod printer;
mod types;
mod value;

#[cfg(test)]
mod tests;

use std::sync::Once;

pub use config::{ErrorPolicy, ProgramOutcome};
pub use environment::{Binding, EnvId, Environment, EnvironmentKind, Environments};
pub use errors::{EvalError, EvalErrorKind, EvalNote, EvalResult};
pub use function::{Closure, Function, FunctionId, FunctionKind, MacroFn, Parameter, PrimitiveFn};
pub use heap::{Aggregate, AggregateId, BoxId, Heap, MutableBox};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use namespace::{Module, ModuleId, Namespace, NamespaceId};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use printer::Printer;
pub use types::{BasicKind, BasicTypes, Field, Type, TypeId, TypeKind, TypeRegistry, BASIC_COUNT};
pub use value::{Payload, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Nothing is installed unless `RUST_LOG` is
/// set; enable with `RUST_LOG=sysmel_eval=debug` or `RUST_LOG=sysmel_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
