//! Tree-walking interpreter.
//!
//! [`Interpreter::evaluate`] dispatches over every node kind. The rules for
//! each family of nodes live in their own module:
//!
//! - `message`: application, message sends, cascades, binary sequences
//! - `closure`: block closures and function invocation
//! - `binding`: identifiers, bindable names, assignment, namespaces
//! - `control`: if, loops, switches, assertions
//! - `aggregate`: array/tuple/dictionary literals and type instantiation
//! - `quote`: quasiquotation
//! - `program`: top-level statement evaluation under an [`ErrorPolicy`]
//!
//! Evaluation carries no state besides the environment handle it is given;
//! declarations write into the environment chain and the type registry.

mod aggregate;
mod binding;
mod bootstrap;
mod builder;
mod closure;
mod control;
mod message;
mod program;
mod quote;

pub use builder::InterpreterBuilder;

use sysmel_ir::{Interner, NodeKind, Symbol, Syntax};
use sysmel_stack::ensure_sufficient_stack;

use crate::errors::{
    stale_handle, syntax_error, type_mismatch, uninitialized_box, unsupported_node,
};
use crate::{
    Binding, EnvId, Environments, ErrorPolicy, EvalError, EvalResult, Heap, Payload, Printer,
    SharedPrintHandler, TypeId, TypeRegistry, Value,
};

/// Names the evaluator compares against on hot paths, interned once.
#[derive(Clone, Copy)]
pub(crate) struct Names {
    /// `_`, the switch wildcard.
    pub(crate) wildcard: Symbol,
    /// `:=`, the selector assignments to non-variables desugar into.
    pub(crate) assign: Symbol,
}

impl Names {
    fn new(interner: &Interner) -> Self {
        Names {
            wildcard: interner.intern("_"),
            assign: interner.intern(":="),
        }
    }
}

/// The evaluator together with the runtime it evaluates against.
pub struct Interpreter<'a> {
    pub(crate) interner: &'a Interner,
    pub(crate) types: TypeRegistry,
    pub(crate) environments: Environments,
    pub(crate) heap: Heap,
    pub(crate) names: Names,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) error_policy: ErrorPolicy,
    pub(crate) module_name: Symbol,
}

impl<'a> Interpreter<'a> {
    /// Interpreter with the default configuration.
    pub fn new(interner: &'a Interner) -> Self {
        InterpreterBuilder::new(interner).build()
    }

    pub fn interner(&self) -> &'a Interner {
        self.interner
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn environments(&self) -> &Environments {
        &self.environments
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    /// Evaluate `node` in `env`.
    ///
    /// Errors leave with the span of the innermost node that raised them.
    pub fn evaluate(&mut self, env: EnvId, node: &Syntax) -> EvalResult {
        if !self.environments.contains(env) {
            return Err(stale_handle("environment").with_span(node.span));
        }
        ensure_sufficient_stack(|| self.evaluate_node(env, node))
            .map_err(|error| error.or_span(node.span))
    }

    #[tracing::instrument(level = "trace", skip_all, fields(kind = node.kind.name()))]
    fn evaluate_node(&mut self, env: EnvId, node: &Syntax) -> EvalResult {
        match &node.kind {
            NodeKind::Error { message } => Err(syntax_error(message)),

            NodeKind::LiteralInteger(value) => Ok(Value::integer(*value)),
            NodeKind::LiteralFloat(value) => Ok(Value::float(*value)),
            NodeKind::LiteralCharacter(value) => Ok(Value::character(*value)),
            NodeKind::LiteralString(value) => Ok(Value::string(value.clone())),
            NodeKind::LiteralSymbol(value) => Ok(Value::symbol(*value)),

            NodeKind::Identifier(name) => self.evaluate_identifier(env, *name),

            NodeKind::Application {
                function,
                arguments,
            } => self.evaluate_application(env, function, arguments, node.span),
            NodeKind::MessageSend {
                receiver,
                selector,
                arguments,
            } => self.evaluate_message_send(env, receiver, selector, arguments, node.span),
            NodeKind::MessageCascade { receiver, messages } => {
                self.evaluate_cascade(env, receiver, messages)
            }
            NodeKind::BinaryOperatorSequence(elements) => {
                self.evaluate_binary_sequence(env, elements, node.span)
            }
            NodeKind::Sequence(elements) => self.evaluate_sequence(env, elements),

            NodeKind::Tuple(elements) => self.evaluate_tuple(env, elements),
            NodeKind::Array(elements) => self.evaluate_array(env, elements),
            NodeKind::ByteArray(elements) => self.evaluate_byte_array(env, elements),
            NodeKind::Dictionary(elements) => self.evaluate_dictionary(env, elements),
            NodeKind::Association { key, value } => {
                self.evaluate_association(env, key, value.as_ref())
            }

            NodeKind::BlockClosure {
                function_type: Some(function_type),
                body,
            } => self.compile_closure(env, None, function_type, body),
            NodeKind::BlockClosure {
                function_type: None,
                body,
            }
            | NodeKind::LexicalBlock { body } => self.evaluate_lexical_block(env, body),

            NodeKind::Quote(quoted) => Ok(Value::syntax(quoted.clone())),
            NodeKind::Quasiquote(template) => {
                let expanded = self.quasiquote(env, template)?;
                Ok(Value::syntax(expanded))
            }

            NodeKind::BindableName {
                type_expression: _,
                name,
                is_mutable,
            } => self.evaluate_bindable_name(env, name.as_ref(), *is_mutable),
            NodeKind::Assignment { store, value } => {
                self.evaluate_assignment(env, store, value, node.span)
            }

            NodeKind::If {
                condition,
                true_branch,
                false_branch,
            } => self.evaluate_if(env, condition, true_branch.as_ref(), false_branch.as_ref()),
            NodeKind::While {
                condition,
                body,
                continue_expression,
            } => self.evaluate_while(env, condition, body.as_ref(), continue_expression.as_ref()),
            NodeKind::DoWhile {
                body,
                condition,
                continue_expression,
            } => {
                self.evaluate_do_while(env, body.as_ref(), condition, continue_expression.as_ref())
            }
            NodeKind::Switch { key, cases } => self.evaluate_switch(env, key, cases),
            NodeKind::SwitchPattern {
                value,
                value_type,
                cases,
            } => self.evaluate_switch_pattern(env, value, value_type, cases),

            NodeKind::NamespaceDefinition { name, body } => {
                self.evaluate_namespace_definition(env, name, body.as_ref())
            }

            NodeKind::Assert { condition, message } => {
                self.evaluate_assert(env, condition, message.as_ref())
            }

            NodeKind::CascadeMessage { .. }
            | NodeKind::Unquote(_)
            | NodeKind::Splice(_)
            | NodeKind::FunctionalDependentType { .. } => Err(unsupported_node(node.kind.name())),
        }
    }

    /// Elements in order; the value of the last one, or void when empty.
    fn evaluate_sequence(&mut self, env: EnvId, elements: &[Syntax]) -> EvalResult {
        let mut result = Value::void();
        for element in elements {
            result = self.evaluate(env, element)?;
        }
        Ok(result)
    }

    // Shared helpers

    /// Replace a box by its contents; other values pass through.
    pub fn decay(&self, value: Value) -> EvalResult {
        match value.payload {
            Payload::Box(cell) => self.heap.box_contents(cell).cloned().ok_or_else(uninitialized_box),
            _ => Ok(value),
        }
    }

    pub(crate) fn evaluate_decayed(&mut self, env: EnvId, node: &Syntax) -> EvalResult {
        let value = self.evaluate(env, node)?;
        self.decay(value).map_err(|error| error.or_span(node.span))
    }

    /// Evaluate a node that must produce a symbol (selectors, names).
    pub(crate) fn evaluate_symbol(&mut self, env: EnvId, node: &Syntax) -> Result<Symbol, EvalError> {
        let value = self.evaluate_decayed(env, node)?;
        value.as_symbol().ok_or_else(|| {
            type_mismatch("Symbol", self.value_type_name(&value)).with_span(node.span)
        })
    }

    /// Evaluate a node that must produce a boolean.
    pub(crate) fn evaluate_boolean(&mut self, env: EnvId, node: &Syntax) -> Result<bool, EvalError> {
        let value = self.evaluate_decayed(env, node)?;
        value.as_boolean().ok_or_else(|| {
            type_mismatch("Boolean", self.value_type_name(&value)).with_span(node.span)
        })
    }

    /// Bind `name` in `env` itself.
    pub(crate) fn bind(&mut self, env: EnvId, name: Symbol, binding: Binding) -> Result<(), EvalError> {
        if self.environments.bind_local(env, name, binding) {
            Ok(())
        } else {
            Err(crate::errors::invalid_binding(
                self.symbol_text(name),
                "the empty environment cannot hold bindings",
            ))
        }
    }

    /// Look up `name` from `env` outward. A stale `env` binds nothing.
    pub fn lookup(&self, env: EnvId, name: Symbol) -> Option<&Binding> {
        if !self.environments.contains(env) {
            return None;
        }
        self.environments.lookup(env, name)
    }

    #[inline]
    pub(crate) fn symbol_text(&self, symbol: Symbol) -> &'static str {
        self.interner.lookup(symbol)
    }

    pub(crate) fn type_name(&self, ty: TypeId) -> &'static str {
        self.types.name(ty, self.interner)
    }

    pub(crate) fn value_type_name(&self, value: &Value) -> &'static str {
        self.type_name(value.ty)
    }

    /// Literal-like text of a value.
    pub fn print_string(&self, value: &Value) -> String {
        Printer::new(self.interner, &self.types, &self.heap).print_string(value)
    }

    /// Text `printLine` writes for a value.
    pub fn display_string(&self, value: &Value) -> String {
        Printer::new(self.interner, &self.types, &self.heap).display_string(value)
    }
}
