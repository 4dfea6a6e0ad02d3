//! Identifiers, bindable names, assignment and namespace definitions.

use sysmel_ir::{NodeKind, Span, Symbol, Syntax};

use super::Interpreter;
use crate::errors::{invalid_binding, type_mismatch, unbound_identifier};
use crate::{
    Binding, EnvId, EnvironmentKind, EvalError, EvalResult, Namespace, Payload, TypeId, Value,
};

impl Interpreter<'_> {
    /// A value binding yields its value. Types are only valid in type
    /// positions (callees, declared types, pattern types).
    pub(super) fn evaluate_identifier(&mut self, env: EnvId, name: Symbol) -> EvalResult {
        match self.lookup(env, name) {
            Some(Binding::Value(value)) => Ok(value.clone()),
            Some(Binding::Type(_)) => Err(invalid_binding(
                self.symbol_text(name),
                "names a type, not a value",
            )),
            None => Err(unbound_identifier(self.symbol_text(name))),
        }
    }

    /// Evaluate an expression in type position.
    pub(crate) fn evaluate_type_expression(
        &mut self,
        env: EnvId,
        node: &Syntax,
    ) -> Result<TypeId, EvalError> {
        if let NodeKind::Identifier(name) = &node.kind {
            if let Some(Binding::Type(ty)) = self.lookup(env, *name) {
                return Ok(*ty);
            }
        }
        let value = self.evaluate_decayed(env, node)?;
        value
            .as_type()
            .ok_or_else(|| type_mismatch("Type", self.value_type_name(&value)).with_span(node.span))
    }

    /// `:!x` outside an assignment declares `x` as a fresh empty box.
    pub(super) fn evaluate_bindable_name(
        &mut self,
        env: EnvId,
        name: Option<&Syntax>,
        is_mutable: bool,
    ) -> EvalResult {
        let Some(name) = name else {
            return Err(invalid_binding("_", "an anonymous bindable name cannot be declared"));
        };
        let name = self.evaluate_symbol(env, name)?;
        if !is_mutable {
            return Err(invalid_binding(
                self.symbol_text(name),
                "an immutable bindable name needs a value",
            ));
        }
        let cell = Value::boxed(self.heap.alloc_box(None));
        self.bind(env, name, Binding::Value(cell.clone()))?;
        Ok(cell)
    }

    /// Assignment rules, by the shape of the left side:
    ///
    /// - bindable name typed with a functional dependent type: define a
    ///   named closure whose body is the right side
    /// - other bindable name: bind the right side's value, boxed if mutable
    /// - identifier resolving to a box: overwrite the box's contents
    /// - anything else: send `:=` to the left side's value
    pub(super) fn evaluate_assignment(
        &mut self,
        env: EnvId,
        store: &Syntax,
        value: &Syntax,
        span: Span,
    ) -> EvalResult {
        match &store.kind {
            NodeKind::BindableName {
                type_expression,
                name,
                is_mutable,
            } => {
                let Some(name) = name else {
                    return Err(invalid_binding("_", "cannot assign to an anonymous name")
                        .with_span(store.span));
                };
                let name = self.evaluate_symbol(env, name)?;

                if let Some(function_type) = type_expression
                    .as_ref()
                    .filter(|ty| matches!(ty.kind, NodeKind::FunctionalDependentType { .. }))
                {
                    let function = self.compile_closure(env, Some(name), function_type, value)?;
                    self.bind(env, name, Binding::Value(function.clone()))?;
                    return Ok(function);
                }

                let value = self.evaluate_decayed(env, value)?;
                let bound = if *is_mutable {
                    Value::boxed(self.heap.alloc_box(Some(value)))
                } else {
                    value
                };
                self.bind(env, name, Binding::Value(bound.clone()))?;
                Ok(bound)
            }
            NodeKind::Identifier(name) => {
                let cell = match self.lookup(env, *name) {
                    Some(Binding::Value(Value {
                        payload: Payload::Box(cell),
                        ..
                    })) => Some(*cell),
                    _ => None,
                };
                match cell {
                    Some(cell) => {
                        let value = self.evaluate_decayed(env, value)?;
                        self.heap.store_box(cell, value);
                        Ok(Value::boxed(cell))
                    }
                    None => self.send_assignment(env, store, value, span),
                }
            }
            _ => self.send_assignment(env, store, value, span),
        }
    }

    fn send_assignment(&mut self, env: EnvId, store: &Syntax, value: &Syntax, span: Span) -> EvalResult {
        let receiver = self.evaluate(env, store)?;
        let selector = self.names.assign;
        self.send_message(env, receiver, selector, std::slice::from_ref(value), span)
    }

    /// Evaluate a namespace body in a lexical scope over the namespace's
    /// environment. A name already bound here to a namespace reopens it.
    pub(super) fn evaluate_namespace_definition(
        &mut self,
        env: EnvId,
        name: &Syntax,
        body: Option<&Syntax>,
    ) -> EvalResult {
        let name = self.evaluate_symbol(env, name)?;
        let existing = match self.environments.lookup_local(env, name) {
            Some(Binding::Value(Value {
                payload: Payload::Namespace(namespace),
                ..
            })) => Some(*namespace),
            _ => None,
        };

        let namespace = match existing {
            Some(namespace) => namespace,
            None => {
                let environment = self.environments.create(EnvironmentKind::Namespace, env);
                let namespace = self.heap.alloc_namespace(Namespace::new(name, environment));
                self.bind(env, name, Binding::Value(Value::namespace(namespace)))?;
                tracing::debug!(namespace = self.symbol_text(name), "created namespace");
                namespace
            }
        };

        let scope = self.environments.create(
            EnvironmentKind::Lexical,
            self.heap.namespace(namespace).environment,
        );
        self.heap.namespace_mut(namespace).scope = scope;
        if let Some(body) = body {
            self.evaluate(scope, body)?;
        }
        Ok(Value::namespace(namespace))
    }
}
