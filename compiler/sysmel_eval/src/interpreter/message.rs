//! Application, message sends, cascades and binary operator sequences.

use smallvec::SmallVec;
use sysmel_ir::{NodeKind, Span, Symbol, Syntax};

use super::Interpreter;
use crate::errors::{
    malformed_cascade, no_matching_method, stale_handle, type_mismatch, uninitialized_box,
    unsupported_application, unsupported_node,
};
use crate::{
    Aggregate, Binding, EnvId, EvalError, EvalResult, FunctionId, FunctionKind, Payload, TypeId,
    TypeKind, Value,
};

/// Arguments of a single call; most calls take a receiver and one argument.
type Arguments = SmallVec<[Value; 4]>;

impl Interpreter<'_> {
    pub(super) fn evaluate_application(
        &mut self,
        env: EnvId,
        function: &Syntax,
        arguments: &[Syntax],
        span: Span,
    ) -> EvalResult {
        let callee = self.evaluate_callee(env, function)?;
        self.apply(env, callee, arguments, span)
    }

    /// Callee position also accepts names bound to types.
    fn evaluate_callee(&mut self, env: EnvId, function: &Syntax) -> EvalResult {
        if let NodeKind::Identifier(name) = &function.kind {
            if let Some(Binding::Type(ty)) = self.lookup(env, *name) {
                return Ok(Value::type_ref(*ty));
            }
        }
        self.evaluate_decayed(env, function)
    }

    /// Apply a function or type value to unevaluated argument nodes.
    pub(crate) fn apply(
        &mut self,
        env: EnvId,
        callee: Value,
        arguments: &[Syntax],
        span: Span,
    ) -> EvalResult {
        match callee.payload {
            Payload::Function(function) => self.invoke(env, function, None, arguments, span),
            Payload::Type(ty) => {
                let arguments = self.evaluate_arguments(env, arguments)?;
                self.instantiate(ty, &arguments).map_err(|error| error.or_span(span))
            }
            _ => Err(unsupported_application(self.value_type_name(&callee))),
        }
    }

    /// Evaluate arguments left to right, unboxing each.
    fn evaluate_arguments(&mut self, env: EnvId, arguments: &[Syntax]) -> Result<Arguments, EvalError> {
        arguments
            .iter()
            .map(|argument| self.evaluate_decayed(env, argument))
            .collect()
    }

    /// Call a function with an optional receiver prepended to its arguments.
    ///
    /// Primitives and closures receive evaluated arguments; macros receive
    /// the argument nodes as syntax values, and a syntax result is
    /// evaluated once more in `env`.
    #[tracing::instrument(level = "debug", skip(self, env, receiver, arguments, span))]
    pub(crate) fn invoke(
        &mut self,
        env: EnvId,
        function: FunctionId,
        receiver: Option<Value>,
        arguments: &[Syntax],
        span: Span,
    ) -> EvalResult {
        let kind = self.heap.function(function).kind.clone();
        match kind {
            FunctionKind::Primitive(primitive) => {
                let mut values: Arguments = receiver.into_iter().collect();
                values.extend(self.evaluate_arguments(env, arguments)?);
                primitive(self, &values).map_err(|error| error.or_span(span))
            }
            FunctionKind::PrimitiveMacro(expander) => {
                let mut values: Arguments = receiver.into_iter().collect();
                values.extend(arguments.iter().cloned().map(Value::syntax));
                let expansion = expander(self, env, &values).map_err(|error| error.or_span(span))?;
                match expansion.payload {
                    Payload::Syntax(node) => self.evaluate(env, &node),
                    _ => Ok(expansion),
                }
            }
            FunctionKind::Interpreted(closure) => {
                let mut values: Arguments = receiver.into_iter().collect();
                values.extend(self.evaluate_arguments(env, arguments)?);
                self.call_closure(function, &closure, &values)
                    .map_err(|error| error.or_span(span))
            }
        }
    }

    /// Call a function with already evaluated arguments.
    ///
    /// Used by primitives that call back into user code. Macros get their
    /// arguments as they are.
    pub fn call_function(&mut self, env: EnvId, function: FunctionId, arguments: &[Value]) -> EvalResult {
        if !self.environments.contains(env) {
            return Err(stale_handle("environment"));
        }
        if !self.heap.contains_function(function) {
            return Err(stale_handle("function"));
        }
        let kind = self.heap.function(function).kind.clone();
        match kind {
            FunctionKind::Primitive(primitive) => primitive(self, arguments),
            FunctionKind::PrimitiveMacro(expander) => {
                let expansion = expander(self, env, arguments)?;
                match expansion.payload {
                    Payload::Syntax(node) => self.evaluate(env, &node),
                    _ => Ok(expansion),
                }
            }
            FunctionKind::Interpreted(closure) => self.call_closure(function, &closure, arguments),
        }
    }

    pub(super) fn evaluate_message_send(
        &mut self,
        env: EnvId,
        receiver: &Syntax,
        selector: &Syntax,
        arguments: &[Syntax],
        span: Span,
    ) -> EvalResult {
        let receiver = self.evaluate(env, receiver)?;
        let selector = self.evaluate_symbol(env, selector)?;
        self.send_message(env, receiver, selector, arguments, span)
    }

    /// Send `selector` to `receiver`.
    ///
    /// Method lookup walks the receiver type's supertypes. When it fails the
    /// fallbacks are tried in order: unbox a mutable box and resend; record
    /// field read/write; alternative of a sum or enum type; exported
    /// namespace binding.
    #[tracing::instrument(
        level = "debug",
        skip(self, env, receiver, arguments, span),
        fields(selector = self.interner.lookup(selector))
    )]
    pub(crate) fn send_message(
        &mut self,
        env: EnvId,
        receiver: Value,
        selector: Symbol,
        arguments: &[Syntax],
        span: Span,
    ) -> EvalResult {
        if let Some(method) = self.types.lookup_method(receiver.ty, selector) {
            return self.invoke(env, method, Some(receiver), arguments, span);
        }

        if let Payload::Box(cell) = receiver.payload {
            let contents = self
                .heap
                .box_contents(cell)
                .cloned()
                .ok_or_else(uninitialized_box)?;
            return self.send_message(env, contents, selector, arguments, span);
        }

        if let Some(result) = self.record_accessor(env, &receiver, selector, arguments)? {
            return Ok(result);
        }

        if let Some(ty) = receiver.as_type() {
            if let Some(alternative) = self.alternative_named(ty, selector) {
                return Ok(alternative);
            }
        }

        if let Payload::Namespace(namespace) = receiver.payload {
            let exported = self.heap.namespace(namespace).exported.lookup(selector).cloned();
            match exported {
                Some(Binding::Value(value)) if arguments.is_empty() => return Ok(value),
                Some(Binding::Value(value)) => {
                    let value = self.decay(value)?;
                    return self.apply(env, value, arguments, span);
                }
                Some(Binding::Type(ty)) if arguments.is_empty() => return Ok(Value::type_ref(ty)),
                Some(Binding::Type(ty)) => {
                    return self.apply(env, Value::type_ref(ty), arguments, span);
                }
                None => {}
            }
        }

        Err(no_matching_method(
            self.symbol_text(selector),
            self.value_type_name(&receiver),
        ))
    }

    /// `record field` reads a field; `record field: value` overwrites it in
    /// place and yields the record.
    fn record_accessor(
        &mut self,
        env: EnvId,
        receiver: &Value,
        selector: Symbol,
        arguments: &[Syntax],
    ) -> Result<Option<Value>, EvalError> {
        let Payload::Aggregate(aggregate) = receiver.payload else {
            return Ok(None);
        };
        let TypeKind::Record { fields } = &self.types.get(receiver.ty).kind else {
            return Ok(None);
        };

        let selector_text = self.symbol_text(selector);
        match arguments {
            [] => {
                let Some(index) = fields.iter().position(|field| field.name == selector) else {
                    return Ok(None);
                };
                match self.heap.aggregate(aggregate) {
                    Aggregate::Record(values) => Ok(values.get(index).cloned()),
                    _ => Ok(None),
                }
            }
            [argument] => {
                let Some(field_name) = selector_text.strip_suffix(':') else {
                    return Ok(None);
                };
                let Some(index) = fields
                    .iter()
                    .position(|field| self.interner.lookup(field.name) == field_name)
                else {
                    return Ok(None);
                };
                let value = self.evaluate_decayed(env, argument)?;
                if let Aggregate::Record(values) = self.heap.aggregate_mut(aggregate) {
                    if let Some(slot) = values.get_mut(index) {
                        *slot = value;
                        return Ok(Some(receiver.clone()));
                    }
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Alternative of a sum type, or constant of an enum type, by name.
    fn alternative_named(&self, ty: TypeId, selector: Symbol) -> Option<Value> {
        match &self.types.get(ty).kind {
            TypeKind::Sum { alternatives, .. } => alternatives
                .iter()
                .find(|alternative| self.types.get(**alternative).name == Some(selector))
                .map(|alternative| Value::type_ref(*alternative)),
            TypeKind::Enum { values, .. } => values
                .iter()
                .find(|(name, _)| *name == selector)
                .map(|(_, value)| value.clone()),
            _ => None,
        }
    }

    /// Evaluate the receiver once and send every cascaded message to it.
    /// Yields the last message's result.
    pub(super) fn evaluate_cascade(
        &mut self,
        env: EnvId,
        receiver: &Syntax,
        messages: &[Syntax],
    ) -> EvalResult {
        if let Some(malformed) = messages
            .iter()
            .find(|message| !matches!(message.kind, NodeKind::CascadeMessage { .. }))
        {
            return Err(malformed_cascade(malformed.kind.name()).with_span(malformed.span));
        }

        let receiver = self.evaluate(env, receiver)?;
        let mut result = receiver.clone();
        for message in messages {
            if let NodeKind::CascadeMessage {
                selector,
                arguments,
            } = &message.kind
            {
                let selector = self.evaluate_symbol(env, selector)?;
                result = self
                    .send_message(env, receiver.clone(), selector, arguments, message.span)
                    .map_err(|error| error.or_span(message.span))?;
            }
        }
        Ok(result)
    }

    /// Strict left-to-right fold: `a op1 b op2 c` is `(a op1 b) op2 c`.
    pub(super) fn evaluate_binary_sequence(
        &mut self,
        env: EnvId,
        elements: &[Syntax],
        span: Span,
    ) -> EvalResult {
        let Some((first, rest)) = elements.split_first() else {
            return Err(unsupported_node("empty binary operator sequence"));
        };
        if rest.len() % 2 != 0 {
            return Err(unsupported_node("binary operator sequence without a final operand"));
        }

        let mut result = self.evaluate(env, first)?;
        for pair in rest.chunks_exact(2) {
            let operator = self.evaluate_symbol(env, &pair[0])?;
            result = self.send_message(env, result, operator, &pair[1..], span)?;
        }
        Ok(result)
    }

    /// Type mismatch for a receiver of the wrong kind, for primitives.
    pub(crate) fn receiver_mismatch(&self, expected: &str, got: &Value) -> EvalError {
        type_mismatch(expected, self.value_type_name(got))
    }
}
