//! Block closures, lexical blocks and closure invocation.

use sysmel_ir::{IdentitySet, NodeKind, Symbol, Syntax};

use super::Interpreter;
use crate::errors::{arity_mismatch, invalid_binding};
use crate::{
    Binding, Closure, EnvId, EnvironmentKind, EvalError, EvalResult, Function, FunctionId,
    Parameter, Value,
};

impl Interpreter<'_> {
    /// Compile a block with a parameter clause into a function value.
    ///
    /// The closure captures a function-analysis environment chained to
    /// `env`. A named closure binds its own name there, so its body can
    /// call itself.
    pub(crate) fn compile_closure(
        &mut self,
        env: EnvId,
        name: Option<Symbol>,
        function_type: &Syntax,
        body: &Syntax,
    ) -> EvalResult {
        let parameters = self.closure_parameters(env, function_type)?;
        let analysis = self
            .environments
            .create(EnvironmentKind::FunctionAnalysis, env);
        let function = self.heap.alloc_function(Function::interpreted(
            name,
            Closure {
                environment: analysis,
                parameters,
                body: body.clone(),
            },
        ));
        let value = Value::function(function);
        if let Some(name) = name {
            self.bind(analysis, name, Binding::Value(value.clone()))?;
        }
        Ok(value)
    }

    fn closure_parameters(
        &mut self,
        env: EnvId,
        function_type: &Syntax,
    ) -> Result<Vec<Parameter>, EvalError> {
        let NodeKind::FunctionalDependentType { arguments, .. } = &function_type.kind else {
            return Err(invalid_binding(
                function_type.kind.name(),
                "a closure signature must be a functional dependent type",
            )
            .with_span(function_type.span));
        };

        let mut seen = IdentitySet::new();
        let mut parameters = Vec::with_capacity(arguments.len());
        for argument in arguments {
            let NodeKind::BindableName {
                name, is_mutable, ..
            } = &argument.kind
            else {
                return Err(invalid_binding(
                    argument.kind.name(),
                    "parameters must be bindable names",
                )
                .with_span(argument.span));
            };
            let name = match name {
                Some(name) => Some(self.evaluate_symbol(env, name)?),
                None => None,
            };
            if let Some(name) = name {
                if !seen.insert(name) {
                    return Err(invalid_binding(self.symbol_text(name), "duplicate parameter")
                        .with_span(argument.span));
                }
            }
            parameters.push(Parameter {
                name,
                is_mutable: *is_mutable,
            });
        }
        Ok(parameters)
    }

    /// Bind the arguments in a fresh activation environment chained to the
    /// closure's definition site and evaluate the body there.
    #[tracing::instrument(level = "debug", skip(self, closure, arguments), fields(arity = arguments.len()))]
    pub(crate) fn call_closure(
        &mut self,
        function: FunctionId,
        closure: &Closure,
        arguments: &[Value],
    ) -> EvalResult {
        if arguments.len() != closure.parameters.len() {
            let name = self
                .heap
                .function(function)
                .name
                .map_or("<block>", |name| self.symbol_text(name));
            return Err(arity_mismatch(
                name,
                closure.parameters.len(),
                arguments.len(),
            ));
        }

        let activation = self
            .environments
            .create(EnvironmentKind::FunctionActivation, closure.environment);
        for (parameter, argument) in closure.parameters.iter().zip(arguments) {
            let Some(name) = parameter.name else {
                continue;
            };
            let value = if parameter.is_mutable {
                Value::boxed(self.heap.alloc_box(Some(argument.clone())))
            } else {
                argument.clone()
            };
            self.bind(activation, name, Binding::Value(value))?;
        }

        self.evaluate(activation, &closure.body)
    }

    /// A block without a parameter clause runs immediately in a nested scope.
    pub(super) fn evaluate_lexical_block(&mut self, env: EnvId, body: &Syntax) -> EvalResult {
        let scope = self.environments.create(EnvironmentKind::Lexical, env);
        self.evaluate(scope, body)
    }
}
