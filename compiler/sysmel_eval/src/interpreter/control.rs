//! Conditionals, loops, switches and assertions.

use sysmel_ir::{NodeKind, SwitchCase, Syntax};

use super::Interpreter;
use crate::errors::{assertion_failure, invalid_binding, type_mismatch};
use crate::{
    Aggregate, Binding, EnvId, EnvironmentKind, EvalError, EvalResult, Payload, TypeId, TypeKind,
    Value,
};

impl Interpreter<'_> {
    pub(super) fn evaluate_if(
        &mut self,
        env: EnvId,
        condition: &Syntax,
        true_branch: Option<&Syntax>,
        false_branch: Option<&Syntax>,
    ) -> EvalResult {
        let branch = if self.evaluate_boolean(env, condition)? {
            true_branch
        } else {
            false_branch
        };
        match branch {
            Some(branch) => self.evaluate(env, branch),
            None => Ok(Value::void()),
        }
    }

    pub(super) fn evaluate_while(
        &mut self,
        env: EnvId,
        condition: &Syntax,
        body: Option<&Syntax>,
        continue_expression: Option<&Syntax>,
    ) -> EvalResult {
        while self.evaluate_boolean(env, condition)? {
            self.evaluate_loop_step(env, body, continue_expression)?;
        }
        Ok(Value::void())
    }

    pub(super) fn evaluate_do_while(
        &mut self,
        env: EnvId,
        body: Option<&Syntax>,
        condition: &Syntax,
        continue_expression: Option<&Syntax>,
    ) -> EvalResult {
        loop {
            self.evaluate_loop_step(env, body, continue_expression)?;
            if !self.evaluate_boolean(env, condition)? {
                return Ok(Value::void());
            }
        }
    }

    fn evaluate_loop_step(
        &mut self,
        env: EnvId,
        body: Option<&Syntax>,
        continue_expression: Option<&Syntax>,
    ) -> Result<(), EvalError> {
        if let Some(body) = body {
            self.evaluate(env, body)?;
        }
        if let Some(continue_expression) = continue_expression {
            self.evaluate(env, continue_expression)?;
        }
        Ok(())
    }

    fn is_wildcard(&self, key: &Syntax) -> bool {
        matches!(key.kind, NodeKind::Identifier(name) if name == self.names.wildcard)
    }

    /// Integer switch: the first case whose key equals the scrutinee wins;
    /// otherwise the `_` case, otherwise void.
    pub(super) fn evaluate_switch(
        &mut self,
        env: EnvId,
        key: &Syntax,
        cases: &[SwitchCase],
    ) -> EvalResult {
        let scrutinee = self.evaluate_integer(env, key)?;

        let mut default = None;
        for case in cases {
            if self.is_wildcard(&case.key) {
                default.get_or_insert(&case.value);
                continue;
            }
            if self.evaluate_integer(env, &case.key)? == scrutinee {
                return self.evaluate(env, &case.value);
            }
        }

        match default {
            Some(value) => self.evaluate(env, value),
            None => Ok(Value::void()),
        }
    }

    fn evaluate_integer(&mut self, env: EnvId, node: &Syntax) -> Result<i128, EvalError> {
        let value = self.evaluate_decayed(env, node)?;
        value.as_integer().ok_or_else(|| {
            type_mismatch("Integer", self.value_type_name(&value)).with_span(node.span)
        })
    }

    /// Sum-type switch: a `:(Alternative)name` case matches when the
    /// scrutinee's active alternative is `Alternative` within the declared
    /// sum type; its payload is bound to `name` in a fresh lexical scope.
    pub(super) fn evaluate_switch_pattern(
        &mut self,
        env: EnvId,
        value: &Syntax,
        value_type: &Syntax,
        cases: &[SwitchCase],
    ) -> EvalResult {
        let scrutinee = self.evaluate_decayed(env, value)?;
        let declared = self.evaluate_type_expression(env, value_type)?;
        if !matches!(self.types.get(declared).kind, TypeKind::Sum { .. }) {
            return Err(type_mismatch("sum type", self.type_name(declared)).with_span(value_type.span));
        }

        let (active, payload) = match scrutinee.payload {
            Payload::Aggregate(id) if scrutinee.ty == declared => match self.heap.aggregate(id) {
                Aggregate::Sum {
                    alternative,
                    payload,
                } => (*alternative, payload.clone()),
                _ => return Err(self.scrutinee_mismatch(declared, &scrutinee, value)),
            },
            _ => return Err(self.scrutinee_mismatch(declared, &scrutinee, value)),
        };

        let mut default = None;
        for case in cases {
            if self.is_wildcard(&case.key) {
                default.get_or_insert(&case.value);
                continue;
            }
            let NodeKind::BindableName {
                type_expression: Some(pattern_type),
                name,
                ..
            } = &case.key.kind
            else {
                return Err(invalid_binding(
                    case.key.kind.name(),
                    "a pattern case key must be a typed bindable name",
                )
                .with_span(case.key.span));
            };

            let alternative = self.evaluate_type_expression(env, pattern_type)?;
            if self.types.get(declared).alternative_index(alternative) != Some(active) {
                continue;
            }

            let scope = self.environments.create(EnvironmentKind::Lexical, env);
            if let Some(name) = name {
                let name = self.evaluate_symbol(env, name)?;
                self.bind(scope, name, Binding::Value(payload))?;
            }
            return self.evaluate(scope, &case.value);
        }

        match default {
            Some(value) => self.evaluate(env, value),
            None => Ok(Value::void()),
        }
    }

    fn scrutinee_mismatch(
        &self,
        declared: TypeId,
        scrutinee: &Value,
        node: &Syntax,
    ) -> EvalError {
        type_mismatch(self.type_name(declared), self.value_type_name(scrutinee)).with_span(node.span)
    }

    pub(super) fn evaluate_assert(
        &mut self,
        env: EnvId,
        condition: &Syntax,
        message: Option<&Syntax>,
    ) -> EvalResult {
        let holds = self.evaluate_decayed(env, condition)?.as_boolean() == Some(true);
        if holds {
            return Ok(Value::void());
        }
        let message = match message {
            Some(message) => {
                let message = self.evaluate_decayed(env, message)?;
                Some(self.display_string(&message))
            }
            None => None,
        };
        Err(assertion_failure(message))
    }
}
