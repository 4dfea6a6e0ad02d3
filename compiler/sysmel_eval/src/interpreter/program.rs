//! Top-level statement evaluation.

use sysmel_ir::Syntax;

use super::Interpreter;
use crate::{EnvId, ErrorPolicy, ProgramOutcome};

impl Interpreter<'_> {
    /// Evaluate `statements` as the body of a fresh module.
    ///
    /// The module gets the configured module name and a top-level lexical
    /// environment; errors are handled per the configured [`ErrorPolicy`].
    pub fn evaluate_program(&mut self, statements: &[Syntax]) -> ProgramOutcome {
        let module = self.create_module(self.module_name);
        match self.create_top_level_environment(module) {
            Ok(env) => self.evaluate_statements(env, statements),
            Err(error) => ProgramOutcome {
                value: None,
                errors: vec![error],
            },
        }
    }

    /// Evaluate top-level statements one after another in `env`.
    pub fn evaluate_statements(&mut self, env: EnvId, statements: &[Syntax]) -> ProgramOutcome {
        let mut outcome = ProgramOutcome::default();
        for (index, statement) in statements.iter().enumerate() {
            match self.evaluate(env, statement) {
                Ok(value) => outcome.value = Some(value),
                Err(error) => match self.error_policy {
                    ErrorPolicy::AbortProgram => {
                        tracing::debug!(statement = index, %error, "program aborted");
                        outcome.value = None;
                        outcome.errors.push(error);
                        break;
                    }
                    ErrorPolicy::AbortStatement => {
                        tracing::warn!(statement = index, %error, "statement skipped");
                        outcome.errors.push(error);
                    }
                },
            }
        }
        outcome
    }
}
