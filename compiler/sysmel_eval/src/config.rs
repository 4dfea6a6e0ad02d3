//! Evaluation policy.

use crate::{EvalError, Value};

/// What an evaluation error aborts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Batch mode: the first error stops the whole program.
    #[default]
    AbortProgram,
    /// Interactive mode: the failing top-level statement is skipped and
    /// evaluation continues with the next one.
    AbortStatement,
}

/// Result of evaluating a sequence of top-level statements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgramOutcome {
    /// Value of the last statement that completed, if any.
    ///
    /// Always `None` when the program was aborted.
    pub value: Option<Value>,
    /// Errors in the order they were raised.
    pub errors: Vec<EvalError>,
}

impl ProgramOutcome {
    /// Whether every statement completed.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// The final value, or the first error.
    pub fn into_result(self) -> Result<Option<Value>, EvalError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.value),
        }
    }
}
