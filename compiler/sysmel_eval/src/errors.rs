//! Evaluation errors.
//!
//! Every error is fatal to the evaluation unit that raised it: there is no
//! local recovery and no partial result. [`EvalErrorKind`] carries the
//! structured category; [`EvalError`] adds the source span and notes.
//!
//! Factory functions (e.g. `unbound_identifier(name)`) are the public way to
//! build errors. Spans are attached by the interpreter as errors leave the
//! node that raised them.

use std::fmt;

use sysmel_ir::Span;

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    /// Lookup reached the empty environment.
    #[error("unbound identifier `{name}`")]
    UnboundIdentifier { name: String },

    /// A condition, scrutinee, selector or operand has the wrong kind.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    /// Callee is neither a function nor a type.
    #[error("cannot apply a value of type {type_name}")]
    UnsupportedApplication { type_name: String },

    /// A message send exhausted method lookup and every fallback.
    #[error("{type_name} does not understand `{selector}`")]
    NoMatchingMethod { selector: String, type_name: String },

    /// A cascade element is not a cascaded message.
    #[error("malformed cascade: found a {found} where a cascaded message was expected")]
    MalformedCascade { found: String },

    /// An assertion evaluated to false or to a non-boolean.
    #[error("assertion failed{}", message_suffix(.message))]
    AssertionFailure { message: String },

    /// The evaluator has no rule for this node in this position.
    #[error("unsupported {node} node")]
    UnsupportedNode { node: String },

    /// Wrong number of arguments for a function or type instantiation.
    #[error("{name} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// A name cannot be bound or resolved the way it is used.
    #[error("invalid binding `{name}`: {reason}")]
    InvalidBinding { name: String, reason: String },

    /// A mutable box was read before anything was stored in it.
    #[error("read of an uninitialized mutable box")]
    UninitializedBox,

    #[error("integer division by zero")]
    DivisionByZero,

    #[error("index {index} out of bounds for size {size}")]
    IndexOutOfBounds { index: i64, size: usize },

    /// Parser-recovered syntax error reached evaluation.
    #[error("syntax error: {message}")]
    SyntaxError { message: String },

    /// A host passed a handle issued before the last runtime reset.
    #[error("stale {handle} handle from before the last runtime reset")]
    StaleHandle { handle: String },
}

fn message_suffix(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {message}")
    }
}

/// Additional context attached to an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalNote {
    pub message: String,
    pub span: Option<Span>,
}

impl EvalNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span: Some(span),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Innermost node the error was raised from.
    pub span: Option<Span>,
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            span: None,
            notes: Vec::new(),
        }
    }

    /// Set the source location, replacing any previous one.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Set the source location unless a more precise one is already known.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: EvalNote) -> Self {
        self.notes.push(note);
        self
    }

    /// Rendered `position: message` text.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{}: {}", span.start, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

// Factory functions

#[cold]
pub fn unbound_identifier(name: &str) -> EvalError {
    EvalErrorKind::UnboundIdentifier {
        name: name.to_owned(),
    }
    .into()
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalErrorKind::TypeMismatch {
        expected: expected.to_owned(),
        got: got.to_owned(),
    }
    .into()
}

#[cold]
pub fn unsupported_application(type_name: &str) -> EvalError {
    EvalErrorKind::UnsupportedApplication {
        type_name: type_name.to_owned(),
    }
    .into()
}

#[cold]
pub fn no_matching_method(selector: &str, type_name: &str) -> EvalError {
    EvalErrorKind::NoMatchingMethod {
        selector: selector.to_owned(),
        type_name: type_name.to_owned(),
    }
    .into()
}

#[cold]
pub fn malformed_cascade(found: &str) -> EvalError {
    EvalErrorKind::MalformedCascade {
        found: found.to_owned(),
    }
    .into()
}

#[cold]
pub fn assertion_failure(message: Option<String>) -> EvalError {
    EvalErrorKind::AssertionFailure {
        message: message.unwrap_or_default(),
    }
    .into()
}

#[cold]
pub fn unsupported_node(node: &str) -> EvalError {
    EvalErrorKind::UnsupportedNode {
        node: node.to_owned(),
    }
    .into()
}

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalErrorKind::ArityMismatch {
        name: name.to_owned(),
        expected,
        got,
    }
    .into()
}

#[cold]
pub fn invalid_binding(name: &str, reason: &str) -> EvalError {
    EvalErrorKind::InvalidBinding {
        name: name.to_owned(),
        reason: reason.to_owned(),
    }
    .into()
}

#[cold]
pub fn uninitialized_box() -> EvalError {
    EvalErrorKind::UninitializedBox.into()
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalErrorKind::DivisionByZero.into()
}

#[cold]
pub fn index_out_of_bounds(index: i64, size: usize) -> EvalError {
    EvalErrorKind::IndexOutOfBounds { index, size }.into()
}

#[cold]
pub fn syntax_error(message: &str) -> EvalError {
    EvalErrorKind::SyntaxError {
        message: message.to_owned(),
    }
    .into()
}

#[cold]
pub fn stale_handle(handle: &str) -> EvalError {
    EvalErrorKind::StaleHandle {
        handle: handle.to_owned(),
    }
    .into()
}

#[cfg(test)]
mod tests;
