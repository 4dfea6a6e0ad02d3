//! Quasiquotation.
//!
//! `quasiquote` copies a template, replacing `unquote` nodes with the syntax
//! of their value and `splice` nodes inside element lists with the
//! elements of their value. Subtrees without either are shared with the
//! template rather than copied. Nested quotes are left untouched.

use sysmel_ir::{NodeKind, SwitchCase, Syntax, SyntaxNode};

use super::Interpreter;
use crate::errors::{type_mismatch, unsupported_node};
use crate::{Aggregate, EnvId, EvalError, Payload, Value};

type Expansion = Result<Option<Syntax>, EvalError>;

impl Interpreter<'_> {
    pub(super) fn quasiquote(&mut self, env: EnvId, template: &Syntax) -> Result<Syntax, EvalError> {
        Ok(self.expand(env, template)?.unwrap_or_else(|| template.clone()))
    }

    /// Expanded copy of `node`, or `None` when nothing inside it changes.
    fn expand(&mut self, env: EnvId, node: &Syntax) -> Expansion {
        let mut changed = false;
        let kind = match &node.kind {
            NodeKind::Unquote(expression) => {
                let value = self.evaluate_decayed(env, expression)?;
                return self
                    .value_to_syntax(&value, node)
                    .map(Some)
                    .map_err(|error| error.or_span(node.span));
            }
            NodeKind::Splice(_) => {
                return Err(unsupported_node("splice outside of an element list").with_span(node.span));
            }

            NodeKind::Error { .. }
            | NodeKind::LiteralInteger(_)
            | NodeKind::LiteralFloat(_)
            | NodeKind::LiteralCharacter(_)
            | NodeKind::LiteralString(_)
            | NodeKind::LiteralSymbol(_)
            | NodeKind::Identifier(_)
            | NodeKind::Quote(_)
            | NodeKind::Quasiquote(_) => return Ok(None),

            NodeKind::Application {
                function,
                arguments,
            } => NodeKind::Application {
                function: self.expand_child(env, function, &mut changed)?,
                arguments: self.expand_list(env, arguments, &mut changed)?,
            },
            NodeKind::MessageSend {
                receiver,
                selector,
                arguments,
            } => NodeKind::MessageSend {
                receiver: self.expand_child(env, receiver, &mut changed)?,
                selector: self.expand_child(env, selector, &mut changed)?,
                arguments: self.expand_list(env, arguments, &mut changed)?,
            },
            NodeKind::MessageCascade { receiver, messages } => NodeKind::MessageCascade {
                receiver: self.expand_child(env, receiver, &mut changed)?,
                messages: self.expand_list(env, messages, &mut changed)?,
            },
            NodeKind::CascadeMessage {
                selector,
                arguments,
            } => NodeKind::CascadeMessage {
                selector: self.expand_child(env, selector, &mut changed)?,
                arguments: self.expand_list(env, arguments, &mut changed)?,
            },
            NodeKind::BinaryOperatorSequence(elements) => {
                NodeKind::BinaryOperatorSequence(self.expand_list(env, elements, &mut changed)?)
            }
            NodeKind::Sequence(elements) => {
                NodeKind::Sequence(self.expand_list(env, elements, &mut changed)?)
            }
            NodeKind::Tuple(elements) => NodeKind::Tuple(self.expand_list(env, elements, &mut changed)?),
            NodeKind::Array(elements) => NodeKind::Array(self.expand_list(env, elements, &mut changed)?),
            NodeKind::ByteArray(elements) => {
                NodeKind::ByteArray(self.expand_list(env, elements, &mut changed)?)
            }
            NodeKind::Dictionary(elements) => {
                NodeKind::Dictionary(self.expand_list(env, elements, &mut changed)?)
            }
            NodeKind::Association { key, value } => NodeKind::Association {
                key: self.expand_child(env, key, &mut changed)?,
                value: self.expand_optional(env, value.as_ref(), &mut changed)?,
            },

            NodeKind::BlockClosure {
                function_type,
                body,
            } => NodeKind::BlockClosure {
                function_type: self.expand_optional(env, function_type.as_ref(), &mut changed)?,
                body: self.expand_child(env, body, &mut changed)?,
            },
            NodeKind::LexicalBlock { body } => NodeKind::LexicalBlock {
                body: self.expand_child(env, body, &mut changed)?,
            },

            NodeKind::FunctionalDependentType {
                arguments,
                result_type,
            } => NodeKind::FunctionalDependentType {
                arguments: self.expand_list(env, arguments, &mut changed)?,
                result_type: self.expand_optional(env, result_type.as_ref(), &mut changed)?,
            },
            NodeKind::BindableName {
                type_expression,
                name,
                is_mutable,
            } => NodeKind::BindableName {
                type_expression: self.expand_optional(env, type_expression.as_ref(), &mut changed)?,
                name: self.expand_optional(env, name.as_ref(), &mut changed)?,
                is_mutable: *is_mutable,
            },
            NodeKind::Assignment { store, value } => NodeKind::Assignment {
                store: self.expand_child(env, store, &mut changed)?,
                value: self.expand_child(env, value, &mut changed)?,
            },

            NodeKind::If {
                condition,
                true_branch,
                false_branch,
            } => NodeKind::If {
                condition: self.expand_child(env, condition, &mut changed)?,
                true_branch: self.expand_optional(env, true_branch.as_ref(), &mut changed)?,
                false_branch: self.expand_optional(env, false_branch.as_ref(), &mut changed)?,
            },
            NodeKind::While {
                condition,
                body,
                continue_expression,
            } => NodeKind::While {
                condition: self.expand_child(env, condition, &mut changed)?,
                body: self.expand_optional(env, body.as_ref(), &mut changed)?,
                continue_expression: self.expand_optional(
                    env,
                    continue_expression.as_ref(),
                    &mut changed,
                )?,
            },
            NodeKind::DoWhile {
                body,
                condition,
                continue_expression,
            } => NodeKind::DoWhile {
                body: self.expand_optional(env, body.as_ref(), &mut changed)?,
                condition: self.expand_child(env, condition, &mut changed)?,
                continue_expression: self.expand_optional(
                    env,
                    continue_expression.as_ref(),
                    &mut changed,
                )?,
            },
            NodeKind::Switch { key, cases } => NodeKind::Switch {
                key: self.expand_child(env, key, &mut changed)?,
                cases: self.expand_cases(env, cases, &mut changed)?,
            },
            NodeKind::SwitchPattern {
                value,
                value_type,
                cases,
            } => NodeKind::SwitchPattern {
                value: self.expand_child(env, value, &mut changed)?,
                value_type: self.expand_child(env, value_type, &mut changed)?,
                cases: self.expand_cases(env, cases, &mut changed)?,
            },

            NodeKind::NamespaceDefinition { name, body } => NodeKind::NamespaceDefinition {
                name: self.expand_child(env, name, &mut changed)?,
                body: self.expand_optional(env, body.as_ref(), &mut changed)?,
            },
            NodeKind::Assert { condition, message } => NodeKind::Assert {
                condition: self.expand_child(env, condition, &mut changed)?,
                message: self.expand_optional(env, message.as_ref(), &mut changed)?,
            },
        };

        Ok(changed.then(|| SyntaxNode::new(kind, node.span)))
    }

    fn expand_child(&mut self, env: EnvId, node: &Syntax, changed: &mut bool) -> Result<Syntax, EvalError> {
        match self.expand(env, node)? {
            Some(expanded) => {
                *changed = true;
                Ok(expanded)
            }
            None => Ok(node.clone()),
        }
    }

    fn expand_optional(
        &mut self,
        env: EnvId,
        node: Option<&Syntax>,
        changed: &mut bool,
    ) -> Result<Option<Syntax>, EvalError> {
        node.map(|node| self.expand_child(env, node, changed)).transpose()
    }

    /// Expand an element list; a `splice` contributes every element of its
    /// value.
    fn expand_list(
        &mut self,
        env: EnvId,
        elements: &[Syntax],
        changed: &mut bool,
    ) -> Result<Vec<Syntax>, EvalError> {
        let mut expanded = Vec::with_capacity(elements.len());
        for element in elements {
            if let NodeKind::Splice(expression) = &element.kind {
                *changed = true;
                let value = self.evaluate_decayed(env, expression)?;
                self.splice_into(&value, element, &mut expanded)
                    .map_err(|error| error.or_span(element.span))?;
            } else {
                expanded.push(self.expand_child(env, element, changed)?);
            }
        }
        Ok(expanded)
    }

    fn expand_cases(
        &mut self,
        env: EnvId,
        cases: &[SwitchCase],
        changed: &mut bool,
    ) -> Result<Vec<SwitchCase>, EvalError> {
        cases
            .iter()
            .map(|case| {
                Ok(SwitchCase {
                    key: self.expand_child(env, &case.key, changed)?,
                    value: self.expand_child(env, &case.value, changed)?,
                })
            })
            .collect()
    }

    /// Append the elements a spliced value stands for: the children of a
    /// sequence, array or tuple node, or the elements of a runtime array or
    /// tuple.
    fn splice_into(&self, value: &Value, site: &Syntax, out: &mut Vec<Syntax>) -> Result<(), EvalError> {
        match &value.payload {
            Payload::Syntax(node) => match &node.kind {
                NodeKind::Sequence(elements) | NodeKind::Array(elements) | NodeKind::Tuple(elements) => {
                    out.extend(elements.iter().cloned());
                    Ok(())
                }
                _ => Err(type_mismatch("a syntax sequence", node.kind.name())),
            },
            Payload::Aggregate(aggregate) => match self.heap.aggregate(*aggregate) {
                Aggregate::Array(elements) | Aggregate::Tuple(elements) => {
                    for element in elements {
                        out.push(self.value_to_syntax(element, site)?);
                    }
                    Ok(())
                }
                _ => Err(type_mismatch("a syntax sequence", self.value_type_name(value))),
            },
            _ => Err(type_mismatch("a syntax sequence", self.value_type_name(value))),
        }
    }

    /// Syntax standing for `value`: syntax values as they are, scalars as
    /// literals, and the singletons as the identifiers they are bound to.
    fn value_to_syntax(&self, value: &Value, site: &Syntax) -> Result<Syntax, EvalError> {
        let kind = match &value.payload {
            Payload::Syntax(node) => return Ok(node.clone()),
            Payload::Integer(integer) => NodeKind::LiteralInteger(*integer),
            Payload::Unsigned(unsigned) => match i64::try_from(*unsigned) {
                Ok(integer) => NodeKind::LiteralInteger(integer),
                Err(_) => return Err(type_mismatch("Int64", self.value_type_name(value))),
            },
            Payload::Float(float) => NodeKind::LiteralFloat(*float),
            Payload::Character(character) => NodeKind::LiteralCharacter(*character),
            Payload::String(string) => NodeKind::LiteralString(string.clone()),
            Payload::Symbol(symbol) => NodeKind::LiteralSymbol(*symbol),
            Payload::Boolean(true) => NodeKind::Identifier(self.interner.intern("true")),
            Payload::Boolean(false) => NodeKind::Identifier(self.interner.intern("false")),
            Payload::Nil => NodeKind::Identifier(self.interner.intern("nil")),
            Payload::Void => NodeKind::Identifier(self.interner.intern("void")),
            _ => return Err(type_mismatch("syntax or a literal value", self.value_type_name(value))),
        };
        Ok(SyntaxNode::new(kind, site.span))
    }
}
