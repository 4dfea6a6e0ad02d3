//! Aggregate literals and type instantiation.

use sysmel_ir::Syntax;

use super::Interpreter;
use crate::errors::{arity_mismatch, stale_handle, type_mismatch, unsupported_application};
use crate::primitives::numeric;
use crate::{
    Aggregate, BasicKind, EnvId, EvalError, EvalResult, Payload, TypeId, TypeKind, Value,
};

impl Interpreter<'_> {
    /// Evaluate elements left to right, unboxing each.
    fn evaluate_elements(&mut self, env: EnvId, elements: &[Syntax]) -> Result<Vec<Value>, EvalError> {
        elements
            .iter()
            .map(|element| self.evaluate_decayed(env, element))
            .collect()
    }

    pub(crate) fn alloc_aggregate(&mut self, ty: TypeId, aggregate: Aggregate) -> Value {
        Value::aggregate(ty, self.heap.alloc_aggregate(aggregate))
    }

    pub(super) fn evaluate_tuple(&mut self, env: EnvId, elements: &[Syntax]) -> EvalResult {
        let values = self.evaluate_elements(env, elements)?;
        Ok(self.alloc_aggregate(TypeId::TUPLE, Aggregate::Tuple(values)))
    }

    pub(super) fn evaluate_array(&mut self, env: EnvId, elements: &[Syntax]) -> EvalResult {
        let values = self.evaluate_elements(env, elements)?;
        Ok(self.alloc_aggregate(TypeId::ARRAY, Aggregate::Array(values)))
    }

    /// Every element must be an integer or a character; only the low 8
    /// bits of its value are kept.
    pub(super) fn evaluate_byte_array(&mut self, env: EnvId, elements: &[Syntax]) -> EvalResult {
        let mut bytes = Vec::with_capacity(elements.len());
        for element in elements {
            let value = self.evaluate_decayed(env, element)?;
            let integer = match value.payload {
                Payload::Character(character) => i128::from(u32::from(character)),
                _ => value.as_integer().ok_or_else(|| {
                    type_mismatch("Integer or Character", self.value_type_name(&value))
                        .with_span(element.span)
                })?,
            };
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "masked to the low 8 bits"
            )]
            let byte = (integer & 0xFF) as u8;
            bytes.push(byte);
        }
        Ok(self.alloc_aggregate(TypeId::BYTE_ARRAY, Aggregate::ByteArray(bytes)))
    }

    pub(super) fn evaluate_association(
        &mut self,
        env: EnvId,
        key: &Syntax,
        value: Option<&Syntax>,
    ) -> EvalResult {
        let key = self.evaluate_decayed(env, key)?;
        let value = match value {
            Some(value) => Some(self.evaluate_decayed(env, value)?),
            None => None,
        };
        Ok(self.alloc_aggregate(TypeId::ASSOCIATION, Aggregate::Association { key, value }))
    }

    /// An ordered list of associations; no hashing, no deduplication.
    pub(super) fn evaluate_dictionary(&mut self, env: EnvId, elements: &[Syntax]) -> EvalResult {
        let mut associations = Vec::with_capacity(elements.len());
        for element in elements {
            let value = self.evaluate_decayed(env, element)?;
            if value.ty != TypeId::ASSOCIATION {
                return Err(type_mismatch("Association", self.value_type_name(&value))
                    .with_span(element.span));
            }
            associations.push(value);
        }
        Ok(self.alloc_aggregate(TypeId::DICTIONARY, Aggregate::Dictionary(associations)))
    }

    /// Apply a type to evaluated arguments.
    ///
    /// - record: up to one argument per field, missing fields are void
    /// - sum: one argument; its type selects the alternative: an exact
    ///   match, else the first alternative it is a subtype of, else the
    ///   first gradual alternative
    /// - enum: the constant whose payload equals the argument
    /// - built-in scalars convert their single argument; `Array` and
    ///   `Tuple` pack their arguments
    pub fn instantiate(&mut self, ty: TypeId, arguments: &[Value]) -> EvalResult {
        if !self.types.contains(ty) {
            return Err(stale_handle("type"));
        }
        let type_name = self.type_name(ty);
        match &self.types.get(ty).kind {
            TypeKind::Record { fields } => {
                let field_count = fields.len();
                if arguments.len() > field_count {
                    return Err(arity_mismatch(type_name, field_count, arguments.len()));
                }
                let mut values = arguments.to_vec();
                values.resize(field_count, Value::void());
                Ok(self.alloc_aggregate(ty, Aggregate::Record(values)))
            }
            TypeKind::Sum {
                alternatives,
                positions,
            } => {
                let [argument] = arguments else {
                    return Err(arity_mismatch(type_name, 1, arguments.len()));
                };
                let Some(alternative) = positions
                    .lookup(&argument.ty)
                    .copied()
                    .or_else(|| {
                        alternatives
                            .iter()
                            .position(|alternative| {
                                *alternative != TypeId::ANY
                                    && self.types.is_subtype(argument.ty, *alternative)
                            })
                            .and_then(|index| u32::try_from(index).ok())
                    })
                    .or_else(|| positions.lookup(&TypeId::ANY).copied())
                else {
                    return Err(type_mismatch(
                        &format!("an alternative of {type_name}"),
                        self.value_type_name(argument),
                    ));
                };
                let payload = argument.clone();
                Ok(self.alloc_aggregate(
                    ty,
                    Aggregate::Sum {
                        alternative,
                        payload,
                    },
                ))
            }
            TypeKind::Enum { values, .. } => {
                let [argument] = arguments else {
                    return Err(arity_mismatch(type_name, 1, arguments.len()));
                };
                values
                    .iter()
                    .find(|(_, constant)| constant.payload == argument.payload)
                    .map(|(_, constant)| constant.clone())
                    .ok_or_else(|| {
                        type_mismatch(
                            &format!("a constant of {type_name}"),
                            &self.print_string(argument),
                        )
                    })
            }
            TypeKind::Basic(kind) => {
                let kind = *kind;
                self.instantiate_basic(kind, ty, arguments)
            }
        }
    }

    fn instantiate_basic(&mut self, kind: BasicKind, ty: TypeId, arguments: &[Value]) -> EvalResult {
        match kind {
            BasicKind::Array => Ok(self.alloc_aggregate(ty, Aggregate::Array(arguments.to_vec()))),
            BasicKind::Tuple => Ok(self.alloc_aggregate(ty, Aggregate::Tuple(arguments.to_vec()))),
            BasicKind::String => {
                let [argument] = arguments else {
                    return Err(arity_mismatch(kind.name(), 1, arguments.len()));
                };
                Ok(Value::string(self.display_string(argument)))
            }
            BasicKind::Symbol => {
                let [argument] = arguments else {
                    return Err(arity_mismatch(kind.name(), 1, arguments.len()));
                };
                Ok(Value::symbol(self.interner.intern(&self.display_string(argument))))
            }
            _ if numeric::is_numeric(kind) || kind == BasicKind::Character => {
                let [argument] = arguments else {
                    return Err(arity_mismatch(kind.name(), 1, arguments.len()));
                };
                numeric::convert(kind, argument)
                    .ok_or_else(|| type_mismatch(kind.name(), self.value_type_name(argument)))
            }
            _ => Err(unsupported_application(kind.name())),
        }
    }
}
