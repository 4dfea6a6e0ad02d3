//! Runtime values.
//!
//! A [`Value`] is an always-present type reference plus a [`Payload`]
//! carrying only what that kind of value needs. Aggregates, boxes,
//! functions and namespaces live in the [`Heap`](crate::Heap); a value
//! holds their handle, so cloning a value never copies the object.

use std::rc::Rc;

use sysmel_ir::{Symbol, Syntax};

use crate::{AggregateId, BoxId, FunctionId, NamespaceId, TypeId};

/// Payload of a runtime value.
#[derive(Clone, Debug)]
pub enum Payload {
    Void,
    Nil,
    Boolean(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Character(char),
    Symbol(Symbol),
    String(Rc<str>),
    Type(TypeId),
    Function(FunctionId),
    /// Quoted or macro-produced syntax.
    Syntax(Syntax),
    Box(BoxId),
    Namespace(NamespaceId),
    Aggregate(AggregateId),
}

impl Payload {
    /// Short name of the payload kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Payload::Void => "void",
            Payload::Nil => "nil",
            Payload::Boolean(_) => "boolean",
            Payload::Integer(_) | Payload::Unsigned(_) => "integer",
            Payload::Float(_) => "float",
            Payload::Character(_) => "character",
            Payload::Symbol(_) => "symbol",
            Payload::String(_) => "string",
            Payload::Type(_) => "type",
            Payload::Function(_) => "function",
            Payload::Syntax(_) => "syntax",
            Payload::Box(_) => "box",
            Payload::Namespace(_) => "namespace",
            Payload::Aggregate(_) => "aggregate",
        }
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Payload::Void, Payload::Void) | (Payload::Nil, Payload::Nil) => true,
            (Payload::Boolean(a), Payload::Boolean(b)) => a == b,
            (Payload::Integer(a), Payload::Integer(b)) => a == b,
            (Payload::Unsigned(a), Payload::Unsigned(b)) => a == b,
            (Payload::Float(a), Payload::Float(b)) => a == b,
            (Payload::Character(a), Payload::Character(b)) => a == b,
            (Payload::Symbol(a), Payload::Symbol(b)) => a == b,
            (Payload::String(a), Payload::String(b)) => a == b,
            (Payload::Type(a), Payload::Type(b)) => a == b,
            (Payload::Function(a), Payload::Function(b)) => a == b,
            (Payload::Syntax(a), Payload::Syntax(b)) => Rc::ptr_eq(a, b),
            (Payload::Box(a), Payload::Box(b)) => a == b,
            (Payload::Namespace(a), Payload::Namespace(b)) => a == b,
            (Payload::Aggregate(a), Payload::Aggregate(b)) => a == b,
            _ => false,
        }
    }
}

/// A runtime value.
///
/// Equality compares the type and the payload; heap objects compare by
/// handle and syntax by node identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    pub ty: TypeId,
    pub payload: Payload,
}

impl Value {
    #[inline]
    pub const fn new(ty: TypeId, payload: Payload) -> Self {
        Value { ty, payload }
    }

    pub const fn void() -> Self {
        Self::new(TypeId::VOID, Payload::Void)
    }

    pub const fn nil() -> Self {
        Self::new(TypeId::NIL, Payload::Nil)
    }

    pub const fn boolean(value: bool) -> Self {
        Self::new(TypeId::BOOLEAN, Payload::Boolean(value))
    }

    pub const fn integer(value: i64) -> Self {
        Self::new(TypeId::INTEGER, Payload::Integer(value))
    }

    pub const fn float(value: f64) -> Self {
        Self::new(TypeId::FLOAT, Payload::Float(value))
    }

    pub const fn character(value: char) -> Self {
        Self::new(TypeId::CHARACTER, Payload::Character(value))
    }

    pub const fn symbol(value: Symbol) -> Self {
        Self::new(TypeId::SYMBOL, Payload::Symbol(value))
    }

    pub fn string(value: impl Into<Rc<str>>) -> Self {
        Self::new(TypeId::STRING, Payload::String(value.into()))
    }

    /// A type used as a value.
    pub const fn type_ref(ty: TypeId) -> Self {
        Self::new(TypeId::TYPE, Payload::Type(ty))
    }

    pub const fn function(function: FunctionId) -> Self {
        Self::new(TypeId::FUNCTION, Payload::Function(function))
    }

    pub fn syntax(node: Syntax) -> Self {
        Self::new(TypeId::SYNTAX, Payload::Syntax(node))
    }

    pub const fn boxed(cell: BoxId) -> Self {
        Self::new(TypeId::BOX, Payload::Box(cell))
    }

    pub const fn namespace(namespace: NamespaceId) -> Self {
        Self::new(TypeId::NAMESPACE, Payload::Namespace(namespace))
    }

    pub const fn aggregate(ty: TypeId, aggregate: AggregateId) -> Self {
        Self::new(ty, Payload::Aggregate(aggregate))
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self.payload, Payload::Void)
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self.payload {
            Payload::Boolean(value) => Some(value),
            _ => None,
        }
    }

    /// Integer payload widened to `i128`, signed or unsigned alike.
    pub fn as_integer(&self) -> Option<i128> {
        match self.payload {
            Payload::Integer(value) => Some(i128::from(value)),
            Payload::Unsigned(value) => Some(i128::from(value)),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<Symbol> {
        match self.payload {
            Payload::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<TypeId> {
        match self.payload {
            Payload::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_syntax(&self) -> Option<&Syntax> {
        match &self.payload {
            Payload::Syntax(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_aggregate(&self) -> Option<AggregateId> {
        match self.payload {
            Payload::Aggregate(id) => Some(id),
            _ => None,
        }
    }
}
