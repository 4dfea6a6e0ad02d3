//! Runtime type catalog.
//!
//! Built-in types are created lazily, once, in the fixed order of
//! [`BasicKind::ALL`], so they always occupy the first [`BASIC_COUNT`]
//! slots and can be named by the associated constants on [`TypeId`].
//! Records, sums and enums are appended after them as programs declare
//! them. Types are never mutated once created, except for their method
//! tables. Type equality is handle equality.

use sysmel_ir::{Arena, HashTable, IdentityDictionary, Interner, Symbol};

use crate::{FunctionId, Payload, Value};

sysmel_ir::define_index! {
    /// Handle of a type in the [`TypeRegistry`].
    pub struct TypeId;
}

impl TypeId {
    pub const NIL: TypeId = TypeId(0);
    /// The gradual "any" type, root of the hierarchy.
    pub const ANY: TypeId = TypeId(1);
    pub const VOID: TypeId = TypeId(2);
    pub const BOOLEAN: TypeId = TypeId(3);
    pub const CHARACTER: TypeId = TypeId(4);
    pub const STRING: TypeId = TypeId(5);
    pub const SYMBOL: TypeId = TypeId(6);
    pub const INTEGER: TypeId = TypeId(7);
    pub const FLOAT: TypeId = TypeId(8);
    pub const INT8: TypeId = TypeId(9);
    pub const INT16: TypeId = TypeId(10);
    pub const INT32: TypeId = TypeId(11);
    pub const INT64: TypeId = TypeId(12);
    pub const UINT8: TypeId = TypeId(13);
    pub const UINT16: TypeId = TypeId(14);
    pub const UINT32: TypeId = TypeId(15);
    pub const UINT64: TypeId = TypeId(16);
    pub const FLOAT32: TypeId = TypeId(17);
    pub const FLOAT64: TypeId = TypeId(18);
    pub const TYPE: TypeId = TypeId(19);
    pub const FUNCTION: TypeId = TypeId(20);
    pub const SYNTAX: TypeId = TypeId(21);
    pub const BOX: TypeId = TypeId(22);
    pub const NAMESPACE: TypeId = TypeId(23);
    pub const ARRAY: TypeId = TypeId(24);
    pub const BYTE_ARRAY: TypeId = TypeId(25);
    pub const TUPLE: TypeId = TypeId(26);
    pub const ASSOCIATION: TypeId = TypeId(27);
    pub const DICTIONARY: TypeId = TypeId(28);

    /// Whether this is one of the built-in types.
    #[inline]
    pub const fn is_basic(self) -> bool {
        (self.0 as usize) < BASIC_COUNT
    }
}

/// Number of built-in types.
pub const BASIC_COUNT: usize = 29;

/// The built-in types, in registry order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BasicKind {
    Nil,
    Any,
    Void,
    Boolean,
    Character,
    String,
    Symbol,
    Integer,
    Float,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Type,
    Function,
    Syntax,
    Box,
    Namespace,
    Array,
    ByteArray,
    Tuple,
    Association,
    Dictionary,
}

impl BasicKind {
    pub const ALL: [BasicKind; BASIC_COUNT] = [
        BasicKind::Nil,
        BasicKind::Any,
        BasicKind::Void,
        BasicKind::Boolean,
        BasicKind::Character,
        BasicKind::String,
        BasicKind::Symbol,
        BasicKind::Integer,
        BasicKind::Float,
        BasicKind::Int8,
        BasicKind::Int16,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::UInt8,
        BasicKind::UInt16,
        BasicKind::UInt32,
        BasicKind::UInt64,
        BasicKind::Float32,
        BasicKind::Float64,
        BasicKind::Type,
        BasicKind::Function,
        BasicKind::Syntax,
        BasicKind::Box,
        BasicKind::Namespace,
        BasicKind::Array,
        BasicKind::ByteArray,
        BasicKind::Tuple,
        BasicKind::Association,
        BasicKind::Dictionary,
    ];

    /// Name the type is bound to in the intrinsic environment.
    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Nil => "Nil",
            BasicKind::Any => "Any",
            BasicKind::Void => "Void",
            BasicKind::Boolean => "Boolean",
            BasicKind::Character => "Character",
            BasicKind::String => "String",
            BasicKind::Symbol => "Symbol",
            BasicKind::Integer => "Integer",
            BasicKind::Float => "Float",
            BasicKind::Int8 => "Int8",
            BasicKind::Int16 => "Int16",
            BasicKind::Int32 => "Int32",
            BasicKind::Int64 => "Int64",
            BasicKind::UInt8 => "UInt8",
            BasicKind::UInt16 => "UInt16",
            BasicKind::UInt32 => "UInt32",
            BasicKind::UInt64 => "UInt64",
            BasicKind::Float32 => "Float32",
            BasicKind::Float64 => "Float64",
            BasicKind::Type => "Type",
            BasicKind::Function => "Function",
            BasicKind::Syntax => "Syntax",
            BasicKind::Box => "Box",
            BasicKind::Namespace => "Namespace",
            BasicKind::Array => "Array",
            BasicKind::ByteArray => "ByteArray",
            BasicKind::Tuple => "Tuple",
            BasicKind::Association => "Association",
            BasicKind::Dictionary => "Dictionary",
        }
    }

    /// Value size and alignment in bytes.
    pub fn layout(self) -> (u32, u32) {
        match self {
            BasicKind::Nil | BasicKind::Void => (0, 1),
            BasicKind::Any => (16, 8),
            BasicKind::Boolean | BasicKind::Int8 | BasicKind::UInt8 => (1, 1),
            BasicKind::Int16 | BasicKind::UInt16 => (2, 2),
            BasicKind::Character | BasicKind::Int32 | BasicKind::UInt32 | BasicKind::Float32 => {
                (4, 4)
            }
            BasicKind::String => (16, 8),
            _ => (8, 8),
        }
    }

    /// Direct supertype in the built-in hierarchy.
    ///
    /// Fixed-width numbers specialize `Integer`/`Float`. `Any` is the root.
    /// `Box` stands outside the hierarchy so that messages it does not
    /// understand reach its contents.
    pub fn supertype(self) -> Option<TypeId> {
        match self {
            BasicKind::Any | BasicKind::Box => None,
            BasicKind::Int8
            | BasicKind::Int16
            | BasicKind::Int32
            | BasicKind::Int64
            | BasicKind::UInt8
            | BasicKind::UInt16
            | BasicKind::UInt32
            | BasicKind::UInt64 => Some(TypeId::INTEGER),
            BasicKind::Float32 | BasicKind::Float64 => Some(TypeId::FLOAT),
            _ => Some(TypeId::ANY),
        }
    }

    #[inline]
    pub fn id(self) -> TypeId {
        TypeId(self as u32)
    }
}

/// Named field of a record type.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: Symbol,
    pub ty: TypeId,
}

/// What a type describes.
#[derive(Clone, Debug)]
pub enum TypeKind {
    Basic(BasicKind),
    /// Ordered named fields.
    Record { fields: Vec<Field> },
    /// Ordered alternative types, with the reverse position index.
    Sum {
        alternatives: Vec<TypeId>,
        positions: IdentityDictionary<TypeId, u32>,
    },
    /// Ordered named constants over a base type.
    Enum {
        base: TypeId,
        values: Vec<(Symbol, Value)>,
    },
}

/// A type descriptor.
#[derive(Debug)]
pub struct Type {
    pub name: Option<Symbol>,
    pub kind: TypeKind,
    pub size: u32,
    pub alignment: u32,
    pub supertype: Option<TypeId>,
    methods: HashTable<FunctionId>,
}

impl Type {
    fn new(name: Option<Symbol>, kind: TypeKind, layout: (u32, u32)) -> Self {
        Type {
            name,
            kind,
            size: layout.0,
            alignment: layout.1,
            supertype: Some(TypeId::ANY),
            methods: HashTable::new(),
        }
    }

    /// Methods defined directly on this type.
    pub fn methods(&self) -> &HashTable<FunctionId> {
        &self.methods
    }

    /// Position of `alternative` within a sum type.
    pub fn alternative_index(&self, alternative: TypeId) -> Option<u32> {
        match &self.kind {
            TypeKind::Sum { positions, .. } => positions.lookup(&alternative).copied(),
            _ => None,
        }
    }
}

/// Proof that the built-in types exist, with access to their handles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BasicTypes {
    ids: [TypeId; BASIC_COUNT],
}

impl BasicTypes {
    #[inline]
    pub fn get(&self, kind: BasicKind) -> TypeId {
        self.ids[kind as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (BasicKind, TypeId)> + '_ {
        BasicKind::ALL.iter().copied().zip(self.ids.iter().copied())
    }
}

/// Append-only catalog of types.
#[derive(Default)]
pub struct TypeRegistry {
    types: Arena<TypeId, Type>,
    basic: Option<BasicTypes>,
}

impl TypeRegistry {
    /// Empty registry. Built-in types appear on the first request.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in types, created on first call.
    pub fn basic_types(&mut self, interner: &Interner) -> BasicTypes {
        if let Some(basic) = self.basic {
            return basic;
        }

        debug_assert!(self.types.is_empty());
        let mut ids = [TypeId::NIL; BASIC_COUNT];
        for (slot, kind) in ids.iter_mut().zip(BasicKind::ALL) {
            let mut ty = Type::new(
                Some(interner.intern(kind.name())),
                TypeKind::Basic(kind),
                kind.layout(),
            );
            ty.supertype = kind.supertype();
            *slot = self.types.alloc(ty);
            debug_assert_eq!(*slot, kind.id());
        }

        tracing::debug!(count = BASIC_COUNT, "created basic types");
        let basic = BasicTypes { ids };
        self.basic = Some(basic);
        basic
    }

    /// Whether the built-in types have been created.
    pub fn is_initialized(&self) -> bool {
        self.basic.is_some()
    }

    #[inline]
    pub fn get(&self, id: TypeId) -> &Type {
        self.types.get(id)
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.types.contains(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Display name of a type.
    pub fn name(&self, id: TypeId, interner: &Interner) -> &'static str {
        match self.get(id).name {
            Some(name) => interner.lookup(name),
            None => "<anonymous>",
        }
    }

    /// Whether `ty` is `ancestor` or inherits from it.
    pub fn is_subtype(&self, ty: TypeId, ancestor: TypeId) -> bool {
        let mut current = Some(ty);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).supertype;
        }
        false
    }

    /// Find a method on `ty` or any of its supertypes.
    pub fn lookup_method(&self, ty: TypeId, selector: Symbol) -> Option<FunctionId> {
        let mut current = Some(ty);
        while let Some(id) = current {
            let ty = self.get(id);
            if let Some(method) = ty.methods.lookup(selector) {
                return Some(*method);
            }
            current = ty.supertype;
        }
        None
    }

    /// Install or replace a method.
    pub fn add_method(&mut self, ty: TypeId, selector: Symbol, method: FunctionId) {
        self.types.get_mut(ty).methods.insert(selector, method);
    }

    pub fn define_record(
        &mut self,
        interner: &Interner,
        name: Option<Symbol>,
        fields: Vec<Field>,
    ) -> TypeId {
        self.basic_types(interner);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "field counts are tiny compared to u32::MAX"
        )]
        let size = fields.len() as u32 * 16;
        let id = self
            .types
            .alloc(Type::new(name, TypeKind::Record { fields }, (size, 8)));
        tracing::debug!(?id, "defined record type");
        id
    }

    pub fn define_sum(
        &mut self,
        interner: &Interner,
        name: Option<Symbol>,
        alternatives: Vec<TypeId>,
    ) -> TypeId {
        self.basic_types(interner);
        let mut positions = IdentityDictionary::new();
        for (index, alternative) in alternatives.iter().enumerate() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "alternative counts are tiny compared to u32::MAX"
            )]
            let index = index as u32;
            // The first occurrence of a repeated alternative wins.
            if !positions.contains(alternative) {
                positions.insert(*alternative, index);
            }
        }
        let id = self.types.alloc(Type::new(
            name,
            TypeKind::Sum {
                alternatives,
                positions,
            },
            (24, 8),
        ));
        tracing::debug!(?id, "defined sum type");
        id
    }

    /// Define an enum; each constant is a value of the new type carrying the
    /// given base payload.
    pub fn define_enum(
        &mut self,
        interner: &Interner,
        name: Option<Symbol>,
        base: TypeId,
        constants: Vec<(Symbol, Payload)>,
    ) -> TypeId {
        self.basic_types(interner);
        let id = self.types.next_id();
        let values = constants
            .into_iter()
            .map(|(constant, payload)| (constant, Value { ty: id, payload }))
            .collect();
        let layout = (self.get(base).size, self.get(base).alignment);
        let allocated = self
            .types
            .alloc(Type::new(name, TypeKind::Enum { base, values }, layout));
        debug_assert_eq!(allocated, id);
        tracing::debug!(?id, "defined enum type");
        id
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Type)> {
        self.types.iter()
    }
}

#[cfg(test)]
mod tests;
