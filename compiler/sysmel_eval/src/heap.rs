//! Grow-only storage for heap objects.
//!
//! Boxes, aggregates, functions, namespaces and modules are allocated here
//! and never freed individually. The whole heap goes away with the
//! interpreter that owns it.

use sysmel_ir::Arena;

use crate::{Function, FunctionId, Module, ModuleId, Namespace, NamespaceId, Value};

sysmel_ir::define_index! {
    /// Handle of a [`MutableBox`].
    pub struct BoxId;
}

sysmel_ir::define_index! {
    /// Handle of an [`Aggregate`].
    pub struct AggregateId;
}

/// Single-value mutable cell backing an assignable variable.
#[derive(Clone, Debug, Default)]
pub struct MutableBox {
    /// `None` until the first store.
    pub value: Option<Value>,
}

/// Heap-allocated compound value.
#[derive(Clone, Debug)]
pub enum Aggregate {
    Array(Vec<Value>),
    ByteArray(Vec<u8>),
    Tuple(Vec<Value>),
    /// Field values in declaration order.
    Record(Vec<Value>),
    Sum {
        alternative: u32,
        payload: Value,
    },
    Association {
        key: Value,
        value: Option<Value>,
    },
    /// Associations in literal order.
    Dictionary(Vec<Value>),
}

#[derive(Default)]
pub struct Heap {
    boxes: Arena<BoxId, MutableBox>,
    aggregates: Arena<AggregateId, Aggregate>,
    functions: Arena<FunctionId, Function>,
    namespaces: Arena<NamespaceId, Namespace>,
    modules: Arena<ModuleId, Module>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty heap whose handles never collide with this heap's.
    pub fn successor(&self) -> Self {
        Heap {
            boxes: self.boxes.successor(),
            aggregates: self.aggregates.successor(),
            functions: self.functions.successor(),
            namespaces: self.namespaces.successor(),
            modules: self.modules.successor(),
        }
    }

    // Boxes

    pub fn alloc_box(&mut self, value: Option<Value>) -> BoxId {
        self.boxes.alloc(MutableBox { value })
    }

    /// Current contents of a box, `None` if never stored.
    pub fn box_contents(&self, id: BoxId) -> Option<&Value> {
        self.boxes.get(id).value.as_ref()
    }

    /// Overwrite a box's contents in place.
    pub fn store_box(&mut self, id: BoxId, value: Value) {
        self.boxes.get_mut(id).value = Some(value);
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    // Aggregates

    pub fn alloc_aggregate(&mut self, aggregate: Aggregate) -> AggregateId {
        self.aggregates.alloc(aggregate)
    }

    #[inline]
    pub fn aggregate(&self, id: AggregateId) -> &Aggregate {
        self.aggregates.get(id)
    }

    #[inline]
    pub fn aggregate_mut(&mut self, id: AggregateId) -> &mut Aggregate {
        self.aggregates.get_mut(id)
    }

    // Functions

    pub fn alloc_function(&mut self, function: Function) -> FunctionId {
        self.functions.alloc(function)
    }

    #[inline]
    pub fn function(&self, id: FunctionId) -> &Function {
        self.functions.get(id)
    }

    pub fn contains_function(&self, id: FunctionId) -> bool {
        self.functions.contains(id)
    }

    // Namespaces and modules

    pub fn alloc_namespace(&mut self, namespace: Namespace) -> NamespaceId {
        self.namespaces.alloc(namespace)
    }

    #[inline]
    pub fn namespace(&self, id: NamespaceId) -> &Namespace {
        self.namespaces.get(id)
    }

    #[inline]
    pub fn namespace_mut(&mut self, id: NamespaceId) -> &mut Namespace {
        self.namespaces.get_mut(id)
    }

    pub fn alloc_module(&mut self, module: Module) -> ModuleId {
        self.modules.alloc(module)
    }

    #[inline]
    pub fn module(&self, id: ModuleId) -> &Module {
        self.modules.get(id)
    }

    /// The module behind `id`, or `None` for a handle of another heap.
    pub fn try_module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.try_get(id)
    }
}
