//! Scope chain.
//!
//! Every environment except the empty root has exactly one parent.
//! Lookup walks parents until the name is found or the empty root is
//! reached; binding always writes to the environment it is given, so an
//! inner binding shadows an outer one without touching it.
//!
//! Environments are shared by handle. A closure keeps its defining
//! environment reachable for as long as the interpreter lives.

use sysmel_ir::{Arena, HashTable, Symbol};

use crate::{TypeId, Value};

sysmel_ir::define_index! {
    /// Handle of an [`Environment`].
    pub struct EnvId;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnvironmentKind {
    /// Root of every chain. No parent, no bindings.
    Empty,
    /// Built-in types and values.
    Intrinsic,
    Module,
    Namespace,
    /// Block body or pattern-match arm.
    Lexical,
    /// Per closure definition; binds the function's own name.
    FunctionAnalysis,
    /// Per closure invocation; binds the arguments.
    FunctionActivation,
}

/// What a name is bound to.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    Type(TypeId),
    Value(Value),
}

#[derive(Debug)]
pub struct Environment {
    pub kind: EnvironmentKind,
    pub parent: Option<EnvId>,
    bindings: Option<HashTable<Binding>>,
}

impl Environment {
    /// Bindings made directly in this environment.
    pub fn bindings(&self) -> Option<&HashTable<Binding>> {
        self.bindings.as_ref()
    }
}

/// Arena of every environment in the runtime.
pub struct Environments {
    arena: Arena<EnvId, Environment>,
    empty: EnvId,
    intrinsic: Option<EnvId>,
}

impl Environments {
    /// Create the arena with its empty root.
    pub fn new() -> Self {
        Self::with_arena(Arena::new())
    }

    /// Fresh environments whose handles never collide with these.
    pub fn successor(&self) -> Self {
        Self::with_arena(self.arena.successor())
    }

    fn with_arena(mut arena: Arena<EnvId, Environment>) -> Self {
        let empty = arena.alloc(Environment {
            kind: EnvironmentKind::Empty,
            parent: None,
            bindings: None,
        });
        Environments {
            arena,
            empty,
            intrinsic: None,
        }
    }

    /// The empty root environment.
    #[inline]
    pub fn empty(&self) -> EnvId {
        self.empty
    }

    /// The intrinsic environment, if it has been built.
    #[inline]
    pub fn intrinsic(&self) -> Option<EnvId> {
        self.intrinsic
    }

    pub(crate) fn create_intrinsic(&mut self) -> EnvId {
        debug_assert!(self.intrinsic.is_none());
        let id = self.create(EnvironmentKind::Intrinsic, self.empty);
        self.intrinsic = Some(id);
        id
    }

    /// Create a child of `parent`.
    pub fn create(&mut self, kind: EnvironmentKind, parent: EnvId) -> EnvId {
        debug_assert_ne!(kind, EnvironmentKind::Empty);
        self.arena.alloc(Environment {
            kind,
            parent: Some(parent),
            bindings: Some(HashTable::new()),
        })
    }

    #[inline]
    pub fn get(&self, id: EnvId) -> &Environment {
        self.arena.get(id)
    }

    #[inline]
    pub fn kind(&self, id: EnvId) -> EnvironmentKind {
        self.get(id).kind
    }

    #[inline]
    pub fn parent(&self, id: EnvId) -> Option<EnvId> {
        self.get(id).parent
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether `id` belongs to this set of environments.
    #[inline]
    pub fn contains(&self, id: EnvId) -> bool {
        self.arena.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Binding of `name` in `env` itself, ignoring parents.
    pub fn lookup_local(&self, env: EnvId, name: Symbol) -> Option<&Binding> {
        self.get(env)
            .bindings
            .as_ref()
            .and_then(|bindings| bindings.lookup(name))
    }

    /// Binding of `name` in `env` or the nearest ancestor that binds it.
    pub fn lookup(&self, env: EnvId, name: Symbol) -> Option<&Binding> {
        let mut current = Some(env);
        while let Some(id) = current {
            if let Some(binding) = self.lookup_local(id, name) {
                return Some(binding);
            }
            current = self.parent(id);
        }
        None
    }

    /// Bind `name` in `env` itself, replacing any local binding.
    ///
    /// Returns `false` when `env` cannot hold bindings (the empty root).
    #[must_use]
    pub fn bind_local(&mut self, env: EnvId, name: Symbol, binding: Binding) -> bool {
        match self.arena.get_mut(env).bindings.as_mut() {
            Some(bindings) => {
                bindings.insert(name, binding);
                true
            }
            None => false,
        }
    }
}

impl Default for Environments {
    fn default() -> Self {
        Self::new()
    }
}
