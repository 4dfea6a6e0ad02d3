//! Namespaces and modules.

use sysmel_ir::{HashTable, Symbol};

use crate::{Binding, EnvId};

sysmel_ir::define_index! {
    pub struct NamespaceId;
}

sysmel_ir::define_index! {
    pub struct ModuleId;
}

/// A named namespace.
///
/// Definitions made in the namespace body stay private until exported.
#[derive(Debug)]
pub struct Namespace {
    pub name: Symbol,
    /// Namespace-kind environment backing the namespace.
    pub environment: EnvId,
    /// Environment the body was last evaluated in; exports resolve from here.
    pub scope: EnvId,
    pub exported: HashTable<Binding>,
}

impl Namespace {
    pub fn new(name: Symbol, environment: EnvId) -> Self {
        Namespace {
            name,
            environment,
            scope: environment,
            exported: HashTable::new(),
        }
    }
}

/// One compilation unit.
#[derive(Debug)]
pub struct Module {
    pub name: Symbol,
    /// Module-level environment, child of the intrinsic environment.
    pub environment: EnvId,
    pub global_namespace: NamespaceId,
    /// Environment of the global namespace.
    pub namespace_environment: EnvId,
}
