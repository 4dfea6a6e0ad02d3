//! Runtime bootstrap: built-in types, the intrinsic environment, modules.

use sysmel_ir::Symbol;

use super::Interpreter;
use crate::errors::stale_handle;
use crate::{
    primitives, Binding, BasicTypes, EnvId, EnvironmentKind, EvalError, Function, FunctionId,
    MacroFn, Module, ModuleId, Namespace, PrimitiveFn, TypeId, TypeRegistry, Value,
};

impl Interpreter<'_> {
    /// The built-in types, created on first request.
    pub fn basic_types(&mut self) -> BasicTypes {
        self.types.basic_types(self.interner)
    }

    /// The runtime-wide intrinsic environment, created on first request.
    ///
    /// It binds every built-in type by name, the built-in values and the
    /// intrinsic functions, and installs the built-in methods.
    pub fn intrinsic_environment(&mut self) -> EnvId {
        if let Some(env) = self.environments.intrinsic() {
            return env;
        }

        let basic = self.basic_types();
        let env = self.environments.create_intrinsic();
        for (kind, ty) in basic.iter() {
            self.bind_intrinsic(env, kind.name(), Binding::Type(ty));
        }
        primitives::install(self, env);

        tracing::debug!(
            bindings = self
                .environments
                .get(env)
                .bindings()
                .map_or(0, sysmel_ir::HashTable::len),
            "created intrinsic environment"
        );
        env
    }

    pub(crate) fn bind_intrinsic(&mut self, env: EnvId, name: &str, binding: Binding) {
        let bound = self
            .environments
            .bind_local(env, self.interner.intern(name), binding);
        debug_assert!(bound, "intrinsic environment holds bindings");
    }

    /// Create a module: its environment (child of the intrinsic one), a
    /// global namespace and that namespace's environment.
    pub fn create_module(&mut self, name: Symbol) -> ModuleId {
        let intrinsic = self.intrinsic_environment();
        let environment = self.environments.create(EnvironmentKind::Module, intrinsic);
        let namespace_environment = self
            .environments
            .create(EnvironmentKind::Namespace, environment);
        let global_namespace = self
            .heap
            .alloc_namespace(Namespace::new(name, namespace_environment));
        let module = self.heap.alloc_module(Module {
            name,
            environment,
            global_namespace,
            namespace_environment,
        });
        tracing::debug!(module = self.symbol_text(name), ?module, "created module");
        module
    }

    /// Lexical environment for evaluating a module's top-level statements.
    ///
    /// Fails for a module created before the last [`reset`](Self::reset).
    pub fn create_top_level_environment(&mut self, module: ModuleId) -> Result<EnvId, EvalError> {
        let Some(module) = self.heap.try_module(module) else {
            return Err(stale_handle("module"));
        };
        let global_namespace = module.global_namespace;
        let env = self
            .environments
            .create(EnvironmentKind::Lexical, module.namespace_environment);
        self.heap.namespace_mut(global_namespace).scope = env;
        Ok(env)
    }

    /// Drop the whole runtime and start over from an empty one.
    ///
    /// Environments, modules and heap objects of the new runtime get handles
    /// the old one never issued, so an old handle is reported as stale
    /// rather than silently resolving to a new object.
    pub fn reset(&mut self) {
        self.types = TypeRegistry::new();
        self.environments = self.environments.successor();
        self.heap = self.heap.successor();
        tracing::debug!("runtime reset");
    }

    /// Install a native method on `ty`.
    pub fn define_primitive(&mut self, ty: TypeId, selector: &str, function: PrimitiveFn) -> FunctionId {
        let selector = self.interner.intern(selector);
        let method = self
            .heap
            .alloc_function(Function::primitive(Some(selector), function));
        self.basic_types();
        self.types.add_method(ty, selector, method);
        method
    }

    /// Install a native macro method on `ty`.
    pub fn define_macro(&mut self, ty: TypeId, selector: &str, function: MacroFn) -> FunctionId {
        let selector = self.interner.intern(selector);
        let method = self
            .heap
            .alloc_function(Function::primitive_macro(Some(selector), function));
        self.basic_types();
        self.types.add_method(ty, selector, method);
        method
    }

    /// Bind a native function under `name` in `env`.
    pub fn define_function(&mut self, env: EnvId, name: &str, function: PrimitiveFn) -> Value {
        let symbol = self.interner.intern(name);
        let function = self
            .heap
            .alloc_function(Function::primitive(Some(symbol), function));
        let value = Value::function(function);
        let bound = self
            .environments
            .bind_local(env, symbol, Binding::Value(value.clone()));
        debug_assert!(bound, "functions are bound in non-empty environments");
        value
    }

    /// Bind a native macro function under `name` in `env`.
    ///
    /// Calls from source hand it the argument nodes as syntax values.
    pub fn define_macro_function(&mut self, env: EnvId, name: &str, function: MacroFn) -> Value {
        let symbol = self.interner.intern(name);
        let function = self
            .heap
            .alloc_function(Function::primitive_macro(Some(symbol), function));
        let value = Value::function(function);
        let bound = self
            .environments
            .bind_local(env, symbol, Binding::Value(value.clone()));
        debug_assert!(bound, "functions are bound in non-empty environments");
        value
    }
}
