//! # CONTAINER FAÇADE
//!
//! **PURPOSE**: Ergonomic binding and resolution API over [`ContainerManager`].
//! **MANDATE**: Constructed explicitly by the application's composition root and
//! passed where needed. There is no process-wide instance.

use crate::binding::{Class, Factory};
use crate::config::ResolverConfig;
use crate::dependencies::{Parameters, Resolver};
use crate::errors::ContainerError;
use crate::events::RebindEventObserver;
use crate::manager::ContainerManager;
use crate::registry::{Extender, ParameterKeys};
use crate::types::{Key, Value};
use std::any::Any;
use std::sync::Arc;

#[derive(Default)]
pub struct Container {
    manager: ContainerManager,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ResolverConfig) -> Result<Self, ContainerError> {
        Ok(Self {
            manager: ContainerManager::with_config(config)?,
        })
    }

    /// Read access to the underlying manager, mainly for diagnostics.
    pub fn manager(&self) -> &ContainerManager {
        &self.manager
    }

    /// **BIND CLASS**
    ///
    /// Maps `class` to `key`, drops any value bound to `key` and makes `class`
    /// the simple binding. Observers are notified when `key` had already
    /// resolved.
    pub fn bind_class(
        &mut self,
        key: &Key,
        class: Class,
        parameter_keys: ParameterKeys,
        resolve_once: bool,
    ) -> Result<(), ContainerError> {
        self.manager
            .set_class_mapping(key.clone(), class.clone(), parameter_keys);
        self.manager.unset_value_binding(key);
        self.manager
            .set_simple_binding(key.clone(), class.into(), resolve_once);
        self.trigger_if_resolved(key)
    }

    pub fn bind_factory(
        &mut self,
        key: &Key,
        factory: Factory,
        resolve_once: bool,
    ) -> Result<(), ContainerError> {
        self.manager.unset_value_binding(key);
        self.manager
            .set_simple_binding(key.clone(), factory.into(), resolve_once);
        self.trigger_if_resolved(key)
    }

    pub fn bind_value<T: Any + Send + Sync>(&mut self, key: &Key, value: T) -> Result<(), ContainerError> {
        self.bind_value_shared(key, Arc::new(value))
    }

    /// Binds an existing handle; resolving `key` yields this exact instance.
    pub fn bind_value_shared(&mut self, key: &Key, value: Value) -> Result<(), ContainerError> {
        let was_bound = self.is_bound(key);
        self.manager.set_value_binding(key.clone(), value);
        if was_bound {
            self.manager.trigger_rebind_event(key)?;
        }
        Ok(())
    }

    /// Uses `class` for `dependency` whenever a constructor bound to
    /// `consumer` asks for it.
    pub fn contextually_bind_class(
        &mut self,
        consumer: &Key,
        dependency: &Key,
        class: Class,
        parameter_keys: ParameterKeys,
    ) {
        self.manager
            .set_class_mapping(dependency.clone(), class.clone(), parameter_keys);
        self.manager
            .set_contextual_binding(consumer.clone(), dependency.clone(), class.into());
    }

    pub fn contextually_bind_factory(&mut self, consumer: &Key, dependency: &Key, factory: Factory) {
        self.manager
            .set_contextual_binding(consumer.clone(), dependency.clone(), factory.into());
    }

    /// **EXTEND**
    ///
    /// A value already bound to `key` is transformed immediately; otherwise the
    /// transform joins the extender chain of `key`. The transform receives the
    /// resolver, so it may resolve other keys.
    pub fn extend<F>(&mut self, key: &Key, extender: F) -> Result<(), ContainerError>
    where
        F: Fn(&mut Resolver, Value) -> Result<Value, ContainerError> + Send + Sync + 'static,
    {
        let extender = Extender::new(extender);
        if let Some(value) = self.manager.get_value_binding(key) {
            let extended = self.manager.apply_extender(&extender, value)?;
            self.manager.set_value_binding(key.clone(), extended);
            return self.manager.trigger_rebind_event(key);
        }

        self.manager.add_extender(key.clone(), extender);
        self.trigger_if_resolved(key)
    }

    /// **REBIND HANDLER**
    ///
    /// Registers `handler` for rebinds of `key` and resolves `key` once when
    /// it is already bound. The returned observer removes the handler again.
    pub fn add_rebind_handler<F>(&mut self, key: &Key, handler: F) -> Result<RebindEventObserver, ContainerError>
    where
        F: Fn(&mut Resolver, &Value) + Send + Sync + 'static,
    {
        let observer = RebindEventObserver::new(handler);
        self.manager.add_rebind_observer(key.clone(), observer.clone());
        if self.is_bound(key) {
            self.manager.resolve_value(key, Parameters::new())?;
        }
        Ok(observer)
    }

    pub fn remove_rebind_handler(&mut self, key: &Key, observer: &RebindEventObserver) {
        self.manager.remove_rebind_observer(key, observer);
    }

    pub fn is_bound(&self, key: &Key) -> bool {
        self.manager.contains_simple_binding(key) || self.manager.contains_value_binding(key)
    }

    pub fn has_resolved(&self, key: &Key) -> bool {
        self.manager.contains_resolved_key(key) || self.manager.contains_value_binding(key)
    }

    pub fn resolve<T: Any + Send + Sync>(&mut self, key: &Key) -> Result<Arc<T>, ContainerError> {
        self.resolve_with(key, Parameters::new())
    }

    /// **TYPED RESOLVE WITH PARAMETERS**
    ///
    /// **RETURNS**:
    /// - `Ok(Arc<T>)` - Resolved value
    /// - `Err(ContainerError::ResolutionFailed)` - Key could not be resolved
    /// - `Err(ContainerError::TypeMismatch)` - Value is not a `T`
    pub fn resolve_with<T: Any + Send + Sync>(
        &mut self,
        key: &Key,
        parameters: Parameters,
    ) -> Result<Arc<T>, ContainerError> {
        self.manager.resolve_as(key, parameters)
    }

    pub fn resolve_value(&mut self, key: &Key, parameters: Parameters) -> Result<Value, ContainerError> {
        self.manager.resolve_value(key, parameters)
    }

    /// Clears every binding, mapping, extender and rebind handler.
    pub fn empty(&mut self) {
        self.manager.clear_all();
    }

    fn trigger_if_resolved(&mut self, key: &Key) -> Result<(), ContainerError> {
        if self.has_resolved(key) {
            self.manager.trigger_rebind_event(key)?;
        }
        Ok(())
    }
}
