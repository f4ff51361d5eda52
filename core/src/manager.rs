use crate::binding::{BindingEntry, Class};
use crate::config::ResolverConfig;
use crate::dependencies::{Parameters, Resolver};
use crate::errors::ContainerError;
use crate::events::{RebindEventObserver, RebindEventSource};
use crate::registry::{Extender, ParameterKeys};
use crate::types::{Key, Value};
use std::any::Any;
use std::sync::Arc;

/// **CONTAINER MANAGER**
///
/// **PURPOSE**: The narrow boundary between the container façade and the
/// resolution core. Every registry mutation and query goes through here.
/// **GUARANTEE**: `clear_all` leaves the manager indistinguishable from a
/// freshly constructed one with the same configuration.
#[derive(Default)]
pub struct ContainerManager {
    resolver: Resolver,
    rebind_events: RebindEventSource,
}

impl ContainerManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ResolverConfig) -> Result<Self, ContainerError> {
        Ok(Self {
            resolver: Resolver::with_config(config)?,
            rebind_events: RebindEventSource::new(),
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        self.resolver.config()
    }

    // Registry mutation

    pub fn set_class_mapping(&mut self, key: Key, class: Class, parameter_keys: ParameterKeys) {
        log::debug!("Mapping constructor {} to {}", class.name(), key);
        self.resolver
            .registries_mut()
            .class_mappings
            .set(class, key, parameter_keys);
    }

    pub fn set_simple_binding(&mut self, key: Key, entry: BindingEntry, resolve_once: bool) {
        log::debug!("Binding {} (resolve once: {})", key, resolve_once);
        self.resolver
            .registries_mut()
            .simple
            .set(key, entry, resolve_once);
    }

    pub fn set_contextual_binding(&mut self, consumer: Key, dependency: Key, entry: BindingEntry) {
        log::debug!("Binding {} contextually for {}", dependency, consumer);
        self.resolver
            .registries_mut()
            .contextual
            .set_dependent(consumer, dependency, entry);
    }

    pub fn set_value_binding(&mut self, key: Key, value: Value) {
        log::debug!("Binding value to {}", key);
        self.resolver.registries_mut().values.set(key, value);
    }

    pub fn unset_value_binding(&mut self, key: &Key) -> Option<Value> {
        self.resolver.registries_mut().values.unset(key)
    }

    pub fn add_extender(&mut self, key: Key, extender: Extender) {
        self.resolver.registries_mut().extenders.add(key, extender);
    }

    pub fn clear_all(&mut self) {
        log::debug!("Clearing every registry and rebind observer");
        self.resolver.registries_mut().clear();
        self.rebind_events.clear_observers();
    }

    // Registry query

    pub fn contains_simple_binding(&self, key: &Key) -> bool {
        self.resolver.registries().simple.contains(key)
    }

    pub fn contains_value_binding(&self, key: &Key) -> bool {
        self.resolver.registries().values.contains(key)
    }

    pub fn contains_resolved_key(&self, key: &Key) -> bool {
        self.resolver.registries().resolved.contains(key)
    }

    pub fn get_value_binding(&self, key: &Key) -> Option<Value> {
        self.resolver.registries().values.get(key).cloned()
    }

    /// **RESOLVE VALUE** - Single algorithmic entry point into the resolver
    pub fn resolve_value(&mut self, key: &Key, parameters: Parameters) -> Result<Value, ContainerError> {
        self.resolver.resolve(key, parameters)
    }

    /// Typed variant of [`resolve_value`](Self::resolve_value).
    pub fn resolve_as<T: Any + Send + Sync>(
        &mut self,
        key: &Key,
        parameters: Parameters,
    ) -> Result<Arc<T>, ContainerError> {
        self.resolver.resolve_as(key, parameters)
    }

    /// Runs `extender` once against `value` outside of any resolution.
    pub fn apply_extender(&mut self, extender: &Extender, value: Value) -> Result<Value, ContainerError> {
        extender.apply(&mut self.resolver, value)
    }

    // Diagnostics

    pub fn class_stack(&self) -> Vec<Class> {
        self.resolver.class_stack()
    }

    pub fn parameters_stack(&self) -> Vec<Parameters> {
        self.resolver.parameters_stack()
    }

    // Rebind notification

    pub fn add_rebind_observer(&mut self, key: Key, observer: RebindEventObserver) {
        self.rebind_events.add_observer(key, observer);
    }

    pub fn remove_rebind_observer(&mut self, key: &Key, observer: &RebindEventObserver) {
        self.rebind_events.remove_observer(key, observer);
    }

    pub fn contains_rebind_observers(&self, key: &Key) -> bool {
        self.rebind_events.contains_observers(key)
    }

    /// Notifies the observers of `key` with a fresh resolution of `key`.
    /// Nothing is resolved when `key` has no observers.
    pub fn trigger_rebind_event(&mut self, key: &Key) -> Result<(), ContainerError> {
        let Self {
            resolver,
            rebind_events,
        } = self;
        rebind_events.trigger_event(key, resolver, |resolver| {
            resolver.resolve(key, Parameters::new())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Factory;
    use crate::registry::parameter_keys;
    use crate::types::shared;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_bindings_and_queries() {
        let mut manager = ContainerManager::new();
        let key = Key::new("foo");
        assert!(!manager.contains_simple_binding(&key));

        manager.set_simple_binding(key.clone(), Factory::new(|_, _| Ok(1u8)).into(), true);
        assert!(manager.contains_simple_binding(&key));
        assert!(!manager.contains_resolved_key(&key));

        let value = manager.resolve_value(&key, Parameters::new()).unwrap();
        assert!(manager.contains_resolved_key(&key));
        assert!(manager.contains_value_binding(&key));
        assert!(Arc::ptr_eq(&manager.get_value_binding(&key).unwrap(), &value));

        assert!(manager.unset_value_binding(&key).is_some());
        assert!(manager.get_value_binding(&key).is_none());
    }

    #[test]
    fn test_class_mapping_and_contextual_binding() {
        let mut manager = ContainerManager::new();
        let foo = Key::new("foo");
        let bar = Key::new("bar");
        let bar_class = Class::new("Bar", ["foo"], |arguments| Ok(*arguments.get_as::<u8>(0)?));

        manager.set_class_mapping(bar.clone(), bar_class.clone(), parameter_keys([("foo", foo.clone())]));
        manager.set_simple_binding(bar.clone(), bar_class.into(), false);
        manager.set_value_binding(foo.clone(), shared(1u8));
        manager.set_contextual_binding(bar.clone(), foo.clone(), Factory::new(|_, _| Ok(2u8)).into());

        let value = manager.resolve_value(&bar, Parameters::new()).unwrap();
        assert_eq!(value.downcast_ref::<u8>(), Some(&2));
    }

    #[test]
    fn test_clear_all_matches_fresh_state() {
        let mut manager = ContainerManager::new();
        let key = Key::new("foo");
        manager.set_value_binding(key.clone(), shared(()));
        manager.set_simple_binding(key.clone(), Factory::new(|_, _| Ok(())).into(), false);
        manager.add_extender(key.clone(), Extender::new(|_, value| Ok(value)));
        manager.add_rebind_observer(key.clone(), RebindEventObserver::new(|_, _| {}));
        manager.resolve_value(&key, Parameters::new()).unwrap();

        manager.clear_all();
        assert!(!manager.contains_simple_binding(&key));
        assert!(!manager.contains_value_binding(&key));
        assert!(!manager.contains_resolved_key(&key));
        assert!(!manager.contains_rebind_observers(&key));
        assert!(manager.get_value_binding(&key).is_none());
        assert!(manager.resolve_value(&key, Parameters::new()).is_err());
    }

    #[test]
    fn test_trigger_rebind_event_resolves_lazily() {
        let mut manager = ContainerManager::new();
        let key = Key::new("foo");
        let builds = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&builds);
        manager.set_simple_binding(
            key.clone(),
            Factory::new(move |_, _| Ok(counter.fetch_add(1, Ordering::SeqCst))).into(),
            false,
        );

        manager.trigger_rebind_event(&key).unwrap();
        assert_eq!(builds.load(Ordering::SeqCst), 0);

        let notified = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&notified);
        let observer = RebindEventObserver::new(move |_, _| {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        manager.add_rebind_observer(key.clone(), observer.clone());
        manager.trigger_rebind_event(&key).unwrap();
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(notified.load(Ordering::SeqCst), 1);

        manager.remove_rebind_observer(&key, &observer);
        assert!(!manager.contains_rebind_observers(&key));
    }

    #[test]
    fn test_resolve_as_and_apply_extender() {
        let mut manager = ContainerManager::new();
        let base = Key::new("base");
        manager.set_value_binding(base.clone(), shared(4u32));

        assert_eq!(*manager.resolve_as::<u32>(&base, Parameters::new()).unwrap(), 4);
        let err = manager.resolve_as::<String>(&base, Parameters::new()).unwrap_err();
        assert!(matches!(err, ContainerError::TypeMismatch { .. }));

        let base_key = base.clone();
        let scale = Extender::new(move |resolver, value| {
            let base = resolver.resolve_as::<u32>(&base_key, Parameters::new())?;
            let n = value.downcast_ref::<u32>().copied().unwrap_or_default();
            Ok(shared(n * *base))
        });
        let scaled = manager.apply_extender(&scale, shared(5u32)).unwrap();
        assert_eq!(scaled.downcast_ref::<u32>(), Some(&20));
    }

    #[test]
    fn test_stacks_empty_between_calls() {
        let mut manager = ContainerManager::new();
        let key = Key::new("missing");
        assert!(manager.resolve_value(&key, Parameters::new()).is_err());
        assert!(manager.class_stack().is_empty());
        assert!(manager.parameters_stack().is_empty());
    }
}
