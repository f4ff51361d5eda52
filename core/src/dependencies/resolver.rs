use crate::binding::{BindingEntry, Class};
use crate::config::ResolverConfig;
use crate::dependencies::types::Parameters;
use crate::errors::{error_codes, ContainerError, ResolutionFailed};
use crate::registry::{Extender, Registries};
use crate::types::{Key, Value};
use std::any::Any;
use std::sync::Arc;

/// **DEPENDENCY RESOLVER**
///
/// **PURPOSE**: Turns a key into a fully constructed value, recursively
/// satisfying constructor parameters through the class mappings.
/// **GUARANTEE**: Every frame pushed during a `resolve` call is popped before
/// that call returns, on success and on failure alike.
#[derive(Default)]
pub struct Resolver {
    registries: Registries,
    class_stack: Vec<Class>,
    parameters_stack: Vec<Parameters>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ResolverConfig) -> Result<Self, ContainerError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    pub fn registries_mut(&mut self) -> &mut Registries {
        &mut self.registries
    }

    /// Copy of the constructors currently resolving dependencies, outermost first.
    pub fn class_stack(&self) -> Vec<Class> {
        self.class_stack.clone()
    }

    /// Copy of the parameter bags of in-flight builds, outermost first.
    pub fn parameters_stack(&self) -> Vec<Parameters> {
        self.parameters_stack.clone()
    }

    /// **RESOLVE**
    ///
    /// **PROCESS**:
    /// 1. Serve a cached value binding unless parameters or a contextual
    ///    override demand a fresh build
    /// 2. Build from the contextual entry, else the simple binding
    /// 3. Apply extenders in registration order, each with access to the resolver
    /// 4. Cache resolve-once results and mark the key resolved
    ///
    /// **RETURNS**:
    /// - `Ok(Value)` - Constructed (or cached) value
    /// - `Err(ContainerError::ResolutionFailed)` - Unbound key, unmapped class,
    ///   unsatisfiable parameter or depth limit
    /// - `Err(ContainerError::Configuration)` - Malformed constructor signature
    /// - Any error returned by a factory or an extender
    pub fn resolve(&mut self, key: &Key, parameters: Parameters) -> Result<Value, ContainerError> {
        let contextual_entry = self.contextual_entry(key);
        let is_contextual = contextual_entry.is_some();
        let needs_fresh_build = !parameters.is_empty() || is_contextual;

        if !needs_fresh_build {
            if let Some(value) = self.registries.values.get(key) {
                log::trace!("Serving cached value for {}", key);
                return Ok(Arc::clone(value));
            }
        }

        let entry = match contextual_entry.or_else(|| self.registries.simple.get(key).cloned()) {
            Some(entry) => entry,
            None => {
                return Err(self.failure(
                    error_codes::UNBOUND_KEY,
                    format!("Could not find a binding for key {{{}}}.", key.description()),
                ))
            }
        };

        if self.parameters_stack.len() >= self.config.max_depth {
            log::warn!(
                "Resolution of {} exceeded the maximum depth of {}",
                key,
                self.config.max_depth
            );
            return Err(self.failure(
                error_codes::DEPTH_EXCEEDED,
                format!(
                    "Resolving key {{{}}} exceeded the maximum depth of {}; the dependency graph is likely cyclic.",
                    key.description(),
                    self.config.max_depth
                ),
            ));
        }

        self.parameters_stack.push(parameters.clone());
        let built = self.build(key, &entry, &parameters);
        self.parameters_stack.pop();
        let mut value = built?;

        let extenders = self
            .registries
            .extenders
            .get_functions(key)
            .map(<[Extender]>::to_vec);
        if let Some(extenders) = extenders {
            log::trace!("Applying {} extender(s) to {}", extenders.len(), key);
            for extender in &extenders {
                value = extender.apply(self, value)?;
            }
        }

        if !is_contextual
            && !needs_fresh_build
            && self.registries.simple.should_resolve_once(key) == Some(true)
        {
            self.registries.values.set(key.clone(), Arc::clone(&value));
        }

        self.registries.resolved.add(key.clone());
        Ok(value)
    }

    /// **TYPED RESOLVE**
    ///
    /// **RETURNS**:
    /// - `Ok(Arc<T>)` - Resolved value downcast to `T`
    /// - `Err(ContainerError::TypeMismatch)` - Value is of another type
    pub fn resolve_as<T: Any + Send + Sync>(
        &mut self,
        key: &Key,
        parameters: Parameters,
    ) -> Result<Arc<T>, ContainerError> {
        let value = self.resolve(key, parameters)?;
        value.downcast::<T>().map_err(|_| {
            ContainerError::type_mismatch(format!(
                "Value bound to key {{{}}} is not a {}",
                key.description(),
                std::any::type_name::<T>()
            ))
        })
    }

    fn contextual_entry(&self, key: &Key) -> Option<BindingEntry> {
        let consumer = self.class_stack.last()?;
        let consumer_key = self.registries.class_mappings.get_key(consumer)?;
        self.registries
            .contextual
            .get_dependent(consumer_key, key)
            .cloned()
    }

    fn build(
        &mut self,
        key: &Key,
        entry: &BindingEntry,
        parameters: &Parameters,
    ) -> Result<Value, ContainerError> {
        match entry {
            BindingEntry::Factory(factory) => {
                log::debug!("Invoking factory for {}", key);
                factory.invoke(self, parameters)
            }
            BindingEntry::Class(class) => self.construct(class, parameters),
        }
    }

    fn construct(&mut self, class: &Class, parameters: &Parameters) -> Result<Value, ContainerError> {
        let mapping = match self.registries.class_mappings.get(class)? {
            Some(mapping) => mapping,
            None => {
                return Err(self.failure(
                    error_codes::UNMAPPED_CLASS,
                    format!("No class mapping registered for constructor {{{}}}.", class.name()),
                ))
            }
        };

        log::debug!("Constructing {} for {}", class.name(), mapping.key);
        let mut arguments = Vec::with_capacity(mapping.parameter_names.len());
        for name in mapping.parameter_names.iter() {
            if let Some(value) = parameters.get(name) {
                arguments.push(Arc::clone(value));
                continue;
            }

            let dependency = match mapping.parameter_keys.get(name) {
                Some(dependency) => dependency,
                None => {
                    return Err(self.failure(
                        error_codes::MISSING_PARAMETER,
                        format!(
                            "Could not resolve a value for parameter {{{}}} of constructor {{{}}}.",
                            name,
                            class.name()
                        ),
                    ))
                }
            };

            self.class_stack.push(class.clone());
            let resolved = self.resolve(dependency, Parameters::new());
            self.class_stack.pop();
            arguments.push(resolved?);
        }

        class.instantiate(arguments)
    }

    fn failure(&self, code: &str, message: String) -> ContainerError {
        ResolutionFailed::new(
            code,
            message,
            self.class_stack.clone(),
            self.parameters_stack.clone(),
        )
        .into()
    }
}
