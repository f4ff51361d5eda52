//! # BINDING REGISTRIES
//!
//! Plain associative stores consulted by the resolver. None of them knows
//! about the others; the resolver and the container manager keep them in step.

pub mod class_mapping;
pub mod contextual;
pub mod extender;
pub mod resolved;
pub mod simple;
pub mod value;

pub use class_mapping::{parameter_keys, ClassMapping, ClassMappingRegistry, ParameterKeys};
pub use contextual::ContextualBindingRegistry;
pub use extender::{Extender, ExtenderRegistry};
pub use resolved::ResolvedKeySet;
pub use simple::SimpleBindingRegistry;
pub use value::ValueBindingRegistry;

/// **REGISTRY SET**
///
/// Every store the resolver reads, owned together so a resolver can be
/// handed one coherent view.
#[derive(Default)]
pub struct Registries {
    pub class_mappings: ClassMappingRegistry,
    pub simple: SimpleBindingRegistry,
    pub values: ValueBindingRegistry,
    pub contextual: ContextualBindingRegistry,
    pub extenders: ExtenderRegistry,
    pub resolved: ResolvedKeySet,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.class_mappings.clear();
        self.simple.clear();
        self.values.clear();
        self.contextual.clear();
        self.extenders.clear();
        self.resolved.clear();
    }
}
