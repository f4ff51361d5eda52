use crate::dependencies::{Arguments, Parameters, Resolver};
use crate::errors::ContainerError;
use crate::types::Value;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static CLASS_COUNTER: AtomicU64 = AtomicU64::new(0);
static FACTORY_COUNTER: AtomicU64 = AtomicU64::new(0);

type ConstructFn = dyn Fn(Arguments) -> Result<Value, ContainerError> + Send + Sync;
type FactoryFn = dyn Fn(&mut Resolver, &Parameters) -> Result<Value, ContainerError> + Send + Sync;

/// Where a constructor's parameter names come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterSource {
    /// Names declared explicitly at registration time.
    Declared(Vec<String>),
    /// Constructor signature text, parsed on first use.
    Signature(String),
}

struct ClassInner {
    id: u64,
    name: Arc<str>,
    source: ParameterSource,
    construct: Box<ConstructFn>,
}

/// **CONSTRUCTOR HANDLE**
///
/// **PURPOSE**: Identity-bearing recipe that builds a value from positional
/// arguments given in declared parameter order.
/// **GUARANTEE**: Clones share identity; two separately created classes are
/// never equal, even with the same name.
#[derive(Clone)]
pub struct Class(Arc<ClassInner>);

impl Class {
    /// **CONSTRUCTOR WITH DECLARED PARAMETER NAMES**
    pub fn new<T, I, S, F>(name: impl Into<String>, parameter_names: I, construct: F) -> Self
    where
        T: Any + Send + Sync,
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(Arguments) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        let names = parameter_names.into_iter().map(Into::into).collect();
        Self::build(name.into(), ParameterSource::Declared(names), construct)
    }

    /// **CONSTRUCTOR FROM SIGNATURE TEXT**
    ///
    /// Parameter names are extracted from `signature` on first use, e.g.
    /// `"fn new(logger: Arc<Logger>, config: Config) -> Self"`.
    pub fn from_signature<T, F>(
        name: impl Into<String>,
        signature: impl Into<String>,
        construct: F,
    ) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Arguments) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        Self::build(name.into(), ParameterSource::Signature(signature.into()), construct)
    }

    /// **CONSTRUCTOR WITHOUT PARAMETERS**
    pub fn nullary<T, F>(name: impl Into<String>, construct: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::build(
            name.into(),
            ParameterSource::Declared(Vec::new()),
            move |_arguments: Arguments| Ok(construct()),
        )
    }

    fn build<T, F>(name: String, source: ParameterSource, construct: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Arguments) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        let construct: Box<ConstructFn> =
            Box::new(move |arguments: Arguments| construct(arguments).map(|value| Arc::new(value) as Value));
        Self(Arc::new(ClassInner {
            id: CLASS_COUNTER.fetch_add(1, Ordering::Relaxed),
            name: Arc::from(name),
            source,
            construct,
        }))
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parameter_source(&self) -> &ParameterSource {
        &self.0.source
    }

    /// Invokes the constructor with the given positional values.
    pub fn instantiate(&self, values: Vec<Value>) -> Result<Value, ContainerError> {
        (self.0.construct)(Arguments::new(Arc::clone(&self.0.name), values))
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Class {}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({}#{})", self.0.name, self.0.id)
    }
}

/// **FACTORY HANDLE**
///
/// Identity-bearing function invoked with the resolver and the caller's
/// parameter bag. The resolver handle lets a factory resolve further keys.
#[derive(Clone)]
pub struct Factory {
    id: u64,
    function: Arc<FactoryFn>,
}

impl Factory {
    pub fn new<T, F>(function: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&mut Resolver, &Parameters) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        Self::from_shared(move |resolver: &mut Resolver, parameters: &Parameters| {
            function(resolver, parameters).map(|value| Arc::new(value) as Value)
        })
    }

    /// Factory returning an already-shared `Value` handle.
    pub fn from_shared<F>(function: F) -> Self
    where
        F: Fn(&mut Resolver, &Parameters) -> Result<Value, ContainerError> + Send + Sync + 'static,
    {
        Self {
            id: FACTORY_COUNTER.fetch_add(1, Ordering::Relaxed),
            function: Arc::new(function),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn invoke(
        &self,
        resolver: &mut Resolver,
        parameters: &Parameters,
    ) -> Result<Value, ContainerError> {
        (self.function)(resolver, parameters)
    }
}

impl PartialEq for Factory {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Factory {}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Factory(#{})", self.id)
    }
}

/// **BINDING ENTRY**
///
/// **PURPOSE**: Immutable payload of a simple or contextual binding.
/// **GUARANTEE**: Never mutated after registration; rebinding stores a new
/// entry, so one entry may be shared between registries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingEntry {
    Class(Class),
    Factory(Factory),
}

impl BindingEntry {
    pub fn has_class(&self) -> bool {
        matches!(self, BindingEntry::Class(_))
    }

    pub fn has_factory(&self) -> bool {
        matches!(self, BindingEntry::Factory(_))
    }

    pub fn class(&self) -> Option<&Class> {
        match self {
            BindingEntry::Class(class) => Some(class),
            BindingEntry::Factory(_) => None,
        }
    }

    pub fn factory(&self) -> Option<&Factory> {
        match self {
            BindingEntry::Factory(factory) => Some(factory),
            BindingEntry::Class(_) => None,
        }
    }
}

impl From<Class> for BindingEntry {
    fn from(class: Class) -> Self {
        BindingEntry::Class(class)
    }
}

impl From<Factory> for BindingEntry {
    fn from(factory: Factory) -> Self {
        BindingEntry::Factory(factory)
    }
}
