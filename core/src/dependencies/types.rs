use crate::errors::ContainerError;
use crate::types::Value;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// **PARAMETER BAG**
///
/// **PURPOSE**: Named construction parameters supplied by a caller.
/// **GUARANTEE**: Cloning is O(1); the map is copied only when a shared bag is
/// written to.
#[derive(Clone, Default)]
pub struct Parameters {
    values: Arc<HashMap<String, Value>>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// **WITH VALUE** - Builder-style insert of a concrete value
    pub fn with<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.insert(name, Arc::new(value));
        self
    }

    /// **WITH SHARED VALUE** - Builder-style insert of an existing handle
    pub fn with_shared(mut self, name: impl Into<String>, value: Value) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        Arc::make_mut(&mut self.values).insert(name.into(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Typed lookup; `None` when absent or of another type.
    pub fn get_as<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.values
            .get(name)
            .and_then(|value| Arc::clone(value).downcast::<T>().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Parameter names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// **POSITIONAL CONSTRUCTOR ARGUMENTS**
///
/// Values handed to a class constructor, in declared parameter order.
pub struct Arguments {
    class_name: Arc<str>,
    values: Vec<Value>,
}

impl Arguments {
    pub(crate) fn new(class_name: Arc<str>, values: Vec<Value>) -> Self {
        Self { class_name, values }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// **TYPED ARGUMENT ACCESS**
    ///
    /// **RETURNS**:
    /// - `Ok(Arc<T>)` - Argument at `index` downcast to `T`
    /// - `Err(ContainerError::TypeMismatch)` - Missing argument or wrong type
    pub fn get_as<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>, ContainerError> {
        let value = self.values.get(index).ok_or_else(|| {
            ContainerError::type_mismatch(format!(
                "Constructor {{{}}} has no argument at position {}",
                self.class_name, index
            ))
        })?;

        Arc::clone(value).downcast::<T>().map_err(|_| {
            ContainerError::type_mismatch(format!(
                "Argument {} of constructor {{{}}} is not a {}",
                index,
                self.class_name,
                std::any::type_name::<T>()
            ))
        })
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arguments")
            .field("class_name", &self.class_name)
            .field("len", &self.values.len())
            .finish()
    }
}
