use crate::binding::Class;
use crate::errors::ContainerError;
use crate::introspection::ParameterNameExtractor;
use crate::types::Key;
use std::collections::HashMap;
use std::sync::Arc;

/// Parameter name → dependency key.
pub type ParameterKeys = HashMap<String, Key>;

/// Builds a `ParameterKeys` map from `(name, key)` pairs.
pub fn parameter_keys<I, S>(pairs: I) -> ParameterKeys
where
    I: IntoIterator<Item = (S, Key)>,
    S: Into<String>,
{
    pairs
        .into_iter()
        .map(|(name, key)| (name.into(), key))
        .collect()
}

/// **CLASS MAPPING VIEW**
///
/// Joins "what are this constructor's parameters" with "how are they satisfied".
#[derive(Debug, Clone)]
pub struct ClassMapping {
    pub key: Key,
    pub parameter_keys: Arc<ParameterKeys>,
    pub parameter_names: Arc<Vec<String>>,
}

struct ClassMappingRecord {
    key: Key,
    parameter_keys: Arc<ParameterKeys>,
    extractor: ParameterNameExtractor,
}

/// **CLASS MAPPING REGISTRY**
///
/// **PURPOSE**: One record per constructor identity holding its owner key, its
/// parameter-to-key map and its lazily parsed parameter names.
#[derive(Default)]
pub struct ClassMappingRegistry {
    mappings: HashMap<u64, ClassMappingRecord>,
}

impl ClassMappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.mappings.clear();
    }

    pub fn contains(&self, class: &Class) -> bool {
        self.mappings.contains_key(&class.id())
    }

    /// **MAPPING LOOKUP**
    ///
    /// **RETURNS**:
    /// - `Ok(Some(mapping))` - Mapping with parsed parameter names
    /// - `Ok(None)` - Class not mapped
    /// - `Err(ContainerError::Configuration)` - Constructor signature is malformed
    pub fn get(&self, class: &Class) -> Result<Option<ClassMapping>, ContainerError> {
        let record = match self.mappings.get(&class.id()) {
            Some(record) => record,
            None => return Ok(None),
        };

        let parameter_names = record.extractor.parse()?;
        Ok(Some(ClassMapping {
            key: record.key.clone(),
            parameter_keys: Arc::clone(&record.parameter_keys),
            parameter_names,
        }))
    }

    pub fn get_parameter_names(
        &self,
        class: &Class,
    ) -> Result<Option<Arc<Vec<String>>>, ContainerError> {
        Ok(self.get(class)?.map(|mapping| mapping.parameter_names))
    }

    pub fn get_parameter_keys(&self, class: &Class) -> Option<Arc<ParameterKeys>> {
        self.mappings
            .get(&class.id())
            .map(|record| Arc::clone(&record.parameter_keys))
    }

    pub fn get_key(&self, class: &Class) -> Option<&Key> {
        self.mappings.get(&class.id()).map(|record| &record.key)
    }

    /// Whether the parameter names of `class` have been derived yet.
    pub fn is_parsed(&self, class: &Class) -> bool {
        self.mappings
            .get(&class.id())
            .map_or(false, |record| record.extractor.is_parsed())
    }

    /// Overwrites any prior mapping for `class` and starts a fresh name cache.
    pub fn set(&mut self, class: Class, key: Key, parameter_keys: ParameterKeys) {
        let record = ClassMappingRecord {
            key,
            parameter_keys: Arc::new(parameter_keys),
            extractor: ParameterNameExtractor::new(class.clone()),
        };
        self.mappings.insert(class.id(), record);
    }

    pub fn unset(&mut self, class: &Class) -> bool {
        self.mappings.remove(&class.id()).is_some()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::error_codes;

    fn bar_class() -> Class {
        Class::from_signature("Bar", "fn new(foo: Foo, baz: Baz)", |_| Ok(()))
    }

    #[test]
    fn test_set_and_get() {
        let mut registry = ClassMappingRegistry::new();
        let bar = bar_class();
        let bar_key = Key::new("bar");
        let foo_key = Key::new("foo");

        registry.set(
            bar.clone(),
            bar_key.clone(),
            parameter_keys([("foo", foo_key.clone())]),
        );

        assert!(registry.contains(&bar));
        let mapping = registry.get(&bar).unwrap().unwrap();
        assert_eq!(mapping.key, bar_key);
        assert_eq!(*mapping.parameter_names, vec!["foo", "baz"]);
        assert_eq!(mapping.parameter_keys.get("foo"), Some(&foo_key));
        assert!(mapping.parameter_keys.get("baz").is_none());

        assert_eq!(registry.get_key(&bar), Some(&bar_key));
        assert_eq!(registry.get_parameter_keys(&bar).unwrap().len(), 1);
        assert_eq!(registry.get_parameter_names(&bar).unwrap().unwrap().len(), 2);
    }

    #[test]
    fn test_get_unmapped() {
        let registry = ClassMappingRegistry::new();
        let bar = bar_class();
        assert!(registry.get(&bar).unwrap().is_none());
        assert!(registry.get_key(&bar).is_none());
        assert!(registry.get_parameter_keys(&bar).is_none());
        assert!(registry.get_parameter_names(&bar).unwrap().is_none());
    }

    #[test]
    fn test_names_cached_until_overwrite() {
        let mut registry = ClassMappingRegistry::new();
        let bar = bar_class();
        registry.set(bar.clone(), Key::new("bar"), ParameterKeys::new());
        assert!(!registry.is_parsed(&bar));

        let first = registry.get_parameter_names(&bar).unwrap().unwrap();
        let second = registry.get_parameter_names(&bar).unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.is_parsed(&bar));

        let new_key = Key::new("bar-2");
        registry.set(bar.clone(), new_key.clone(), ParameterKeys::new());
        assert!(!registry.is_parsed(&bar));
        assert_eq!(registry.get_key(&bar), Some(&new_key));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unset_and_clear() {
        let mut registry = ClassMappingRegistry::new();
        let bar = bar_class();
        let foo = Class::nullary("Foo", || ());
        registry.set(bar.clone(), Key::new("bar"), ParameterKeys::new());
        registry.set(foo.clone(), Key::new("foo"), ParameterKeys::new());

        assert!(registry.unset(&bar));
        assert!(!registry.unset(&bar));
        assert!(!registry.contains(&bar));
        assert!(registry.contains(&foo));

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_malformed_signature_surfaces_on_get() {
        let mut registry = ClassMappingRegistry::new();
        let broken = Class::from_signature("Broken", "fn new(a: Vec<u8", |_| Ok(()));
        registry.set(broken.clone(), Key::new("broken"), ParameterKeys::new());

        let err = registry.get(&broken).unwrap_err();
        assert_eq!(err.code(), error_codes::MALFORMED_SIGNATURE);
    }
}
