//! Type registry: the set of declared component types.
//!
//! Types are declared once, each with an optional base that must already be
//! known. Declaring a type precomputes its full ancestor tag set, so later
//! inheritance checks never consult the registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptor::TypeDescriptor;
use crate::error::TypeError;

/// Registry of all declared component types, keyed by global name.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Declare a type, optionally extending an already declared `base`.
    ///
    /// Declaring the same name with the same base again returns the existing
    /// descriptor.
    pub fn declare(
        &mut self,
        name: &str,
        base: Option<&str>,
    ) -> Result<Arc<TypeDescriptor>, TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidTypeName);
        }
        if let Some(existing) = self.types.get(name) {
            if existing.base() == base {
                return Ok(Arc::clone(existing));
            }
            return Err(TypeError::Redeclared {
                name: name.to_string(),
                existing: existing.base().map(str::to_string),
            });
        }

        let descriptor = match base {
            Some(base_name) => {
                let base = self.resolve(base_name)?;
                TypeDescriptor::derived(name, &base)
            }
            None => TypeDescriptor::root(name),
        };
        let descriptor = Arc::new(descriptor);
        self.types.insert(name.to_string(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Look up a declared type by its global name.
    pub fn resolve(&self, name: &str) -> Result<Arc<TypeDescriptor>, TypeError> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| TypeError::UnknownType(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns an iterator over all declared types.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TypeDescriptor>> {
        self.types.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_root_and_derived() {
        let mut registry = TypeRegistry::new();
        let health = registry.declare("Health", None).unwrap();
        let player = registry.declare("PlayerHealth", Some("Health")).unwrap();

        assert!(player.inherits(&health));
        assert!(!health.inherits(&player));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_declare_with_unknown_base_fails() {
        let mut registry = TypeRegistry::new();
        let err = registry.declare("PlayerHealth", Some("Health")).unwrap_err();
        assert!(matches!(err, TypeError::UnknownType(name) if name == "Health"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_declare_empty_name_fails() {
        let mut registry = TypeRegistry::new();
        assert!(matches!(
            registry.declare("", None),
            Err(TypeError::InvalidTypeName)
        ));
    }

    #[test]
    fn test_identical_redeclaration_returns_existing() {
        let mut registry = TypeRegistry::new();
        let first = registry.declare("Health", None).unwrap();
        let second = registry.declare("Health", None).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_conflicting_redeclaration_fails() {
        let mut registry = TypeRegistry::new();
        registry.declare("Health", None).unwrap();
        registry.declare("Shield", None).unwrap();
        registry.declare("PlayerHealth", Some("Health")).unwrap();

        let err = registry
            .declare("PlayerHealth", Some("Shield"))
            .unwrap_err();
        assert!(matches!(
            err,
            TypeError::Redeclared { existing: Some(base), .. } if base == "Health"
        ));
    }

    #[test]
    fn test_resolve() {
        let mut registry = TypeRegistry::new();
        registry.declare("Health", None).unwrap();
        assert_eq!(registry.resolve("Health").unwrap().name(), "Health");
        assert!(registry.contains("Health"));
        assert!(matches!(
            registry.resolve("Velocity"),
            Err(TypeError::UnknownType(_))
        ));
    }
}
