//! Type descriptors: the runtime identity of a component type.
//!
//! A [`TypeDescriptor`] carries a component type's **global name** and the
//! precomputed set of type tags it satisfies (its own [`ComponentTypeId`]
//! plus every ancestor's). Inheritance checks are set-membership tests, so
//! no class hierarchy has to be walked at lookup time.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A unique identifier for a component type, derived from its global name
/// using the FNV-1a 64-bit hash algorithm.
///
/// The ID is deterministic and language-neutral: applying FNV-1a to the same
/// UTF-8 name bytes always produces the same `ComponentTypeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentTypeId`] from a global type name.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }
}

/// The runtime identity of a component type.
///
/// Descriptors are normally produced by
/// [`TypeRegistry::declare`](crate::TypeRegistry::declare), which guarantees
/// the base type exists. They can also be built directly with
/// [`TypeDescriptor::root`] and [`TypeDescriptor::derived`].
///
/// A descriptor with an empty name is **unnamed**: it exists, but has no
/// resolvable global name and is rejected by component lookups.
///
/// Descriptors are only built through the constructors below, so `id` is
/// always the hash of `name` and `tags` always contains `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: String,
    id: ComponentTypeId,
    base: Option<String>,
    /// Own id plus every ancestor id.
    tags: BTreeSet<ComponentTypeId>,
}

impl TypeDescriptor {
    /// A type with no base.
    #[must_use]
    pub fn root(name: impl Into<String>) -> Self {
        let name = name.into();
        let id = ComponentTypeId::from_name(&name);
        Self {
            name,
            id,
            base: None,
            tags: BTreeSet::from([id]),
        }
    }

    /// A type that extends `base`, inheriting all of its tags.
    #[must_use]
    pub fn derived(name: impl Into<String>, base: &TypeDescriptor) -> Self {
        let name = name.into();
        let id = ComponentTypeId::from_name(&name);
        let mut tags = base.tags.clone();
        tags.insert(id);
        Self {
            name,
            id,
            base: Some(base.name.clone()),
            tags,
        }
    }

    /// A descriptor without a global name.
    #[must_use]
    pub fn unnamed() -> Self {
        Self::root(String::new())
    }

    /// The global type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn id(&self) -> ComponentTypeId {
        self.id
    }

    /// Name of the direct base type, if any.
    #[must_use]
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Every type tag this descriptor satisfies, including its own.
    pub fn tags(&self) -> impl Iterator<Item = ComponentTypeId> + '_ {
        self.tags.iter().copied()
    }

    /// Returns `true` if the descriptor has a non-empty global name.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }

    /// Returns `true` if this type is `other` or extends it, directly or
    /// transitively.
    #[must_use]
    pub fn inherits(&self, other: &TypeDescriptor) -> bool {
        self.tags.contains(&other.id)
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name.is_empty() {
            f.write_str("<unnamed>")
        } else {
            f.write_str(&self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id_from_name_is_deterministic() {
        let id = ComponentTypeId::from_name("Health");
        assert_eq!(id, ComponentTypeId::from_name("Health"));
        assert_ne!(id, ComponentTypeId::from_name("Velocity"));
    }

    #[test]
    fn test_fnv1a_known_vector() {
        // FNV-1a 64-bit of empty string is the offset basis itself.
        assert_eq!(
            ComponentTypeId::from_name(""),
            ComponentTypeId(0xcbf2_9ce4_8422_2325)
        );
    }

    #[test]
    fn test_root_inherits_itself_only() {
        let health = TypeDescriptor::root("Health");
        let velocity = TypeDescriptor::root("Velocity");
        assert!(health.inherits(&health));
        assert!(!health.inherits(&velocity));
        assert_eq!(health.base(), None);
    }

    #[test]
    fn test_derived_inherits_transitively() {
        let base = TypeDescriptor::root("Health");
        let mid = TypeDescriptor::derived("ActorHealth", &base);
        let leaf = TypeDescriptor::derived("PlayerHealth", &mid);

        assert!(leaf.inherits(&mid));
        assert!(leaf.inherits(&base));
        assert!(mid.inherits(&base));
        assert!(!base.inherits(&leaf));
        assert_eq!(leaf.base(), Some("ActorHealth"));
        assert_eq!(leaf.tags().count(), 3);
    }

    #[test]
    fn test_constructors_keep_id_and_tags_consistent() {
        let base = TypeDescriptor::root("Health");
        let leaf = TypeDescriptor::derived("PlayerHealth", &base);

        for descriptor in [&base, &leaf] {
            assert_eq!(descriptor.id(), ComponentTypeId::from_name(descriptor.name()));
            assert!(descriptor.tags().any(|tag| tag == descriptor.id()));
        }
        assert!(leaf.tags().any(|tag| tag == base.id()));
    }

    #[test]
    fn test_unnamed_is_invalid() {
        assert!(!TypeDescriptor::unnamed().is_valid());
        assert!(TypeDescriptor::root("Health").is_valid());
        assert_eq!(TypeDescriptor::unnamed().to_string(), "<unnamed>");
    }
}
