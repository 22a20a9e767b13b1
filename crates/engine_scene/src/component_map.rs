//! The per-node component map.
//!
//! An ordered mapping from component type name to [`ComponentRef`]. Order is
//! insertion order; overwriting an existing name keeps its slot. Nodes hold
//! only a handful of components, so lookups are linear scans.

use engine_component::{ComponentRef, TypeDescriptor};

#[derive(Debug, Clone, Default)]
pub struct ComponentMap {
    entries: Vec<(String, ComponentRef)>,
}

impl ComponentMap {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or overwrite the entry for `name`, returning the previous
    /// component if there was one.
    pub fn insert(&mut self, name: impl Into<String>, component: ComponentRef) -> Option<ComponentRef> {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, component)),
            None => {
                self.entries.push((name, component));
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ComponentRef> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, component)| component)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove the entry for `name`. Remaining entries keep their order.
    pub fn remove(&mut self, name: &str) -> Option<ComponentRef> {
        let pos = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(pos).1)
    }

    /// The first entry, in map order, whose component inherits from `ty`.
    #[must_use]
    pub fn first_inheriting(&self, ty: &TypeDescriptor) -> Option<(&str, &ComponentRef)> {
        self.iter()
            .find(|(_, component)| inherits(component, ty))
    }

    /// Every component whose key is `ty`'s name or whose type inherits from
    /// `ty`, in map order.
    pub fn matching<'a>(&'a self, ty: &'a TypeDescriptor) -> impl Iterator<Item = &'a ComponentRef> + 'a {
        self.iter()
            .filter(move |(key, component)| *key == ty.name() || inherits(component, ty))
            .map(|(_, component)| component)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComponentRef)> {
        self.entries
            .iter()
            .map(|(key, component)| (key.as_str(), component))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn inherits(component: &ComponentRef, ty: &TypeDescriptor) -> bool {
    component
        .descriptor()
        .is_some_and(|descriptor| descriptor.inherits(ty))
}
