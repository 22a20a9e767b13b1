//! Component operations on scene nodes.
//!
//! A node carries at most one component per exact type name. Lookups match
//! in two steps:
//!
//! 1. **Exact**: an entry keyed by the requested type's global name.
//! 2. **Inheritance**: otherwise, the first entry (in map order) whose
//!    component type inherits from the requested type.
//!
//! The `*_recursive` variants apply the same matching to the node itself and
//! then depth-first over its children, in child order.
//!
//! Bad arguments (a node not in the tree, a type without a global name) are
//! logged and returned as errors. An absent component is a normal outcome
//! (`Ok(None)` or an empty `Vec`) unless the caller passes `assert_exists`.

use std::sync::Arc;

use engine_component::{Component, ComponentRef, TypeDescriptor};
use tracing::{debug, error};

use crate::component_map::ComponentMap;
use crate::error::SceneError;
use crate::node::NodeId;
use crate::tree::SceneTree;

impl SceneTree {
    /// Attach `component` to `node`, keyed by its type's global name.
    ///
    /// Creates the node's component map on first use. An existing component
    /// with the same type name is replaced and returned.
    pub fn add_component(
        &mut self,
        node: NodeId,
        component: ComponentRef,
    ) -> Result<Option<ComponentRef>, SceneError> {
        self.require_node(node)?;
        let name = match component.descriptor() {
            None => return Err(report(SceneError::MissingTypeDescriptor)),
            Some(descriptor) if !descriptor.is_valid() => {
                return Err(report(SceneError::InvalidType));
            }
            Some(descriptor) => descriptor.name().to_string(),
        };

        let data = self
            .node_mut(node)
            .ok_or_else(|| report(SceneError::NodeNotFound(node)))?;
        let map = data.components.get_or_insert_with(ComponentMap::new);
        let replaced = map.insert(name.as_str(), component);
        if replaced.is_some() {
            debug!(%node, component = %name, "replaced existing component");
        }
        Ok(replaced)
    }

    /// Find a component on `node` matching `component_type`.
    ///
    /// With `assert_exists`, a miss is an error instead of `Ok(None)`.
    pub fn get_component(
        &self,
        node: NodeId,
        component_type: &TypeDescriptor,
        assert_exists: bool,
    ) -> Result<Option<ComponentRef>, SceneError> {
        self.require_node(node)?;
        require_type(component_type)?;
        match self.find_local(node, component_type) {
            Some(found) => Ok(Some(Arc::clone(found))),
            None => self.missing(node, component_type, assert_exists),
        }
    }

    /// All components on `node` matching `component_type`, in map order.
    pub fn get_components(
        &self,
        node: NodeId,
        component_type: &TypeDescriptor,
    ) -> Result<Vec<ComponentRef>, SceneError> {
        self.require_node(node)?;
        require_type(component_type)?;
        let mut found = Vec::new();
        self.collect_local(node, component_type, &mut found);
        Ok(found)
    }

    /// Like [`SceneTree::get_component`], but also searches the subtree
    /// depth-first. The first match wins.
    pub fn get_component_recursive(
        &self,
        node: NodeId,
        component_type: &TypeDescriptor,
        assert_exists: bool,
    ) -> Result<Option<ComponentRef>, SceneError> {
        Ok(self
            .locate_component_recursive(node, component_type, assert_exists)?
            .map(|(_, found)| found))
    }

    /// Matches on `node` followed by matches from each child's subtree, in
    /// child order.
    pub fn get_components_recursive(
        &self,
        node: NodeId,
        component_type: &TypeDescriptor,
    ) -> Result<Vec<ComponentRef>, SceneError> {
        Ok(self
            .locate_components_recursive(node, component_type)?
            .into_iter()
            .map(|(_, found)| found)
            .collect())
    }

    /// [`SceneTree::get_component_recursive`] that also reports which node
    /// the match is attached to.
    pub fn locate_component_recursive(
        &self,
        node: NodeId,
        component_type: &TypeDescriptor,
        assert_exists: bool,
    ) -> Result<Option<(NodeId, ComponentRef)>, SceneError> {
        self.require_node(node)?;
        require_type(component_type)?;
        match self.find_recursive(node, component_type) {
            Some((owner, found)) => Ok(Some((owner, Arc::clone(found)))),
            None => self.missing(node, component_type, assert_exists),
        }
    }

    /// [`SceneTree::get_components_recursive`] with each match paired with
    /// the node it is attached to.
    pub fn locate_components_recursive(
        &self,
        node: NodeId,
        component_type: &TypeDescriptor,
    ) -> Result<Vec<(NodeId, ComponentRef)>, SceneError> {
        self.require_node(node)?;
        require_type(component_type)?;
        let mut found = Vec::new();
        self.collect_recursive(node, component_type, &mut found);
        Ok(found)
    }

    /// Remove the component keyed by `component_name` from `node`.
    ///
    /// Missing maps and missing names are a no-op. The removed reference is
    /// returned; the component itself lives on while other references exist.
    pub fn remove_component(
        &mut self,
        node: NodeId,
        component_name: &str,
    ) -> Result<Option<ComponentRef>, SceneError> {
        let data = self
            .node_mut(node)
            .ok_or_else(|| report(SceneError::NodeNotFound(node)))?;
        Ok(data
            .components
            .as_mut()
            .and_then(|map| map.remove(component_name)))
    }

    /// Returns `true` if [`SceneTree::get_component`] would find a match.
    pub fn has_component(
        &self,
        node: NodeId,
        component_type: &TypeDescriptor,
    ) -> Result<bool, SceneError> {
        Ok(self.get_component(node, component_type, false)?.is_some())
    }

    /// Find a component matching `component_type` and downcast it to `T`.
    ///
    /// Returns `Ok(None)` when nothing matches or the match is not a `T`.
    pub fn get_component_as<T: Component>(
        &self,
        node: NodeId,
        component_type: &TypeDescriptor,
    ) -> Result<Option<&T>, SceneError> {
        self.require_node(node)?;
        require_type(component_type)?;
        Ok(self
            .find_local(node, component_type)
            .and_then(|found| found.as_any().downcast_ref::<T>()))
    }

    fn find_local(&self, node: NodeId, ty: &TypeDescriptor) -> Option<&ComponentRef> {
        let map = self.component_map(node)?;
        if let Some(exact) = map.get(ty.name()) {
            return Some(exact);
        }
        let (key, found) = map.first_inheriting(ty)?;
        debug!(
            requested = ty.name(),
            found = key,
            path = %self.display_path(node),
            "matched component through inheritance"
        );
        Some(found)
    }

    fn find_recursive(&self, node: NodeId, ty: &TypeDescriptor) -> Option<(NodeId, &ComponentRef)> {
        self.find_local(node, ty).map(|found| (node, found)).or_else(|| {
            self.children(node)
                .iter()
                .find_map(|&child| self.find_recursive(child, ty))
        })
    }

    fn collect_local(&self, node: NodeId, ty: &TypeDescriptor, out: &mut Vec<ComponentRef>) {
        if let Some(map) = self.component_map(node) {
            out.extend(map.matching(ty).cloned());
        }
    }

    fn collect_recursive(
        &self,
        node: NodeId,
        ty: &TypeDescriptor,
        out: &mut Vec<(NodeId, ComponentRef)>,
    ) {
        if let Some(map) = self.component_map(node) {
            out.extend(map.matching(ty).map(|found| (node, Arc::clone(found))));
        }
        for &child in self.children(node) {
            self.collect_recursive(child, ty, out);
        }
    }

    fn missing<T>(
        &self,
        node: NodeId,
        ty: &TypeDescriptor,
        assert_exists: bool,
    ) -> Result<Option<T>, SceneError> {
        if assert_exists {
            return Err(report(SceneError::NotFound {
                type_name: ty.name().to_string(),
                path: self.display_path(node),
            }));
        }
        Ok(None)
    }

    fn require_node(&self, node: NodeId) -> Result<(), SceneError> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(report(SceneError::NodeNotFound(node)))
        }
    }
}

fn require_type(ty: &TypeDescriptor) -> Result<(), SceneError> {
    if ty.is_valid() {
        Ok(())
    } else {
        Err(report(SceneError::InvalidType))
    }
}

fn report(err: SceneError) -> SceneError {
    error!(error = %err, "component operation failed");
    err
}
