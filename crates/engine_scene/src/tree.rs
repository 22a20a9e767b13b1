//! Scene tree: an arena of named nodes with ordered children.
//!
//! Every node may own one [`ComponentMap`]. The map starts out absent and is
//! created by the first successful `add_component` on that node (see
//! [`crate::components`]).

use std::collections::HashMap;

use tracing::debug;

use crate::component_map::ComponentMap;
use crate::error::SceneError;
use crate::node::{NodeId, NodeIds};

#[derive(Debug)]
pub(crate) struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub(crate) components: Option<ComponentMap>,
}

impl Node {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            components: None,
        }
    }
}

/// A tree of nodes rooted at a single root node.
#[derive(Debug)]
pub struct SceneTree {
    root: NodeId,
    nodes: HashMap<NodeId, Node>,
    ids: NodeIds,
}

impl SceneTree {
    /// Create a tree containing only a root node.
    #[must_use]
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut ids = NodeIds::default();
        let root = ids.fresh();
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(root_name.into(), None));
        Self {
            root,
            nodes,
            ids,
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    // -- Structure --

    /// Append a new child to `parent`. The child goes after any existing
    /// children.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
    ) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(&parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        let id = self.ids.fresh();
        self.nodes.insert(id, Node::new(name.into(), Some(parent)));
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(id);
        }
        Ok(id)
    }

    /// Detach `node` from its parent and drop it together with all of its
    /// descendants. Components referenced only by dropped nodes are released.
    pub fn remove_subtree(&mut self, node: NodeId) -> Result<(), SceneError> {
        if node == self.root {
            return Err(SceneError::RootRemoval);
        }
        let parent = self
            .nodes
            .get(&node)
            .ok_or(SceneError::NodeNotFound(node))?
            .parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|&child| child != node);
        }

        let mut pending = vec![node];
        let mut removed = 0usize;
        while let Some(id) = pending.pop() {
            if let Some(data) = self.nodes.remove(&id) {
                pending.extend(data.children);
                removed += 1;
            }
        }
        debug!(%node, removed, "removed subtree");
        Ok(())
    }

    // -- Queries --

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|n| n.name.as_str())
    }

    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    /// Children of `node` in order. Empty for unknown nodes.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Absolute path of `node`, e.g. `/root/Player/Sprite`.
    #[must_use]
    pub fn path(&self, node: NodeId) -> Option<String> {
        let mut segments = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let data = self.nodes.get(&id)?;
            segments.push(data.name.as_str());
            current = data.parent;
        }
        segments.reverse();
        Some(format!("/{}", segments.join("/")))
    }

    /// Resolve an absolute path produced by [`SceneTree::path`]. When
    /// siblings share a name, the first one wins.
    #[must_use]
    pub fn find_by_path(&self, path: &str) -> Option<NodeId> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        if segments.next()? != self.name(self.root)? {
            return None;
        }
        segments.try_fold(self.root, |current, segment| {
            self.children(current)
                .iter()
                .copied()
                .find(|&child| self.name(child) == Some(segment))
        })
    }

    /// Component names on `node`, in map order. `None` if the node has never
    /// had a component added.
    #[must_use]
    pub fn component_names(&self, node: NodeId) -> Option<Vec<&str>> {
        self.component_map(node).map(|map| map.names().collect())
    }

    /// Returns `true` if `node` owns a component map, even an empty one.
    #[must_use]
    pub fn has_component_map(&self, node: NodeId) -> bool {
        self.component_map(node).is_some()
    }

    pub(crate) fn component_map(&self, node: NodeId) -> Option<&ComponentMap> {
        self.nodes.get(&node).and_then(|n| n.components.as_ref())
    }

    pub(crate) fn node_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node)
    }

    /// Path for diagnostics, falling back to the raw id.
    pub(crate) fn display_path(&self, node: NodeId) -> String {
        self.path(node).unwrap_or_else(|| node.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (SceneTree, NodeId, NodeId, NodeId) {
        let mut tree = SceneTree::new("root");
        let player = tree.add_child(tree.root(), "Player").unwrap();
        let sprite = tree.add_child(player, "Sprite").unwrap();
        let enemy = tree.add_child(tree.root(), "Enemy").unwrap();
        (tree, player, sprite, enemy)
    }

    #[test]
    fn test_new_tree_has_root_only() {
        let tree = SceneTree::new("root");
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.name(tree.root()), Some("root"));
        assert_eq!(tree.parent(tree.root()), None);
        assert!(tree.children(tree.root()).is_empty());
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let (tree, player, sprite, enemy) = sample();
        assert_eq!(tree.children(tree.root()), &[player, enemy]);
        assert_eq!(tree.children(player), &[sprite]);
        assert_eq!(tree.parent(sprite), Some(player));
    }

    #[test]
    fn test_add_child_to_missing_parent_fails() {
        let mut tree = SceneTree::new("root");
        let err = tree.add_child(NodeId(99), "Orphan").unwrap_err();
        assert!(matches!(err, SceneError::NodeNotFound(NodeId(99))));
    }

    #[test]
    fn test_path() {
        let (tree, _, sprite, _) = sample();
        assert_eq!(tree.path(tree.root()).as_deref(), Some("/root"));
        assert_eq!(tree.path(sprite).as_deref(), Some("/root/Player/Sprite"));
        assert_eq!(tree.path(NodeId(99)), None);
        assert_eq!(tree.display_path(NodeId(99)), "Node(99)");
    }

    #[test]
    fn test_find_by_path() {
        let (tree, player, sprite, _) = sample();
        assert_eq!(tree.find_by_path("/root"), Some(tree.root()));
        assert_eq!(tree.find_by_path("/root/Player"), Some(player));
        assert_eq!(tree.find_by_path("/root/Player/Sprite"), Some(sprite));
        assert_eq!(tree.find_by_path("/root/Missing"), None);
        assert_eq!(tree.find_by_path("/other/Player"), None);
        assert_eq!(tree.find_by_path(""), None);
    }

    #[test]
    fn test_remove_subtree() {
        let (mut tree, player, sprite, enemy) = sample();
        tree.remove_subtree(player).unwrap();

        assert!(!tree.contains(player));
        assert!(!tree.contains(sprite));
        assert_eq!(tree.children(tree.root()), &[enemy]);
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let (mut tree, player, ..) = sample();
        tree.remove_subtree(player).unwrap();
        let fresh = tree.add_child(tree.root(), "Player").unwrap();

        assert_ne!(fresh, player);
        assert!(!tree.contains(player));
        assert_eq!(tree.find_by_path("/root/Player"), Some(fresh));
    }

    #[test]
    fn test_remove_root_fails() {
        let (mut tree, ..) = sample();
        assert!(matches!(
            tree.remove_subtree(tree.root()),
            Err(SceneError::RootRemoval)
        ));
    }

    #[test]
    fn test_component_map_absent_by_default() {
        let (tree, player, ..) = sample();
        assert!(!tree.has_component_map(player));
        assert!(tree.component_names(player).is_none());
    }
}
