//! Node handles.

use serde::{Deserialize, Serialize};

/// Handle to a node in one [`SceneTree`](crate::SceneTree). Ids are handed
/// out in creation order and never reused, so a handle to a removed node
/// stays dangling instead of aliasing a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// Source of fresh [`NodeId`]s for a single tree.
#[derive(Debug, Default)]
pub(crate) struct NodeIds {
    last: u64,
}

impl NodeIds {
    pub(crate) fn fresh(&mut self) -> NodeId {
        self.last += 1;
        NodeId(self.last)
    }
}
