//! Scene-layer error types.

use engine_component::TypeError;

use crate::node::NodeId;

/// Errors that can occur during scene and component operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The node does not exist in this tree.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// The component does not expose a type descriptor.
    #[error("component has no type descriptor")]
    MissingTypeDescriptor,

    /// The type descriptor has no global name.
    #[error("component type is not valid: it has no global name")]
    InvalidType,

    /// A lookup with `assert_exists` found nothing.
    #[error("component {type_name} does not exist on node {path}")]
    NotFound { type_name: String, path: String },

    /// Attempted to remove the tree's root node.
    #[error("the root node cannot be removed")]
    RootRemoval,

    /// Type declaration or resolution failed.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// A scene description could not be parsed.
    #[error("invalid scene description: {0}")]
    Json(#[from] serde_json::Error),
}

impl SceneError {
    /// Returns `true` for errors caused by a bad node or type argument.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            SceneError::NodeNotFound(_)
                | SceneError::MissingTypeDescriptor
                | SceneError::InvalidType
        )
    }
}
