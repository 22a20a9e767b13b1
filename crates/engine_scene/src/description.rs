//! Scene descriptions: a JSON format for declaring types and building a
//! tree of nodes with attached components.
//!
//! ```json
//! {
//!   "types": [
//!     { "name": "Health" },
//!     { "name": "PlayerHealth", "base": "Health" }
//!   ],
//!   "root": {
//!     "name": "root",
//!     "components": [{ "type": "PlayerHealth", "properties": { "max": 100 } }],
//!     "children": [{ "name": "Sprite" }]
//!   }
//! }
//! ```
//!
//! Types are declared in order, so a base must appear before any type that
//! extends it.

use engine_component::{ScriptComponent, TypeRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::SceneError;
use crate::node::NodeId;
use crate::tree::SceneTree;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
    pub root: NodeDescription,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDescription {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentDescription>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDescription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDescription {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Declare every type and build the node tree.
    ///
    /// Components are attached through
    /// [`SceneTree::add_component`], so a node listing the same type twice
    /// keeps the last one.
    pub fn build(&self) -> Result<(TypeRegistry, SceneTree), SceneError> {
        let mut registry = TypeRegistry::new();
        for declaration in &self.types {
            registry.declare(&declaration.name, declaration.base.as_deref())?;
        }

        let mut tree = SceneTree::new(self.root.name.clone());
        let root = tree.root();
        attach_components(&mut tree, &registry, root, &self.root)?;
        for child in &self.root.children {
            attach_subtree(&mut tree, &registry, root, child)?;
        }

        info!(
            types = registry.len(),
            nodes = tree.node_count(),
            "built scene from description"
        );
        Ok((registry, tree))
    }
}

fn attach_subtree(
    tree: &mut SceneTree,
    registry: &TypeRegistry,
    parent: NodeId,
    description: &NodeDescription,
) -> Result<(), SceneError> {
    let node = tree.add_child(parent, description.name.clone())?;
    attach_components(tree, registry, node, description)?;
    for child in &description.children {
        attach_subtree(tree, registry, node, child)?;
    }
    Ok(())
}

fn attach_components(
    tree: &mut SceneTree,
    registry: &TypeRegistry,
    node: NodeId,
    description: &NodeDescription,
) -> Result<(), SceneError> {
    for component in &description.components {
        let descriptor = registry.resolve(&component.type_name)?;
        let component = ScriptComponent::new(descriptor).with_properties(component.properties.clone());
        tree.add_component(node, component.into_ref())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use engine_component::TypeError;

    use super::*;

    const SCENE: &str = r#"{
        "types": [
            { "name": "Health" },
            { "name": "PlayerHealth", "base": "Health" },
            { "name": "Velocity" }
        ],
        "root": {
            "name": "root",
            "components": [{ "type": "Velocity" }],
            "children": [
                {
                    "name": "Player",
                    "components": [
                        { "type": "PlayerHealth", "properties": { "max": 100 } }
                    ],
                    "children": [{ "name": "Sprite" }]
                },
                { "name": "Enemy", "components": [{ "type": "Health" }] }
            ]
        }
    }"#;

    #[test]
    fn test_build_declares_types_and_nodes() {
        let (registry, tree) = SceneDescription::from_json(SCENE).unwrap().build().unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(tree.node_count(), 4);
        let player = tree.find_by_path("/root/Player").unwrap();
        assert!(tree.find_by_path("/root/Player/Sprite").is_some());
        assert_eq!(tree.component_names(player), Some(vec!["PlayerHealth"]));
    }

    #[test]
    fn test_built_components_carry_properties() {
        let (registry, tree) = SceneDescription::from_json(SCENE).unwrap().build().unwrap();
        let player = tree.find_by_path("/root/Player").unwrap();
        let health = registry.resolve("Health").unwrap();

        let component = tree
            .get_component_as::<ScriptComponent>(player, &health)
            .unwrap()
            .unwrap();
        assert_eq!(component.property("max"), Some(&Value::from(100)));
    }

    #[test]
    fn test_recursive_query_over_built_scene() {
        let (registry, tree) = SceneDescription::from_json(SCENE).unwrap().build().unwrap();
        let health = registry.resolve("Health").unwrap();

        let found = tree.get_components_recursive(tree.root(), &health).unwrap();
        let names: Vec<_> = found.iter().filter_map(|c| c.type_name()).collect();
        assert_eq!(names, vec!["PlayerHealth", "Health"]);
    }

    #[test]
    fn test_undeclared_component_type_fails() {
        let text = r#"{ "root": { "name": "root", "components": [{ "type": "Ghost" }] } }"#;
        let err = SceneDescription::from_json(text).unwrap().build().unwrap_err();
        assert!(matches!(err, SceneError::Type(TypeError::UnknownType(ref name)) if name == "Ghost"));
    }

    #[test]
    fn test_base_declared_after_derived_fails() {
        let text = r#"{
            "types": [{ "name": "PlayerHealth", "base": "Health" }, { "name": "Health" }],
            "root": { "name": "root" }
        }"#;
        let err = SceneDescription::from_json(text).unwrap().build().unwrap_err();
        assert!(matches!(err, SceneError::Type(TypeError::UnknownType(_))));
    }

    #[test]
    fn test_malformed_json_fails() {
        assert!(matches!(
            SceneDescription::from_json("{ \"root\": 3 }"),
            Err(SceneError::Json(_))
        ));
    }
}
