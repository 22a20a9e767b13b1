//! Runs a configured component query against a built scene.

use anyhow::{Context, Result, anyhow};
use engine_component::{ComponentRef, ScriptComponent, TypeRegistry};
use engine_scene::{NodeId, SceneTree};
use serde_json::Value;

use crate::config::AppConfig;

/// One matched component, ready for printing.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryHit {
    /// Path of the node the component is attached to.
    pub path: String,
    pub type_name: String,
    pub properties: Value,
}

impl std::fmt::Display for QueryHit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.path, self.type_name, self.properties)
    }
}

/// Resolve the configured type and start node, then run the lookup the
/// flags select.
pub fn run(config: &AppConfig, registry: &TypeRegistry, tree: &SceneTree) -> Result<Vec<QueryHit>> {
    let component_type = registry
        .resolve(&config.component_type)
        .context("resolving --type")?;
    let node = match &config.node {
        Some(path) => tree
            .find_by_path(path)
            .ok_or_else(|| anyhow!("no node at path {path}"))?,
        None => tree.root(),
    };

    let found: Vec<(NodeId, ComponentRef)> = match (config.recursive, config.all) {
        (false, false) => tree
            .get_component(node, &component_type, config.assert_exists)?
            .map(|component| (node, component))
            .into_iter()
            .collect(),
        (true, false) => tree
            .locate_component_recursive(node, &component_type, config.assert_exists)?
            .into_iter()
            .collect(),
        (false, true) => tree
            .get_components(node, &component_type)?
            .into_iter()
            .map(|component| (node, component))
            .collect(),
        (true, true) => tree.locate_components_recursive(node, &component_type)?,
    };

    Ok(found
        .iter()
        .map(|(owner, component)| to_hit(tree, *owner, component))
        .collect())
}

fn to_hit(tree: &SceneTree, owner: NodeId, component: &ComponentRef) -> QueryHit {
    let properties = component
        .as_any()
        .downcast_ref::<ScriptComponent>()
        .map(|script| Value::Object(script.properties().clone()))
        .unwrap_or(Value::Null);
    QueryHit {
        path: tree.path(owner).unwrap_or_else(|| owner.to_string()),
        type_name: component.type_name().unwrap_or_default().to_string(),
        properties,
    }
}
