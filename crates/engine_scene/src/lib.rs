//! # engine_scene
//!
//! A scene tree whose nodes carry named components, with lookups that match
//! by exact type or by inheritance.
//!
//! This crate provides:
//!
//! - [`SceneTree`] — nodes with ordered children and diagnostic paths.
//! - [`ComponentMap`] — the per-node name → component store, created lazily.
//! - Component operations on [`SceneTree`]: `add_component`,
//!   `get_component`, `get_components`, `get_component_recursive`,
//!   `get_components_recursive`, `remove_component`.
//! - [`SceneDescription`] — builds a tree and type registry from JSON.

pub mod component_map;
pub mod components;
pub mod description;
pub mod error;
pub mod node;
pub mod tree;

pub use component_map::ComponentMap;
pub use description::{ComponentDescription, NodeDescription, SceneDescription, TypeDeclaration};
pub use error::SceneError;
pub use node::NodeId;
pub use tree::SceneTree;
