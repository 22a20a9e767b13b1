//! # engine_component
//!
//! Defines what a scene component is and how its type identity works.
//!
//! This crate provides:
//!
//! - [`Component`] trait — the contract every attachable component satisfies.
//! - [`TypeDescriptor`] — a type's global name plus its precomputed
//!   inheritance tags.
//! - [`TypeRegistry`] — declares types and resolves names to descriptors.
//! - [`ScriptComponent`] — a data-only component with JSON properties.

pub mod component;
pub mod descriptor;
pub mod error;
pub mod registry;

pub use component::{Component, ComponentRef, ScriptComponent};
pub use descriptor::{ComponentTypeId, TypeDescriptor};
pub use error::TypeError;
pub use registry::TypeRegistry;
