//! Core [`Component`] trait and the dynamic [`ScriptComponent`].
//!
//! A component is any object that can report a [`TypeDescriptor`]. Scene
//! nodes store components by shared reference ([`ComponentRef`]); the node
//! never owns a component exclusively, so removing it from a node does not
//! destroy it.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::descriptor::TypeDescriptor;

/// A shared reference to a component stored on a scene node.
pub type ComponentRef = Arc<dyn Component>;

/// The core component trait.
///
/// # Examples
///
/// ```rust
/// use std::any::Any;
/// use engine_component::{Component, TypeDescriptor};
///
/// #[derive(Debug)]
/// struct Health {
///     descriptor: TypeDescriptor,
///     current: f32,
/// }
///
/// impl Component for Health {
///     fn descriptor(&self) -> Option<&TypeDescriptor> { Some(&self.descriptor) }
///     fn as_any(&self) -> &dyn Any { self }
/// }
/// ```
pub trait Component: Any + Send + Sync + fmt::Debug {
    /// The component's runtime type, or `None` if it has none.
    fn descriptor(&self) -> Option<&TypeDescriptor>;

    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// The global type name, if the component has a valid descriptor.
    fn type_name(&self) -> Option<&str> {
        self.descriptor()
            .filter(|d| d.is_valid())
            .map(TypeDescriptor::name)
    }
}

/// A component defined purely by data: a descriptor plus JSON properties.
///
/// This is how scene descriptions attach components whose types exist only
/// in the [`TypeRegistry`](crate::TypeRegistry), not as Rust types.
#[derive(Debug, Clone)]
pub struct ScriptComponent {
    descriptor: Option<Arc<TypeDescriptor>>,
    properties: Map<String, Value>,
}

impl ScriptComponent {
    /// Create a component of the given type with no properties.
    #[must_use]
    pub fn new(descriptor: Arc<TypeDescriptor>) -> Self {
        Self {
            descriptor: Some(descriptor),
            properties: Map::new(),
        }
    }

    /// Create a component that carries no type descriptor at all.
    #[must_use]
    pub fn untyped() -> Self {
        Self {
            descriptor: None,
            properties: Map::new(),
        }
    }

    /// Set a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Replace all properties.
    #[must_use]
    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = properties;
        self
    }

    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    #[must_use]
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Wrap in a [`ComponentRef`].
    #[must_use]
    pub fn into_ref(self) -> ComponentRef {
        Arc::new(self)
    }
}

impl Component for ScriptComponent {
    fn descriptor(&self) -> Option<&TypeDescriptor> {
        self.descriptor.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
