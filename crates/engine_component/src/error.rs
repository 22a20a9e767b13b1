//! Type registry error types.

/// Errors raised while declaring or resolving component types.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// No type with this global name has been declared.
    #[error("unknown component type: {0}")]
    UnknownType(String),

    /// A type was declared without a global name.
    #[error("component type name must not be empty")]
    InvalidTypeName,

    /// A type was declared twice with different base types.
    #[error("component type '{name}' already declared with base {existing:?}")]
    Redeclared {
        name: String,
        existing: Option<String>,
    },
}
