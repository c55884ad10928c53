//! Error types for host-API misuse.
//!
//! Lifecycle orchestration itself never fails: missing listener targets,
//! unknown properties and unchanged attributes are silent no-ops. Errors are
//! reserved for calls the host environment should reject outright.

pub use crate::selector::SelectorError;

/// Errors from [`ElementRegistry::define`](crate::registry::ElementRegistry::define).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefineError {
    #[error("invalid custom element name: {0:?}")]
    InvalidName(String),
    #[error("custom element {0:?} is already defined")]
    AlreadyDefined(String),
}

/// Errors from tree mutation and attribute access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node does not exist")]
    NodeNotFound,
    #[error("node is not an element")]
    NotAnElement,
    #[error("hierarchy request error: {0}")]
    HierarchyRequest(&'static str),
}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Define(#[from] DefineError),
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// Convenience alias used by the [`Runtime`](crate::runtime::Runtime) API.
pub type Result<T, E = Error> = std::result::Result<T, E>;
