//! DOM arena: slotmap-backed document tree with shadow roots and selector queries.

pub mod node;
pub mod query;
pub mod serialize;
pub mod tree;

pub use node::{NodeData, NodeId, NodeKind, ShadowRootMode};
pub use tree::Dom;
