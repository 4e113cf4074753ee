//! DOM arena: slotmap-backed element tree with part/attribute queries.

pub mod node;
pub mod parts;
pub mod query;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use parts::PartSet;
pub use tree::Dom;
