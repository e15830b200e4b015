//! Basic graph building blocks.
//!
//! This module contains the node/edge data types and the graph store that the
//! solver reads from.

pub mod edge;
pub mod node;
pub mod store;

mod invariant;

pub use edge::Edge;
pub use node::{Node, NodeId};
pub use store::{Graph, GraphStatistics};
