//! Graph representation: the node arena, arcs, and paths over them.
//!
//! - `basic`: nodes, edges and the graph store
//! - `path`: candidate routes with accumulated weight

pub mod basic;
pub mod path;
pub(crate) mod access;

pub use basic::{Edge, Graph, GraphStatistics, Node, NodeId};
pub use path::{Path, PathDisplay};

/// Edge and path weight. Weights are non-negative integers.
pub type Weight = u64;
