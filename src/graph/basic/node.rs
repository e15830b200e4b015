//! Graph nodes and their strongly-typed indices.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::edge::Edge;
use super::invariant::{invariant_assert, is_adjacency_sorted};
use crate::graph::Weight;

/// A strongly-typed index for a node in a [`Graph`](crate::graph::Graph).
///
/// The index *is* the node's ordinal: it is assigned sequentially when the
/// payload is first inserted and never changes afterwards. Ordering on
/// `NodeId` is therefore the canonical tie-break order used by the solver.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    #[inline(always)]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx)
    }

    /// The node's ordinal, usable as an array index.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A vertex: a caller payload plus its adjacency list.
///
/// The adjacency list holds outgoing arcs sorted by neighbor ordinal (then by
/// weight), which makes every traversal over it deterministic.
#[derive(Debug, Clone)]
pub struct Node<T> {
    id: NodeId,
    payload: T,
    edges: Vec<Edge>,
}

impl<T> Node<T> {
    pub(crate) fn new(id: NodeId, payload: T) -> Self {
        Self {
            id,
            payload,
            edges: Vec::new(),
        }
    }

    /// This node's id (its ordinal).
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The caller payload.
    #[inline]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Outgoing arcs, sorted by neighbor ordinal.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of incident edges.
    #[inline]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// The first (lightest) arc to `to`, if any.
    pub fn edge_to(&self, to: NodeId) -> Option<&Edge> {
        let start = self.edges.partition_point(|e| e.to() < to);
        self.edges.get(start).filter(|e| e.to() == to)
    }

    /// Inserts an arc keeping the adjacency list sorted.
    ///
    /// Returns `false` if an equal arc (same endpoints and weight) already exists.
    pub(crate) fn insert_edge(&mut self, to: NodeId, weight: Weight) -> bool {
        let edge = Edge::new(self.id, to, weight);
        match self.edges.binary_search_by(|e| e.sort_key().cmp(&edge.sort_key())) {
            Ok(_) => false,
            Err(pos) => {
                self.edges.insert(pos, edge);
                invariant_assert(is_adjacency_sorted(&self.edges), "adjacency list out of order");
                true
            }
        }
    }
}
