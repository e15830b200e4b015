//! Directed arcs between graph nodes.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::{NodeId, Weight};

/// A directed arc `from -> to` carrying a non-negative weight.
///
/// An undirected connection is always stored as a pair of arcs (`u -> v` in
/// `u`'s adjacency list and `v -> u` in `v`'s), inserted together by
/// [`Graph::add_edge`](crate::graph::Graph::add_edge).
///
/// Two edges are equal iff both endpoints and the weight match, so parallel
/// edges with different weights are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    from: NodeId,
    to: NodeId,
    weight: Weight,
}

impl Edge {
    /// Creates a new arc.
    #[inline]
    pub const fn new(from: NodeId, to: NodeId, weight: Weight) -> Self {
        Self { from, to, weight }
    }

    /// The node this arc leaves.
    #[inline]
    pub const fn from(&self) -> NodeId {
        self.from
    }

    /// The node this arc points to.
    #[inline]
    pub const fn to(&self) -> NodeId {
        self.to
    }

    /// The arc weight.
    #[inline]
    pub const fn weight(&self) -> Weight {
        self.weight
    }

    /// The same connection seen from the other endpoint.
    #[inline]
    pub const fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            weight: self.weight,
        }
    }

    /// Direction-independent identity: both halves of an undirected edge map
    /// to the same key.
    #[inline]
    pub fn undirected_key(&self) -> (NodeId, NodeId, Weight) {
        if self.from <= self.to {
            (self.from, self.to, self.weight)
        } else {
            (self.to, self.from, self.weight)
        }
    }

    /// Adjacency ordering: neighbor ordinal first, lighter parallel edges first.
    #[inline]
    pub(crate) fn sort_key(&self) -> (NodeId, Weight) {
        (self.to, self.weight)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_includes_weight() {
        let a = NodeId::new(0);
        let b = NodeId::new(1);
        assert_eq!(Edge::new(a, b, 3), Edge::new(a, b, 3));
        assert_ne!(Edge::new(a, b, 3), Edge::new(a, b, 4));
        assert_ne!(Edge::new(a, b, 3), Edge::new(b, a, 3));
    }

    #[test]
    fn undirected_key_ignores_direction() {
        let e = Edge::new(NodeId::new(4), NodeId::new(2), 7);
        assert_eq!(e.undirected_key(), e.reversed().undirected_key());
        assert_eq!(e.undirected_key(), (NodeId::new(2), NodeId::new(4), 7));
    }
}
