//! The graph store: an arena of nodes with sorted, symmetric adjacency lists.
//!
//! Nodes live in a `Vec` addressed by [`NodeId`]; arcs store the neighbor's id
//! rather than a reference, so there are no ownership cycles between nodes.
//! A payload index gives value-based node identity: inserting a payload equal
//! to one already present returns the existing node.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `insert_node` | \(O(1)\) amortized | Hash lookup plus append |
//! | `add_edge` | \(O(\text{degree})\) | Binary search plus sorted insert, twice |
//! | `edge_between` | \(O(\log \text{degree})\) | Binary search on sorted adjacency |
//! | `is_connected` | \(O(n + m)\) | Single stack-based DFS |
//! | `has_cycle` | \(O(n + m)\) | Parent-tracking DFS over every component |
//! | `find_top_node` | \(O(n)\) | One payload lookup per node |

use core::borrow::Borrow;
use core::fmt;
use std::collections::HashMap;
use std::hash::Hash;

use super::edge::Edge;
use super::invariant::{invariant_assert, is_adjacency_sorted};
use super::node::{Node, NodeId};
use crate::graph::access::visited::VisitedSet;
use crate::graph::{Path, Weight};

/// A weighted undirected graph over payloads of type `T`.
///
/// Every undirected connection is stored as two arcs, one in each endpoint's
/// adjacency list. The graph is built once per problem instance and is only
/// read by the solver.
#[derive(Debug, Clone)]
pub struct Graph<T> {
    nodes: Vec<Node<T>>,
    index: HashMap<T, NodeId>,
    edge_count: usize,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            edge_count: 0,
        }
    }
}

impl<T> Graph<T> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            edge_count: 0,
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges (each arc pair counts once).
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` if the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in ordinal order.
    #[inline]
    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    /// All node ids in ordinal order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(Node::id)
    }

    /// Returns the node for `id`, if it belongs to this graph.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.index())
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this graph.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<T> {
        assert!(
            id.index() < self.nodes.len(),
            "node {id} out of bounds for n={}",
            self.nodes.len()
        );
        &self.nodes[id.index()]
    }

    /// Returns the payload of `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this graph.
    #[inline]
    pub fn payload(&self, id: NodeId) -> &T {
        self.node(id).payload()
    }

    /// Number of edges incident to `id`.
    #[inline]
    pub fn degree(&self, id: NodeId) -> usize {
        self.node(id).degree()
    }

    /// Outgoing arcs of `id`, sorted by neighbor ordinal.
    #[inline]
    pub fn neighbors(&self, id: NodeId) -> &[Edge] {
        self.node(id).edges()
    }

    /// The lightest arc from `from` to `to`, if the two are adjacent.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.node(from).edge_to(to)
    }

    /// Adds an undirected edge between two existing nodes.
    ///
    /// Both arcs (`u -> v` and `v -> u`) are inserted together. Returns `false`
    /// if an equal edge (same endpoints and weight) was already present.
    ///
    /// # Panics
    /// Panics if `u` or `v` does not belong to this graph.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: Weight) -> bool {
        let n = self.nodes.len();
        assert!(u.index() < n, "from node {u} out of bounds for n={n}");
        assert!(v.index() < n, "to node {v} out of bounds for n={n}");

        if !self.nodes[u.index()].insert_edge(v, weight) {
            return false;
        }
        if u != v {
            let inserted = self.nodes[v.index()].insert_edge(u, weight);
            invariant_assert(inserted, "reverse arc existed without its forward half");
        }
        self.edge_count += 1;
        true
    }

    /// Returns `true` if every node is reachable from the first node.
    ///
    /// Uses a single stack-based depth-first traversal. An empty graph is
    /// vacuously connected.
    pub fn is_connected(&self) -> bool {
        let Some(first) = self.nodes.first() else {
            return true;
        };

        let mut visited = VisitedSet::new(self.nodes.len());
        let mut stack = vec![first.id()];
        visited.try_visit(first.id());

        while let Some(node) = stack.pop() {
            for edge in self.nodes[node.index()].edges() {
                if visited.try_visit(edge.to()) {
                    stack.push(edge.to());
                }
            }
        }

        visited.is_full()
    }

    /// Returns `true` if the graph contains a cycle.
    ///
    /// Each node remembers the node it was reached from; meeting an already
    /// visited neighbor other than that parent closes a cycle. Parallel arcs
    /// back to the parent do not count, self-loops do. Every component is
    /// searched.
    pub fn has_cycle(&self) -> bool {
        let mut visited = VisitedSet::new(self.nodes.len());
        let mut stack: Vec<(NodeId, Option<NodeId>)> = Vec::new();

        while let Some(seed) = visited.first_unvisited() {
            visited.try_visit(seed);
            stack.push((seed, None));

            while let Some((node, parent)) = stack.pop() {
                for edge in self.nodes[node.index()].edges() {
                    let other = edge.to();
                    if Some(other) == parent {
                        continue;
                    }
                    if other == node || !visited.try_visit(other) {
                        return true;
                    }
                    stack.push((other, Some(node)));
                }
            }
        }

        false
    }

    /// Returns the node with the fewest incident edges, ties broken by the
    /// lowest `rank`.
    ///
    /// Among nodes with equal degree and equal rank, the earliest inserted wins.
    pub fn find_top_node_by<K, F>(&self, mut rank: F) -> Option<NodeId>
    where
        K: Ord,
        F: FnMut(&Node<T>) -> K,
    {
        self.nodes
            .iter()
            .min_by_key(|node| (node.degree(), rank(node)))
            .map(Node::id)
    }

    /// Returns the payload-level statistics of the graph.
    pub fn statistics(&self) -> GraphStatistics {
        let node_count = self.nodes.len();
        let mut degrees: Vec<usize> = self.nodes.iter().map(Node::degree).collect();
        degrees.sort_unstable();

        let (min_degree, max_degree) = match (degrees.first(), degrees.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (0, 0),
        };
        let median_degree = if degrees.is_empty() {
            0
        } else if degrees.len() % 2 == 0 {
            (degrees[degrees.len() / 2 - 1] + degrees[degrees.len() / 2]) / 2
        } else {
            degrees[degrees.len() / 2]
        };
        let degree_sum: usize = degrees.iter().sum();

        GraphStatistics {
            node_count,
            edge_count: self.edge_count,
            min_degree,
            max_degree,
            median_degree,
            average_degree: if node_count == 0 {
                0.0
            } else {
                degree_sum as f64 / node_count as f64
            },
        }
    }

    /// Validates the structural invariants of the store.
    ///
    /// This method checks that:
    /// 1. Every node's id equals its position (dense, sequential ordinals)
    /// 2. Every adjacency list is sorted by neighbor ordinal
    /// 3. Every arc has its reverse half in the neighbor's list
    ///
    /// Returns `true` if all invariants hold.
    #[cfg(debug_assertions)]
    pub fn validate_invariants(&self) -> bool {
        for (pos, node) in self.nodes.iter().enumerate() {
            if node.id().index() != pos || !is_adjacency_sorted(node.edges()) {
                return false;
            }
            for edge in node.edges() {
                let Some(other) = self.nodes.get(edge.to().index()) else {
                    return false;
                };
                if !other.edges().contains(&edge.reversed()) {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: Eq + Hash + Clone> Graph<T> {
    /// Inserts `payload` unless an equal payload is already present.
    ///
    /// Returns the node id and whether a new node was created. New nodes get
    /// the next sequential ordinal.
    pub fn insert_node(&mut self, payload: T) -> (NodeId, bool) {
        if let Some(&id) = self.index.get(&payload) {
            return (id, false);
        }
        let id = NodeId::new(self.nodes.len());
        self.index.insert(payload.clone(), id);
        self.nodes.push(Node::new(id, payload));
        (id, true)
    }

    /// Inserts `payload` if needed and returns its node id.
    pub fn add_node(&mut self, payload: T) -> NodeId {
        self.insert_node(payload).0
    }

    /// Adds an undirected edge between two payloads, inserting either if it
    /// is not yet present.
    pub fn connect(&mut self, a: T, b: T, weight: Weight) -> (NodeId, NodeId) {
        let u = self.add_node(a);
        let v = self.add_node(b);
        self.add_edge(u, v, weight);
        (u, v)
    }

    /// Looks up the node holding a payload equal to `payload`.
    pub fn find<Q>(&self, payload: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(payload).copied()
    }

    /// The ordinal of the node holding `payload`.
    pub fn ordinal_of<Q>(&self, payload: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(payload).map(NodeId::index)
    }

    /// Returns `true` if a node with an equal payload exists.
    pub fn contains<Q>(&self, payload: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(payload)
    }

    /// Returns the node with the fewest incident edges, ties broken by the
    /// ordinal of the equal payload in `reference`.
    ///
    /// This ranks the nodes of a derived graph by the ordering of the graph it
    /// was derived from, so the answer does not depend on the order in which
    /// the derived graph happened to be built. Payloads absent from
    /// `reference` rank last.
    pub fn find_top_node(&self, reference: &Graph<T>) -> Option<NodeId> {
        self.find_top_node_by(|node| reference.ordinal_of(node.payload()).unwrap_or(usize::MAX))
    }

    /// Builds the graph implied by a set of paths over `original`.
    ///
    /// Every consecutive node pair of every path becomes an edge whose weight
    /// is looked up in `original`; the derived graph never invents weights.
    ///
    /// # Panics
    /// Panics if a path steps between two nodes that are not adjacent in `original`.
    pub fn from_paths<'p, I>(original: &Graph<T>, paths: I) -> Self
    where
        I: IntoIterator<Item = &'p Path>,
    {
        let mut graph = Self::new();
        for path in paths {
            let mut prev = graph.add_node(original.payload(path.first()).clone());
            for step in path.nodes().windows(2) {
                let (from, to) = (step[0], step[1]);
                let weight = match original.edge_between(from, to) {
                    Some(edge) => edge.weight(),
                    None => panic!("path step {from} -> {to} has no edge in the original graph"),
                };
                let curr = graph.add_node(original.payload(to).clone());
                graph.add_edge(prev, curr, weight);
                prev = curr;
            }
        }
        graph
    }
}

impl<T: fmt::Display> fmt::Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph:")?;
        writeln!(f, "   Nodes:")?;
        for node in &self.nodes {
            writeln!(f, "      {}", node.payload())?;
            writeln!(f, "         Edges:")?;
            for edge in node.edges() {
                writeln!(
                    f,
                    "            {} -> {} ({})",
                    node.payload(),
                    self.nodes[edge.to().index()].payload(),
                    edge.weight()
                )?;
            }
        }
        Ok(())
    }
}

/// Statistics about a graph.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GraphStatistics {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of undirected edges.
    pub edge_count: usize,
    /// Minimum degree over all nodes.
    pub min_degree: usize,
    /// Maximum degree over all nodes.
    pub max_degree: usize,
    /// Median degree over all nodes.
    pub median_degree: usize,
    /// Average degree.
    pub average_degree: f64,
}
