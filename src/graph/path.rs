//! Candidate routes through a graph.

use core::fmt;
use core::hash::{Hash, Hasher};

use serde::Serialize;

use crate::graph::{Edge, Graph, NodeId, Weight};

/// An ordered, non-empty sequence of nodes plus its accumulated weight.
///
/// The weight is always the sum of the weights of the arcs walked between
/// consecutive nodes; a single-node path weighs 0. The group tag is only used
/// by the cover search to remember which pairwise group a path came from and
/// takes no part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct Path {
    nodes: Vec<NodeId>,
    weight: Weight,
    #[serde(skip)]
    group: Option<usize>,
}

impl Path {
    /// Creates a zero-weight path holding only `start`.
    pub fn new(start: NodeId) -> Self {
        Self {
            nodes: vec![start],
            weight: 0,
            group: None,
        }
    }

    /// Appends `node`, reached over an arc of `weight`.
    pub fn push(&mut self, node: NodeId, weight: Weight) {
        self.nodes.push(node);
        self.weight = self.weight.saturating_add(weight);
    }

    /// Returns a copy of this path extended by one step.
    pub fn extended(&self, node: NodeId, weight: Weight) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(node);
        Self {
            nodes,
            weight: self.weight.saturating_add(weight),
            group: self.group,
        }
    }

    /// The node sequence.
    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// The accumulated weight.
    #[inline]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Number of nodes on the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a path holds at least one node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The first node.
    #[inline]
    pub fn first(&self) -> NodeId {
        self.nodes[0]
    }

    /// The last node.
    #[inline]
    pub fn last(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Returns `true` if the path visits `node`.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// The pairwise group this path was tagged with, if any.
    #[inline]
    pub fn group(&self) -> Option<usize> {
        self.group
    }

    pub(crate) fn set_group(&mut self, group: usize) {
        self.group = Some(group);
    }

    /// Reverses the node order in place. The weight is unchanged.
    pub fn reverse(&mut self) {
        self.nodes.reverse();
    }

    /// The arcs walked by this path, looked up in `graph`.
    ///
    /// # Panics
    /// Panics if two consecutive nodes are not adjacent in `graph`.
    pub fn edges<'g, T>(&'g self, graph: &'g Graph<T>) -> impl Iterator<Item = &'g Edge> + 'g {
        self.nodes.windows(2).map(move |step| match graph.edge_between(step[0], step[1]) {
            Some(edge) => edge,
            None => panic!("path step {} -> {} has no edge in the graph", step[0], step[1]),
        })
    }

    /// Renders as `Path: a b c (w)` using the payloads of `graph`.
    pub fn display<'a, T: fmt::Display>(&'a self, graph: &'a Graph<T>) -> PathDisplay<'a, T> {
        PathDisplay {
            path: self,
            graph,
            with_weight: true,
        }
    }

    /// Renders as `Path: a b c`, for comparison against expected node sequences.
    pub fn display_without_weight<'a, T: fmt::Display>(&'a self, graph: &'a Graph<T>) -> PathDisplay<'a, T> {
        PathDisplay {
            path: self,
            graph,
            with_weight: false,
        }
    }

    /// The payload names along the path.
    pub fn names<T: fmt::Display>(&self, graph: &Graph<T>) -> Vec<String> {
        self.nodes.iter().map(|&id| graph.payload(id).to_string()).collect()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.nodes == other.nodes
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nodes.hash(state);
        self.weight.hash(state);
    }
}

/// Display adaptor returned by [`Path::display`] and [`Path::display_without_weight`].
pub struct PathDisplay<'a, T> {
    path: &'a Path,
    graph: &'a Graph<T>,
    with_weight: bool,
}

impl<T: fmt::Display> fmt::Display for PathDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Path:")?;
        for &id in self.path.nodes() {
            write!(f, " {}", self.graph.payload(id))?;
        }
        if self.with_weight {
            write!(f, " ({})", self.path.weight())?;
        }
        Ok(())
    }
}
