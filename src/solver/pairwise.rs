//! Exhaustive enumeration of tied shortest paths between terminal pairs.
//!
//! For each unordered pair of terminals this runs a depth-first search over
//! simple paths with an explicit stack. A completed path strictly lighter than
//! the best so far resets the pair's group; an equally light one joins it.
//! Partial paths heavier than the best completed path are never pushed.
//!
//! Unlike Dijkstra, this keeps *every* tied route, which the cover search
//! needs to pick whichever alternative shares the most edges with the rest.

use serde::Serialize;

use super::error::{SearchStage, SolveError, SolveResult};
use super::MaybeSync;
use crate::graph::{Graph, NodeId, Path, Weight};

/// All minimum-weight paths between one terminal pair.
#[derive(Debug, Clone, Serialize)]
pub struct PathGroup {
    source: NodeId,
    destination: NodeId,
    weight: Option<Weight>,
    paths: Vec<Path>,
    iterations: u64,
}

impl PathGroup {
    /// The lower-ordinal terminal.
    #[inline]
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// The higher-ordinal terminal.
    #[inline]
    pub fn destination(&self) -> NodeId {
        self.destination
    }

    /// The shared weight of every path in the group, or `None` when the two
    /// terminals are not connected.
    #[inline]
    pub fn weight(&self) -> Option<Weight> {
        self.weight
    }

    /// The tied paths, in discovery order.
    #[inline]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Number of tied paths.
    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` when no path connects the pair.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Stack pops spent enumerating this pair.
    #[inline]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Tags every path with the group's position in the cover search.
    pub(crate) fn assign_ordinal(&mut self, ordinal: usize) {
        for path in &mut self.paths {
            path.set_group(ordinal);
        }
    }
}

/// Enumerates tied shortest paths over a borrowed graph.
#[derive(Debug, Clone, Copy)]
pub struct PairwiseFinder<'g, T> {
    graph: &'g Graph<T>,
    budget: Option<u64>,
}

impl<'g, T> PairwiseFinder<'g, T> {
    /// Creates an unbounded finder.
    pub fn new(graph: &'g Graph<T>) -> Self {
        Self { graph, budget: None }
    }

    /// Caps the stack pops spent on any single pair.
    pub fn with_budget(mut self, budget: Option<u64>) -> Self {
        self.budget = budget;
        self
    }

    /// Enumerates every minimum-weight simple path from `source` to `destination`.
    ///
    /// # Panics
    /// Panics if either node does not belong to the graph.
    pub fn shortest_paths(&self, source: NodeId, destination: NodeId) -> SolveResult<PathGroup> {
        let source = self.graph.node(source).id();
        let destination = self.graph.node(destination).id();

        let mut best: Option<Weight> = None;
        let mut paths: Vec<Path> = Vec::new();
        let mut stack = vec![Path::new(source)];
        let mut iterations = 0u64;

        while let Some(path) = stack.pop() {
            iterations += 1;
            if let Some(limit) = self.budget {
                if iterations > limit {
                    return Err(SolveError::BudgetExhausted {
                        stage: SearchStage::Pairwise,
                        limit,
                    });
                }
            }

            let last = path.last();
            if last == destination {
                match best {
                    Some(w) if path.weight() > w => {}
                    Some(w) if path.weight() == w => paths.push(path),
                    _ => {
                        best = Some(path.weight());
                        paths.clear();
                        paths.push(path);
                    }
                }
                continue;
            }

            // Reverse push so pops follow adjacency (ordinal) order.
            for edge in self.graph.neighbors(last).iter().rev() {
                if path.contains(edge.to()) {
                    continue;
                }
                let next = path.extended(edge.to(), edge.weight());
                if best.map_or(true, |w| next.weight() <= w) {
                    stack.push(next);
                }
            }
        }

        tracing::debug!(
            source = source.index(),
            destination = destination.index(),
            iterations,
            paths = paths.len(),
            weight = ?best,
            "enumerated pairwise paths"
        );

        Ok(PathGroup {
            source,
            destination,
            weight: best,
            paths,
            iterations,
        })
    }

    /// Enumerates one group per unordered pair of `terminals`.
    ///
    /// `terminals` must already be in canonical (ascending ordinal) order;
    /// groups come back in pair order `(0,1), (0,2), .., (1,2), ..`.
    pub fn all_pairs(&self, terminals: &[NodeId]) -> SolveResult<Vec<PathGroup>>
    where
        T: MaybeSync,
    {
        let pairs: Vec<(NodeId, NodeId)> = terminals
            .iter()
            .enumerate()
            .flat_map(|(i, &src)| terminals[i + 1..].iter().map(move |&dst| (src, dst)))
            .collect();

        #[cfg(feature = "parallel")]
        let groups: SolveResult<Vec<PathGroup>> = {
            use rayon::prelude::*;
            pairs
                .par_iter()
                .map(|&(src, dst)| self.shortest_paths(src, dst))
                .collect()
        };
        #[cfg(not(feature = "parallel"))]
        let groups: SolveResult<Vec<PathGroup>> = pairs
            .iter()
            .map(|&(src, dst)| self.shortest_paths(src, dst))
            .collect();

        let groups = groups?;
        tracing::debug!(
            pairs = groups.len(),
            iterations = groups.iter().map(PathGroup::iterations).sum::<u64>(),
            "pairwise enumeration finished"
        );
        Ok(groups)
    }
}
