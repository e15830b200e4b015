//! Exact minimum connecting-path search.
//!
//! The solver runs in three stages over a read-only [`Graph`]:
//!
//! 1. [`pairwise`]: every tied shortest path for every terminal pair.
//! 2. `cover`: the lightest combination of those paths that touches every
//!    terminal and forms one connected subgraph.
//! 3. [`normalize`]: a canonical order and orientation for the winner.
//!
//! The search is exact and exponential in the number of tied alternatives.
//! Iteration budgets in [`SolverConfig`] bound its running time; exceeding one
//! is reported as [`SolveError::BudgetExhausted`] rather than a partial answer.

pub mod config;
pub(crate) mod cover;
pub mod error;
pub mod normalize;
pub mod pairwise;

use std::hash::Hash;

use serde::Serialize;

use crate::graph::{Graph, NodeId, Path, Weight};

pub use config::SolverConfig;
pub use cover::{combination_weight, covers_terminals};
pub use error::{SearchStage, SolveError, SolveResult};
pub use normalize::normalize;
pub use pairwise::{PairwiseFinder, PathGroup};

/// Payload bound for the pairwise stage.
///
/// With the `parallel` feature the graph is shared across rayon workers, so
/// payloads must be `Sync`. Without it every payload qualifies.
#[cfg(feature = "parallel")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "parallel")]
impl<T: Sync + ?Sized> MaybeSync for T {}

/// Payload bound for the pairwise stage.
///
/// With the `parallel` feature the graph is shared across rayon workers, so
/// payloads must be `Sync`. Without it every payload qualifies.
#[cfg(not(feature = "parallel"))]
pub trait MaybeSync {}
#[cfg(not(feature = "parallel"))]
impl<T: ?Sized> MaybeSync for T {}

/// Counters collected while solving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Distinct terminals after canonicalization.
    pub terminals: usize,
    /// Pairwise groups searched by the cover stage.
    pub groups: usize,
    /// Stack pops across all pairwise enumerations.
    pub pair_iterations: u64,
    /// Stack pops in the cover search.
    pub cover_iterations: u64,
    /// Combinations that covered every terminal and were connected.
    pub combinations_evaluated: u64,
}

/// The minimum connecting paths for a terminal set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    /// The winning combination, normalized.
    pub paths: Vec<Path>,
    /// Sum of the distinct edges walked by `paths`.
    pub weight: Weight,
    /// Search counters.
    pub stats: SearchStats,
}

/// Sorts terminals by ordinal and drops duplicates.
///
/// # Panics
/// Panics if a terminal does not belong to `graph`.
pub fn canonical_terminals<T>(graph: &Graph<T>, terminals: &[NodeId]) -> Vec<NodeId> {
    let n = graph.node_count();
    for &terminal in terminals {
        assert!(terminal.index() < n, "terminal {terminal} out of bounds for n={n}");
    }
    let mut canonical = terminals.to_vec();
    canonical.sort_unstable();
    canonical.dedup();
    canonical
}

/// Finds the lightest set of paths connecting a set of terminals.
///
/// ```
/// use minpaths::{Graph, Solver};
///
/// let mut graph = Graph::new();
/// let (x, y) = graph.connect("x", "y", 5);
///
/// let solution = Solver::new(&graph).solve(&[y, x]).unwrap();
/// assert_eq!(solution.weight, 5);
/// assert_eq!(solution.paths[0].display(&graph).to_string(), "Path: x y (5)");
/// ```
#[derive(Debug, Clone)]
pub struct Solver<'g, T> {
    graph: &'g Graph<T>,
    config: SolverConfig,
}

impl<'g, T> Solver<'g, T>
where
    T: Eq + Hash + Clone + MaybeSync,
{
    /// Creates an unbounded solver over `graph`.
    pub fn new(graph: &'g Graph<T>) -> Self {
        Self {
            graph,
            config: SolverConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// A pairwise finder using this solver's per-pair budget.
    pub fn pairwise(&self) -> PairwiseFinder<'g, T> {
        PairwiseFinder::new(self.graph).with_budget(self.config.max_pair_iterations)
    }

    /// Every tied shortest path for every pair of `terminals` under this
    /// solver's per-pair budget, one group per pair in canonical pair order.
    ///
    /// # Errors
    /// [`SolveError::BudgetExhausted`] if the per-pair budget runs out.
    ///
    /// # Panics
    /// Panics if a terminal does not belong to the graph.
    pub fn pairwise_groups(&self, terminals: &[NodeId]) -> SolveResult<Vec<PathGroup>> {
        self.pairwise().all_pairs(&canonical_terminals(self.graph, terminals))
    }

    /// Solves for `terminals`.
    ///
    /// No terminals yield an empty solution; a single terminal yields one
    /// zero-weight path holding just that node.
    ///
    /// # Errors
    /// - [`SolveError::Unreachable`] if two terminals lie in different components.
    /// - [`SolveError::BudgetExhausted`] if a configured budget runs out.
    /// - [`SolveError::NoConnectedCover`] if no combination is connected.
    ///
    /// # Panics
    /// Panics if a terminal does not belong to the graph.
    pub fn solve(&self, terminals: &[NodeId]) -> SolveResult<Solution> {
        let span = tracing::debug_span!("solve", terminals = terminals.len());
        let _enter = span.enter();

        let terminals = canonical_terminals(self.graph, terminals);
        let mut stats = SearchStats {
            terminals: terminals.len(),
            ..SearchStats::default()
        };

        match terminals.as_slice() {
            [] => {
                return Ok(Solution {
                    paths: Vec::new(),
                    weight: 0,
                    stats,
                })
            }
            [only] => {
                return Ok(Solution {
                    paths: vec![Path::new(*only)],
                    weight: 0,
                    stats,
                })
            }
            _ => {}
        }

        let mut groups = self.pairwise().all_pairs(&terminals)?;
        stats.groups = groups.len();
        stats.pair_iterations = groups.iter().map(PathGroup::iterations).sum();

        if let Some(empty) = groups.iter().find(|group| group.is_empty()) {
            tracing::debug!(from = empty.source().index(), to = empty.destination().index(), "terminals unreachable");
            return Err(SolveError::Unreachable {
                from: empty.source(),
                to: empty.destination(),
            });
        }

        cover::rank_groups(&mut groups);
        let outcome = cover::search(self.graph, &terminals, &groups, self.config.max_cover_iterations)?;
        stats.cover_iterations = outcome.iterations;
        stats.combinations_evaluated = outcome.evaluated;

        let mut paths: Vec<Path> = outcome.paths.into_iter().cloned().collect();
        normalize(self.graph, &mut paths);

        Ok(Solution {
            paths,
            weight: outcome.weight,
            stats,
        })
    }
}

/// Returns the minimum connecting paths for `terminals`, or `None` when no
/// terminal collection was supplied.
///
/// # Errors
/// Same as [`Solver::solve`].
pub fn find_minimum_connecting_paths<T>(
    graph: &Graph<T>,
    terminals: Option<&[NodeId]>,
) -> SolveResult<Option<Vec<Path>>>
where
    T: Eq + Hash + Clone + MaybeSync,
{
    let Some(terminals) = terminals else {
        return Ok(None);
    };
    Solver::new(graph).solve(terminals).map(|solution| Some(solution.paths))
}

/// Every tied shortest path for every pair of `terminals`, one group per pair
/// in canonical pair order. Disconnected pairs come back as empty groups.
///
/// # Panics
/// Panics if a terminal does not belong to the graph.
pub fn enumerate_shortest_pairwise_paths<T>(graph: &Graph<T>, terminals: &[NodeId]) -> Vec<PathGroup>
where
    T: MaybeSync,
{
    let terminals = canonical_terminals(graph, terminals);
    match PairwiseFinder::new(graph).all_pairs(&terminals) {
        Ok(groups) => groups,
        Err(err) => unreachable!("unbounded pairwise enumeration failed: {err}"),
    }
}
