//! # `minpaths` - Exact Minimum Connecting Paths
//!
//! Given a weighted undirected graph and a set of *terminal* nodes, `minpaths`
//! finds the lightest set of paths that touches every terminal and forms a
//! single connected subgraph. It is an exact, brute-force relative of the
//! Steiner tree problem, meant for small instances where a deterministic,
//! optimal answer matters more than speed.
//!
//! ## Architecture
//!
//! Data flows strictly downstream; nothing above the graph store mutates it.
//!
//! 1. **Graph store** ([`graph`]): an arena of nodes addressed by [`NodeId`],
//!    with value-based payload identity and sorted, symmetric adjacency lists.
//! 2. **Pairwise finder** ([`solver::pairwise`]): every tied shortest path for
//!    every pair of terminals.
//! 3. **Cover search** ([`Solver`]): the cheapest combination of pairwise paths
//!    that covers all terminals and is connected, weighed by distinct edges.
//! 4. **Normalizer** ([`solver::normalize`]): canonical first path and
//!    orientation, so equal inputs always print the same answer.
//!
//! The [`fixture`] module reads the line-oriented test case format used by the
//! `minpaths` binary.
//!
//! ### Determinism
//!
//! Every tie is broken by node ordinal, the insertion order of payloads. Two
//! graphs with the same nodes inserted in the same order produce the same
//! answer regardless of the order their edges were added.
//!
//! ## Example
//!
//! ```rust
//! use minpaths::{Graph, Solver};
//!
//! let mut graph = Graph::new();
//! for name in ["a", "b", "c", "d", "e"] {
//!     graph.add_node(name);
//! }
//! graph.connect("a", "b", 1);
//! graph.connect("b", "c", 1);
//! graph.connect("a", "d", 1);
//! graph.connect("d", "e", 1);
//! graph.connect("e", "c", 1);
//!
//! let terminals: Vec<_> = ["a", "c", "d"].iter().filter_map(|n| graph.find(n)).collect();
//! let solution = Solver::new(&graph).solve(&terminals).unwrap();
//!
//! assert_eq!(solution.weight, 3);
//! assert_eq!(solution.paths[0].display(&graph).to_string(), "Path: c b a (2)");
//! assert_eq!(solution.paths[1].display(&graph).to_string(), "Path: a d (1)");
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod fixture;
pub mod graph;
pub mod solver;

pub use graph::{Edge, Graph, GraphStatistics, Node, NodeId, Path, Weight};
pub use solver::{
    enumerate_shortest_pairwise_paths, find_minimum_connecting_paths, PathGroup, SearchStage, SearchStats, Solution,
    SolveError, SolveResult, Solver, SolverConfig,
};

const _: () = {
    use core::mem;

    // NodeId is a plain ordinal.
    assert!(mem::size_of::<NodeId>() == mem::size_of::<usize>());
    assert!(mem::align_of::<NodeId>() == mem::align_of::<usize>());
};
