//! Traversal scratch state shared by the graph store.

pub(crate) mod visited;
