//! Debug-only structural assertion helpers.
//!
//! The graph store uses these to keep its invariants explicit (dense ordinals,
//! sorted adjacency, symmetric edges) while release builds remain unaffected.

use super::edge::Edge;

/// Debug-asserts a structural invariant with a message.
#[inline(always)]
pub(crate) fn invariant_assert(condition: bool, message: &str) {
    debug_assert!(condition, "Graph invariant violated: {}", message);
}

/// Returns `true` if `edges` is ordered by `(to ordinal, weight)`.
pub(crate) fn is_adjacency_sorted(edges: &[Edge]) -> bool {
    edges.windows(2).all(|w| w[0].sort_key() <= w[1].sort_key())
}
