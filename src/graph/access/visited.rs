//! Word-packed visited sets for graph traversals.
//!
//! Every traversal in the crate (connectivity, cycle detection) marks nodes by
//! ordinal, so a dense bitset indexed by `NodeId::index` is all that is needed.
//! Each traversal owns its set.

use crate::graph::NodeId;

const WORD_BITS: usize = u64::BITS as usize;

/// A dense, word-packed visited set for a fixed node count.
#[derive(Debug, Clone)]
pub(crate) struct VisitedSet {
    words: Vec<u64>,
    len: usize,
}

impl VisitedSet {
    #[inline]
    pub(crate) fn new(len: usize) -> Self {
        Self {
            words: vec![0; (len + WORD_BITS - 1) / WORD_BITS],
            len,
        }
    }

    /// Returns `true` iff this call observed the node as not-yet-visited and marks it visited.
    #[inline(always)]
    pub(crate) fn try_visit(&mut self, node: NodeId) -> bool {
        let idx = node.index();
        debug_assert!(idx < self.len, "node {idx} out of bounds for visited set of {}", self.len);
        let word = &mut self.words[idx / WORD_BITS];
        let mask = 1u64 << (idx % WORD_BITS);
        let fresh = *word & mask == 0;
        *word |= mask;
        fresh
    }

    /// Number of visited nodes.
    pub(crate) fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` when every node has been visited.
    pub(crate) fn is_full(&self) -> bool {
        self.count() == self.len
    }

    /// First node that has not been visited yet, in ordinal order.
    pub(crate) fn first_unvisited(&self) -> Option<NodeId> {
        self.words.iter().enumerate().find_map(|(w, &bits)| {
            if bits == u64::MAX {
                return None;
            }
            let idx = w * WORD_BITS + (!bits).trailing_zeros() as usize;
            (idx < self.len).then(|| NodeId::new(idx))
        })
    }
}
