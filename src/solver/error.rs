//! Solver failure modes.

use core::fmt;

use serde::Serialize;

use crate::graph::NodeId;

/// The stage of the search that ran out of budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStage {
    /// Enumerating tied shortest paths for a terminal pair.
    Pairwise,
    /// Searching combinations of pairwise groups.
    Cover,
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pairwise => "pairwise",
            Self::Cover => "cover",
        })
    }
}

/// Errors returned by [`Solver::solve`](crate::solver::Solver::solve).
///
/// Structural results (no terminals, a single terminal) are not errors, and
/// node ids foreign to the graph are caller bugs that panic instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// Two terminals lie in different components of the graph.
    #[error("terminals {from} and {to} are not connected in the graph")]
    Unreachable {
        /// Lower-ordinal terminal of the pair.
        from: NodeId,
        /// Higher-ordinal terminal of the pair.
        to: NodeId,
    },

    /// The cover search ran to exhaustion without a covering, connected combination.
    #[error("no connected combination of pairwise paths covers every terminal")]
    NoConnectedCover,

    /// A configured iteration budget was exceeded.
    #[error("{stage} search exceeded its budget of {limit} iterations")]
    BudgetExhausted {
        /// Which stage hit the limit.
        stage: SearchStage,
        /// The configured limit.
        limit: u64,
    },
}

/// Convenience alias for solver results.
pub type SolveResult<T> = Result<T, SolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = SolveError::Unreachable {
            from: NodeId::new(1),
            to: NodeId::new(4),
        };
        assert_eq!(err.to_string(), "terminals #1 and #4 are not connected in the graph");

        let err = SolveError::BudgetExhausted {
            stage: SearchStage::Cover,
            limit: 10,
        };
        assert_eq!(err.to_string(), "cover search exceeded its budget of 10 iterations");
    }
}
