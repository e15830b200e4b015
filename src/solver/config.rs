//! Solver configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for [`Solver`](crate::solver::Solver).
///
/// The search is exponential in the number of tied shortest paths, so callers
/// that need bounded latency can cap the number of stack pops each stage may
/// perform. `None` means unbounded, which is the default.
///
/// ```
/// use minpaths::SolverConfig;
///
/// let config = SolverConfig::from_json_str(r#"{ "max_cover_iterations": 5000 }"#).unwrap();
/// assert_eq!(config.max_cover_iterations, Some(5000));
/// assert_eq!(config.max_pair_iterations, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Maximum stack pops while enumerating the paths of a single terminal pair.
    pub max_pair_iterations: Option<u64>,
    /// Maximum stack pops for the whole cover search.
    pub max_cover_iterations: Option<u64>,
}

impl SolverConfig {
    /// An unbounded configuration.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Caps the per-pair enumeration.
    pub fn with_pair_budget(mut self, limit: u64) -> Self {
        self.max_pair_iterations = Some(limit);
        self
    }

    /// Caps the cover search.
    pub fn with_cover_budget(mut self, limit: u64) -> Self {
        self.max_cover_iterations = Some(limit);
        self
    }

    /// Parses a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_unbounded() {
        let config = SolverConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SolverConfig::unbounded());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(SolverConfig::from_json_str(r#"{ "max_iterations": 3 }"#).is_err());
    }

    #[test]
    fn builders_set_budgets() {
        let config = SolverConfig::unbounded().with_pair_budget(7).with_cover_budget(9);
        assert_eq!(config.max_pair_iterations, Some(7));
        assert_eq!(config.max_cover_iterations, Some(9));
    }
}
