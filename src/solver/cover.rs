//! Combinatorial search for the cheapest connected cover of all terminals.
//!
//! Groups are ranked by weight and numbered. A combination picks one path from
//! group 0, then one from group 1, and so on; it is extended only while it
//! either misses a terminal or leaves the picked paths disconnected. Every
//! covering, connected combination is weighed by its *distinct* edges and the
//! lightest one wins. Combinations are explored through an explicit stack so
//! each branch owns its own copy of the partial selection.
//!
//! The worst case visits the product of all group sizes, i.e. it is
//! exponential in the number of tied alternatives. That is the price of an
//! exact answer and is not approximated away.

use std::collections::HashSet;
use std::hash::Hash;

use super::error::{SearchStage, SolveError, SolveResult};
use super::pairwise::PathGroup;
use crate::graph::{Graph, NodeId, Path, Weight};

/// The winning combination and the bookkeeping of the search that found it.
#[derive(Debug)]
pub(crate) struct CoverOutcome<'a> {
    pub(crate) paths: Vec<&'a Path>,
    pub(crate) weight: Weight,
    pub(crate) iterations: u64,
    pub(crate) evaluated: u64,
}

/// Orders groups by ascending weight and tags each path with its group's rank.
///
/// The sort is stable, so groups of equal weight keep their terminal-pair order.
pub(crate) fn rank_groups(groups: &mut [PathGroup]) {
    groups.sort_by_key(PathGroup::weight);
    for (ordinal, group) in groups.iter_mut().enumerate() {
        group.assign_ordinal(ordinal);
    }
}

/// Returns `true` if every terminal lies on at least one of `paths`.
pub fn covers_terminals(terminals: &[NodeId], paths: &[&Path]) -> bool {
    terminals
        .iter()
        .all(|&terminal| paths.iter().any(|path| path.contains(terminal)))
}

/// Total weight of the distinct edges walked by `paths`.
///
/// An edge shared by several paths, in either direction, is counted once.
pub fn combination_weight<T>(graph: &Graph<T>, paths: &[&Path]) -> Weight {
    let mut seen = HashSet::new();
    paths
        .iter()
        .flat_map(|path| path.edges(graph))
        .filter(|edge| seen.insert(edge.undirected_key()))
        .map(|edge| edge.weight())
        .fold(0, Weight::saturating_add)
}

/// Searches combinations of ranked `groups` for the lightest connected cover.
///
/// `groups` must have been passed through [`rank_groups`] and be non-empty.
pub(crate) fn search<'a, T>(
    graph: &Graph<T>,
    terminals: &[NodeId],
    groups: &'a [PathGroup],
    budget: Option<u64>,
) -> SolveResult<CoverOutcome<'a>>
where
    T: Eq + Hash + Clone,
{
    let Some(first) = groups.first() else {
        return Err(SolveError::NoConnectedCover);
    };

    let mut stack: Vec<Vec<&'a Path>> = first.paths().iter().rev().map(|path| vec![path]).collect();
    let mut best: Option<(Vec<&'a Path>, Weight)> = None;
    let mut iterations = 0u64;
    let mut evaluated = 0u64;

    tracing::debug!(
        groups = groups.len(),
        candidates = groups.iter().map(PathGroup::len).product::<usize>(),
        "cover search started"
    );

    while let Some(combination) = stack.pop() {
        iterations += 1;
        if let Some(limit) = budget {
            if iterations > limit {
                return Err(SolveError::BudgetExhausted {
                    stage: SearchStage::Cover,
                    limit,
                });
            }
        }

        if covers_terminals(terminals, &combination)
            && Graph::from_paths(graph, combination.iter().copied()).is_connected()
        {
            evaluated += 1;
            let weight = combination_weight(graph, &combination);
            if best.as_ref().map_or(true, |(_, best_weight)| weight < *best_weight) {
                tracing::trace!(weight, paths = combination.len(), "improved cover");
                best = Some((combination, weight));
            }
            continue;
        }

        let next = combination
            .last()
            .and_then(|path| path.group())
            .and_then(|group| groups.get(group + 1));
        let Some(next) = next else {
            continue;
        };

        for path in next.paths().iter().rev() {
            let mut extended = Vec::with_capacity(combination.len() + 1);
            extended.extend_from_slice(&combination);
            extended.push(path);
            stack.push(extended);
        }
    }

    tracing::debug!(iterations, evaluated, weight = ?best.as_ref().map(|(_, w)| *w), "cover search finished");

    let (paths, weight) = best.ok_or(SolveError::NoConnectedCover)?;
    Ok(CoverOutcome {
        paths,
        weight,
        iterations,
        evaluated,
    })
}
