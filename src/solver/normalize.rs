//! Canonical orientation of a winning combination.

use std::hash::Hash;

use crate::graph::{Graph, Path};

/// Puts the path through the top node first and starts it at the top node.
///
/// The top node is the node of the combination's derived graph with the
/// fewest incident edges, ties broken by ordinal in `graph`. The first path
/// containing it is reversed if it does not already start there, then moved
/// to the front. Nothing else is reordered and the node set is unchanged.
pub fn normalize<T>(graph: &Graph<T>, paths: &mut Vec<Path>)
where
    T: Eq + Hash + Clone,
{
    let derived = Graph::from_paths(graph, paths.iter());
    let Some(top) = derived
        .find_top_node(graph)
        .and_then(|top| graph.find(derived.payload(top)))
    else {
        return;
    };

    let Some(index) = paths.iter().position(|path| path.contains(top)) else {
        return;
    };
    if paths[index].first() != top {
        paths[index].reverse();
    }
    if index > 0 {
        let path = paths.remove(index);
        paths.insert(0, path);
    }

    tracing::trace!(top = top.index(), moved_from = index, "normalized combination");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;

    fn chain(graph: &Graph<&str>, names: &[&str]) -> Path {
        let ids: Vec<NodeId> = names.iter().map(|n| graph.find(n).unwrap()).collect();
        let mut path = Path::new(ids[0]);
        for step in ids.windows(2) {
            path.push(step[1], graph.edge_between(step[0], step[1]).unwrap().weight());
        }
        path
    }

    fn five_cycle() -> Graph<&'static str> {
        let mut graph = Graph::new();
        for n in ["a", "b", "c", "d", "e"] {
            graph.add_node(n);
        }
        graph.connect("a", "b", 1);
        graph.connect("b", "c", 1);
        graph.connect("a", "d", 1);
        graph.connect("d", "e", 1);
        graph.connect("e", "c", 1);
        graph
    }

    #[test]
    fn top_path_moves_first_and_is_reoriented() {
        let graph = five_cycle();
        let mut paths = vec![chain(&graph, &["a", "d"]), chain(&graph, &["a", "b", "c"])];
        normalize(&graph, &mut paths);

        let rendered: Vec<_> = paths.iter().map(|p| p.display(&graph).to_string()).collect();
        assert_eq!(rendered, vec!["Path: c b a (2)", "Path: a d (1)"]);
    }

    #[test]
    fn already_canonical_is_untouched() {
        let graph = five_cycle();
        let mut paths = vec![chain(&graph, &["c", "b", "a"]), chain(&graph, &["a", "d"])];
        let before = paths.clone();
        normalize(&graph, &mut paths);
        assert_eq!(paths, before);
    }

    #[test]
    fn single_path_is_reversed_when_needed() {
        let graph = five_cycle();
        // Endpoints b and d both have degree 1; b has the lower ordinal.
        let mut paths = vec![chain(&graph, &["d", "a", "b"])];
        normalize(&graph, &mut paths);
        assert_eq!(paths[0].names(&graph), vec!["b", "a", "d"]);
    }

    #[test]
    fn empty_combination_is_a_no_op() {
        let graph = five_cycle();
        let mut paths = Vec::new();
        normalize(&graph, &mut paths);
        assert!(paths.is_empty());
    }
}
