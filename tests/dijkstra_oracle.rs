use std::collections::HashSet;

use minpaths::{enumerate_shortest_pairwise_paths, Graph, NodeId};
use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use proptest::prelude::*;

fn graphs() -> impl Strategy<Value = (usize, Vec<(usize, usize, u64)>)> {
    (2usize..=7).prop_flat_map(|nodes| {
        let edges = proptest::collection::vec((0..nodes, 0..nodes, 0u64..6), 0..12);
        (Just(nodes), edges)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn group_weights_match_dijkstra((nodes, edges) in graphs()) {
        let mut graph = Graph::new();
        let mut oracle = UnGraph::<(), u64>::new_undirected();
        for n in 0..nodes {
            graph.add_node(n);
            oracle.add_node(());
        }
        for &(a, b, w) in &edges {
            graph.connect(a, b, w);
            oracle.add_edge(NodeIndex::new(a), NodeIndex::new(b), w);
        }

        let terminals: Vec<NodeId> = graph.node_ids().collect();
        let groups = enumerate_shortest_pairwise_paths(&graph, &terminals);
        prop_assert_eq!(groups.len(), nodes * (nodes - 1) / 2);

        for group in &groups {
            let source = group.source().index();
            let destination = group.destination().index();
            let distances = dijkstra(&oracle, NodeIndex::new(source), None, |e| *e.weight());
            let expected = distances.get(&NodeIndex::new(destination)).copied();
            prop_assert_eq!(group.weight(), expected, "pair {} - {}", source, destination);

            let mut seen = HashSet::new();
            for path in group.paths() {
                prop_assert_eq!(path.first(), group.source());
                prop_assert_eq!(path.last(), group.destination());
                prop_assert_eq!(Some(path.weight()), group.weight());
                let unique: HashSet<_> = path.nodes().iter().collect();
                prop_assert_eq!(unique.len(), path.len(), "path revisits a node");
                prop_assert!(seen.insert(path.nodes().to_vec()), "duplicate path in group");
            }
        }
    }
}
