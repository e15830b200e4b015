use minpaths::solver::{combination_weight, covers_terminals};
use minpaths::{enumerate_shortest_pairwise_paths, Graph, NodeId, Path, Solver};
use proptest::prelude::*;

/// A connected graph: a weighted chain over every node plus extra edges.
#[derive(Debug, Clone)]
struct Instance {
    nodes: usize,
    edges: Vec<(usize, usize, u64)>,
    terminals: Vec<usize>,
}

impl Instance {
    fn build(&self, edges: &[(usize, usize, u64)]) -> (Graph<usize>, Vec<NodeId>) {
        let mut graph = Graph::new();
        for n in 0..self.nodes {
            graph.add_node(n);
        }
        for &(a, b, w) in edges {
            graph.connect(a, b, w);
        }
        let terminals = self.terminals.iter().map(|t| graph.find(t).unwrap()).collect();
        (graph, terminals)
    }
}

fn instance() -> impl Strategy<Value = Instance> {
    (3usize..=6).prop_flat_map(|nodes| {
        let chain = proptest::collection::vec(1u64..4, nodes - 1);
        let extra = proptest::collection::vec((0..nodes, 0..nodes, 1u64..4), 0..5);
        let terminals = proptest::collection::vec(0..nodes, 2..=4);
        (chain, extra, terminals).prop_map(move |(chain, extra, terminals)| {
            let mut edges: Vec<_> = chain.into_iter().enumerate().map(|(i, w)| (i, i + 1, w)).collect();
            edges.extend(extra.into_iter().filter(|(a, b, _)| a != b));
            Instance {
                nodes,
                edges,
                terminals,
            }
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn solution_covers_connects_and_weighs_correctly(inst in instance()) {
        let (graph, terminals) = inst.build(&inst.edges);
        let solution = Solver::new(&graph).solve(&terminals).unwrap();
        let refs: Vec<&Path> = solution.paths.iter().collect();

        prop_assert!(covers_terminals(&terminals, &refs));
        prop_assert!(Graph::from_paths(&graph, refs.iter().copied()).is_connected());
        prop_assert_eq!(combination_weight(&graph, &refs), solution.weight);

        for path in &solution.paths {
            let walked: u64 = path.edges(&graph).map(|e| e.weight()).sum();
            prop_assert_eq!(walked, path.weight());
        }
    }

    #[test]
    fn weight_is_at_least_every_pairwise_distance(inst in instance()) {
        let (graph, terminals) = inst.build(&inst.edges);
        let solution = Solver::new(&graph).solve(&terminals).unwrap();
        let groups = enumerate_shortest_pairwise_paths(&graph, &terminals);

        for group in &groups {
            let distance = group.weight().unwrap();
            prop_assert!(solution.weight >= distance, "{} < {}", solution.weight, distance);
        }
    }

    #[test]
    fn result_ignores_edge_insertion_order(inst in instance(), rotation in 0usize..16) {
        let (graph, terminals) = inst.build(&inst.edges);

        let mut shuffled = inst.edges.clone();
        shuffled.reverse();
        let len = shuffled.len();
        shuffled.rotate_left(rotation % len);
        let shuffled: Vec<_> = shuffled.into_iter().map(|(a, b, w)| (b, a, w)).collect();
        let (other, other_terminals) = inst.build(&shuffled);

        let lhs = Solver::new(&graph).solve(&terminals).unwrap();
        let rhs = Solver::new(&other).solve(&other_terminals).unwrap();
        prop_assert_eq!(lhs.paths, rhs.paths);
        prop_assert_eq!(lhs.weight, rhs.weight);
    }

    #[test]
    fn first_path_starts_at_a_leaf(inst in instance()) {
        let (graph, terminals) = inst.build(&inst.edges);
        let solution = Solver::new(&graph).solve(&terminals).unwrap();
        let derived = Graph::from_paths(&graph, &solution.paths);

        let min_degree = derived.nodes().iter().map(|n| n.degree()).min().unwrap();
        if min_degree == 1 {
            let first = solution.paths[0].first();
            let first_in_derived = derived.find(graph.payload(first)).unwrap();
            prop_assert_eq!(derived.degree(first_in_derived), 1);

            // The leaf with the lowest ordinal in the original graph.
            let expected = derived
                .nodes()
                .iter()
                .filter(|n| n.degree() == 1)
                .map(|n| graph.find(n.payload()).unwrap())
                .min()
                .unwrap();
            prop_assert_eq!(first, expected);
        }
    }
}
