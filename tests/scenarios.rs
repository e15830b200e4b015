use minpaths::solver::{combination_weight, SearchStage};
use minpaths::{
    enumerate_shortest_pairwise_paths, find_minimum_connecting_paths, Graph, NodeId, Path, SolveError, Solver,
    SolverConfig,
};

fn named(graph: &Graph<&'static str>, names: &[&str]) -> Vec<NodeId> {
    names.iter().map(|n| graph.find(n).unwrap()).collect()
}

fn rendered(graph: &Graph<&'static str>, paths: &[Path]) -> Vec<String> {
    paths.iter().map(|p| p.display(graph).to_string()).collect()
}

fn build(nodes: &[&'static str], edges: &[(&'static str, &'static str, u64)]) -> Graph<&'static str> {
    let mut graph = Graph::new();
    for &n in nodes {
        graph.add_node(n);
    }
    for &(a, b, w) in edges {
        graph.connect(a, b, w);
    }
    graph
}

const FIVE_CYCLE: &[(&str, &str, u64)] = &[("a", "b", 1), ("b", "c", 1), ("a", "d", 1), ("d", "e", 1), ("e", "c", 1)];

#[test]
fn five_cycle_scenario() {
    let graph = build(&["a", "b", "c", "d", "e"], FIVE_CYCLE);
    let terminals = named(&graph, &["a", "c", "d"]);

    let paths = find_minimum_connecting_paths(&graph, Some(&terminals)).unwrap().unwrap();
    assert_eq!(rendered(&graph, &paths), vec!["Path: c b a (2)", "Path: a d (1)"]);

    let refs: Vec<&Path> = paths.iter().collect();
    assert_eq!(combination_weight(&graph, &refs), 3);
}

#[test]
fn edge_insertion_order_does_not_matter() {
    let forward = build(&["a", "b", "c", "d", "e"], FIVE_CYCLE);
    let reversed_edges: Vec<_> = FIVE_CYCLE.iter().rev().map(|&(a, b, w)| (b, a, w)).collect();
    let backward = build(&["a", "b", "c", "d", "e"], &reversed_edges);

    let lhs = Solver::new(&forward).solve(&named(&forward, &["d", "c", "a"])).unwrap();
    let rhs = Solver::new(&backward).solve(&named(&backward, &["a", "c", "d"])).unwrap();
    assert_eq!(lhs.paths, rhs.paths);
    assert_eq!(lhs.weight, rhs.weight);
}

#[test]
fn tied_alternatives_share_one_group() {
    let graph = build(
        &["s", "p", "q", "t"],
        &[("s", "p", 1), ("p", "t", 1), ("s", "q", 1), ("q", "t", 1)],
    );
    let groups = enumerate_shortest_pairwise_paths(&graph, &named(&graph, &["t", "s"]));

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].weight(), Some(2));
    assert_eq!(rendered(&graph, groups[0].paths()), vec!["Path: s p t (2)", "Path: s q t (2)"]);
}

#[test]
fn single_edge() {
    let graph = build(&["x", "y"], &[("x", "y", 5)]);
    let solution = Solver::new(&graph).solve(&named(&graph, &["x", "y"])).unwrap();
    assert_eq!(rendered(&graph, &solution.paths), vec!["Path: x y (5)"]);
    assert_eq!(solution.weight, 5);
}

#[test]
fn degenerate_inputs() {
    let graph = build(&["a", "b", "c", "d", "e"], FIVE_CYCLE);

    assert_eq!(find_minimum_connecting_paths(&graph, None), Ok(None));
    assert_eq!(find_minimum_connecting_paths(&graph, Some(&[])), Ok(Some(vec![])));

    let one = find_minimum_connecting_paths(&graph, Some(&named(&graph, &["e"]))).unwrap().unwrap();
    assert_eq!(rendered(&graph, &one), vec!["Path: e (0)"]);
}

#[test]
fn steiner_hub_beats_direct_edges() {
    let graph = build(
        &["x", "y", "z", "s"],
        &[
            ("x", "y", 2),
            ("y", "z", 2),
            ("x", "z", 2),
            ("x", "s", 1),
            ("y", "s", 1),
            ("z", "s", 1),
        ],
    );
    let solution = Solver::new(&graph).solve(&named(&graph, &["x", "y", "z"])).unwrap();
    assert_eq!(rendered(&graph, &solution.paths), vec!["Path: x s y (2)", "Path: x s z (2)"]);
    // The shared x - s edge counts once.
    assert_eq!(solution.weight, 3);
}

#[test]
fn unreachable_terminals() {
    let graph = build(&["a", "b", "c"], &[("a", "b", 1)]);
    let terminals = named(&graph, &["a", "c"]);
    let err = Solver::new(&graph).solve(&terminals).unwrap_err();
    assert_eq!(
        err,
        SolveError::Unreachable {
            from: terminals[0],
            to: terminals[1]
        }
    );
    assert_eq!(err.to_string(), "terminals #0 and #2 are not connected in the graph");
}

#[test]
fn cover_budget_exhaustion() {
    let graph = build(&["a", "b", "c", "d", "e"], FIVE_CYCLE);
    let err = Solver::new(&graph)
        .with_config(SolverConfig::unbounded().with_cover_budget(1))
        .solve(&named(&graph, &["a", "c", "d"]))
        .unwrap_err();
    assert_eq!(
        err,
        SolveError::BudgetExhausted {
            stage: SearchStage::Cover,
            limit: 1
        }
    );
}

#[test]
fn generous_budgets_do_not_change_the_answer() {
    let graph = build(&["a", "b", "c", "d", "e"], FIVE_CYCLE);
    let terminals = named(&graph, &["a", "c", "d"]);
    let bounded = Solver::new(&graph)
        .with_config(SolverConfig::unbounded().with_pair_budget(1_000).with_cover_budget(1_000))
        .solve(&terminals)
        .unwrap();
    let unbounded = Solver::new(&graph).solve(&terminals).unwrap();
    assert_eq!(bounded, unbounded);
}

#[test]
fn solution_serializes_to_json() {
    let graph = build(&["a", "b", "c", "d", "e"], FIVE_CYCLE);
    let solution = Solver::new(&graph).solve(&named(&graph, &["a", "c", "d"])).unwrap();
    let json = serde_json::to_value(&solution).unwrap();

    assert_eq!(json["weight"], 3);
    assert_eq!(json["paths"][0]["nodes"], serde_json::json!([2, 1, 0]));
    assert_eq!(json["stats"]["terminals"], 3);
    assert!(json["paths"][0].get("group").is_none());
}

#[test]
fn derived_graph_of_solution_is_a_connected_subgraph() {
    let graph = build(&["a", "b", "c", "d", "e"], FIVE_CYCLE);
    let solution = Solver::new(&graph).solve(&named(&graph, &["a", "c", "d"])).unwrap();
    let derived = Graph::from_paths(&graph, &solution.paths);

    assert!(derived.is_connected());
    assert!(!derived.has_cycle());
    assert_eq!(derived.node_count(), 4);
    assert_eq!(derived.edge_count(), 3);
    assert!(!derived.contains("e"));
}
