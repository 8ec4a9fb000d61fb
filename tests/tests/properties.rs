//! Randomized cross-checks between engines and algebraic properties of the
//! building blocks. Every case is seeded, so a failure reproduces.

use pathq_automata::{compile_regex, intersect};
use pathq_core::{BoolMatrix, NodeId};
use pathq_grammar::{normalize, Grammar, Variable};
use pathq_query::{
    cfpq_matrix, cfpq_worklist, query_context_free, query_reachability, query_regular, CfpqAlgorithm,
    Reachability, WorklistOrder,
};
use pathq_tests::prelude::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

const LABELS: [&str; 3] = ["a", "b", "c"];
// Grammar terminals plus labels spelled like the generated variables.
const GRAPH_LABELS: [&str; 4] = ["a", "b", "S", "A"];
const CASES: u64 = 40;

fn all_nodes(n: u64) -> BTreeSet<NodeId> {
    (0..n).map(NodeId).collect()
}

#[test]
fn test_cfpq_engines_agree() {
    for seed in 0..CASES {
        let mut rng = StdRng::seed_from_u64(seed);
        let text = random_grammar(&mut rng, 6, &LABELS[..2]);
        let grammar = Grammar::from_text(&text).unwrap();
        let nodes = rng.gen_range(1..7);
        let edges = rng.gen_range(0..16);
        let graph = random_graph(&mut rng, nodes, edges, &GRAPH_LABELS);

        // Every triple, not only the start variable.
        let binarized = normalize(&grammar);
        let fifo = cfpq_worklist(&binarized, &graph, WorklistOrder::Fifo);
        assert_eq!(cfpq_worklist(&binarized, &graph, WorklistOrder::Lifo), fifo, "seed {}\n{}", seed, text);
        assert_eq!(cfpq_matrix(&binarized, &graph), fifo, "seed {}\n{}", seed, text);

        let all = all_nodes(nodes);
        let s = Variable::from("S");
        let expected = query_context_free(&grammar, &graph, &s, &all, &all, CfpqAlgorithm::Worklist);
        for algorithm in [CfpqAlgorithm::Matrix, CfpqAlgorithm::Tensor] {
            let actual = query_context_free(&grammar, &graph, &s, &all, &all, algorithm);
            assert_eq!(actual, expected, "seed {} {}\n{}", seed, algorithm, text);
        }
    }
}

#[test]
fn test_regular_and_frontier_agree() {
    for seed in 0..CASES {
        let mut rng = StdRng::seed_from_u64(seed);
        let pattern = random_regex(&mut rng, 4, &LABELS);
        let nodes = rng.gen_range(1..8);
        let edges = rng.gen_range(0..16);
        let graph = random_graph(&mut rng, nodes, edges, &LABELS);
        let starts: BTreeSet<NodeId> = (0..nodes).filter(|_| rng.gen_bool(0.5)).map(NodeId).collect();
        let finals: BTreeSet<NodeId> = (0..nodes).filter(|_| rng.gen_bool(0.5)).map(NodeId).collect();

        let pairs = query_regular(&pattern, &graph, &starts, &finals).unwrap();
        let per_source = query_reachability(&pattern, &graph, &starts, &finals, true).unwrap();
        let any = query_reachability(&pattern, &graph, &starts, &finals, false).unwrap();

        assert_eq!(per_source.pairs(), pairs, "seed {}: {}", seed, pattern);
        let targets: BTreeSet<NodeId> = pairs.iter().map(|(_, to)| *to).collect();
        assert_eq!(any, Reachability::AnySource(targets), "seed {}: {}", seed, pattern);
    }
}

#[test]
fn test_adding_edges_never_removes_answers() {
    for seed in 0..CASES {
        let mut rng = StdRng::seed_from_u64(seed);
        let pattern = random_regex(&mut rng, 3, &LABELS[..2]);
        let grammar = Grammar::from_text(&random_grammar(&mut rng, 5, &LABELS[..2])).unwrap();
        let nodes = 6;
        let mut graph = random_graph(&mut rng, nodes, 6, &LABELS[..2]);
        let all = all_nodes(nodes);
        let s = Variable::from("S");

        let regular_before = query_regular(&pattern, &graph, &all, &all).unwrap();
        let cf_before = query_context_free(&grammar, &graph, &s, &all, &all, CfpqAlgorithm::Worklist);

        for _ in 0..4 {
            let label = LABELS[rng.gen_range(0..2)];
            let (from, to) = (rng.gen_range(0..nodes), rng.gen_range(0..nodes));
            graph.add_edge(NodeId(from), label, NodeId(to));
        }

        let regular_after = query_regular(&pattern, &graph, &all, &all).unwrap();
        assert!(regular_before.is_subset(&regular_after), "seed {}: {}", seed, pattern);

        let cf_after = query_context_free(&grammar, &graph, &s, &all, &all, CfpqAlgorithm::Worklist);
        for (source, targets) in &cf_before {
            assert!(targets.is_subset(&cf_after[source]), "seed {}", seed);
        }
    }
}

#[test]
fn test_closure_is_idempotent_and_transitive() {
    for seed in 0..CASES {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = rng.gen_range(1..12);
        let bits = rng.gen_range(0..=n * 2);
        let original = BoolMatrix::from_coords(n, n, (0..bits).map(|_| (rng.gen_range(0..n), rng.gen_range(0..n))));

        let mut closed = original.clone();
        closed.transitive_closure();
        let mut twice = closed.clone();
        twice.transitive_closure();
        assert_eq!(twice, closed, "seed {}", seed);

        for (i, j) in original.iter() {
            assert!(closed.get(i, j), "seed {}: lost ({}, {})", seed, i, j);
        }
        for (i, j) in closed.iter() {
            for k in closed.row(j).iter() {
                assert!(closed.get(i, k), "seed {}: ({}, {}) ({}, {}) not composed", seed, i, j, j, k);
            }
        }
    }
}

#[test]
fn test_intersection_identities() {
    let universe = compile_regex("(a | b | c)*").unwrap();
    for seed in 0..CASES {
        let mut rng = StdRng::seed_from_u64(seed);
        let pattern = random_regex(&mut rng, 4, &LABELS);
        let automaton = compile_regex(&pattern).unwrap();

        assert!(intersect(&automaton, &automaton).is_equivalent_to(&automaton), "seed {}: {}", seed, pattern);
        assert!(intersect(&automaton, &universe).is_equivalent_to(&automaton), "seed {}: {}", seed, pattern);
        assert!(intersect(&universe, &automaton).is_equivalent_to(&automaton), "seed {}: {}", seed, pattern);
    }
}
