//! Regular path queries by product closure.

use pathq_automata::{graph_to_automaton, Automaton, AutomatonMatrices, ProductMatrices, StateKey};
use pathq_core::NodeId;
use pathq_graph::EdgeSource;
use std::collections::BTreeSet;

/// Pairs `(s, f)` with `s` in `starts`, `f` in `finals`, connected by a
/// non-empty path whose label sequence `pattern` accepts.
///
/// Builds the product of the pattern with the graph automaton, ORs its
/// symbol matrices into one adjacency matrix, closes it by iterated squaring
/// and reads the (start, final) bits back as graph node pairs.
pub fn regular_pairs<S: StateKey, G: EdgeSource>(
    pattern: &Automaton<S>,
    graph: &G,
    starts: &BTreeSet<NodeId>,
    finals: &BTreeSet<NodeId>,
) -> BTreeSet<(NodeId, NodeId)> {
    let graph_automaton = graph_to_automaton(graph, starts, finals);
    let pattern_matrices = AutomatonMatrices::from_automaton(pattern);
    let graph_matrices = AutomatonMatrices::from_automaton(&graph_automaton);
    let product = ProductMatrices::new(&pattern_matrices, &graph_matrices);

    log::debug!(
        "rpq: {} pattern states, {} graph nodes, {} shared symbols",
        product.left_size,
        product.right_size,
        product.matrices.len()
    );

    let mut pairs = BTreeSet::new();
    if product.start.is_empty() || product.finals.is_empty() {
        return pairs;
    }

    let mut closure = product.combined();
    let iterations = closure.transitive_closure();

    let nodes = graph_matrices.index.states();
    for &from in &product.start {
        for to in closure.row(from).iter() {
            if product.finals.contains(&to) {
                let (_, source) = product.split(from);
                let (_, target) = product.split(to);
                pairs.insert((nodes[source], nodes[target]));
            }
        }
    }

    log::debug!(
        "rpq: converged after {} squarings, {} pairs",
        iterations,
        pairs.len()
    );
    pairs
}
