//! Context-free path queries.
//!
//! Three engines compute the same relation, the set of `(u, A, v)` such that
//! some path from `u` to `v` spells a word variable `A` derives:
//! - `hellings`: triple-at-a-time worklist over a binarized grammar
//! - `matrix`: per-variable boolean matrices over a binarized grammar
//! - `tensor`: Kronecker products with a recursive automaton

mod hellings;
mod matrix;
mod tensor;

pub use hellings::cfpq_worklist;
pub use matrix::cfpq_matrix;
pub use tensor::cfpq_tensor;

use crate::config::WorklistOrder;
use pathq_automata::{graph_to_automaton, AutomatonMatrices};
use pathq_core::{NodeId, Symbol};
use pathq_grammar::{normalize, Grammar, Variable};
use pathq_graph::{EdgeSource, LabeledGraph};
use std::collections::{BTreeMap, BTreeSet};

/// `(from, variable, to)`
pub type Triple = (NodeId, Variable, NodeId);

/// Node index plus one adjacency matrix per edge label.
pub(crate) fn graph_matrices<G: EdgeSource>(graph: &G) -> AutomatonMatrices<NodeId> {
    let no_nodes: [NodeId; 0] = [];
    AutomatonMatrices::from_automaton(&graph_to_automaton(graph, &no_nodes, &no_nodes))
}

/// Group the `variable` facts by source node, keeping sources in `starts`
/// and targets in `finals`. Every start the graph contains gets an entry,
/// possibly empty.
pub fn group_by_source<G: EdgeSource>(
    triples: &BTreeSet<Triple>,
    graph: &G,
    variable: &Variable,
    starts: &BTreeSet<NodeId>,
    finals: &BTreeSet<NodeId>,
) -> BTreeMap<NodeId, BTreeSet<NodeId>> {
    let mut grouped: BTreeMap<NodeId, BTreeSet<NodeId>> = graph
        .nodes()
        .filter(|node| starts.contains(node))
        .map(|node| (node, BTreeSet::new()))
        .collect();
    for (from, v, to) in triples {
        if v == variable && finals.contains(to) {
            if let Some(targets) = grouped.get_mut(from) {
                targets.insert(*to);
            }
        }
    }
    grouped
}

/// Whether `grammar` derives `word`, by running the worklist engine on the
/// path graph `0 -w1-> 1 -w2-> ... -> n`.
pub fn derives(grammar: &Grammar, word: &[Symbol]) -> bool {
    let mut path = LabeledGraph::new();
    path.add_node(NodeId(0));
    for (i, symbol) in (0u64..).zip(word) {
        path.add_edge(NodeId(i), symbol.clone(), NodeId(i + 1));
    }
    let end = NodeId(word.len() as u64);

    let binarized = normalize(grammar);
    cfpq_worklist(&binarized, &path, WorklistOrder::Fifo).contains(&(
        NodeId(0),
        grammar.start().clone(),
        end,
    ))
}
