//! Matrix CFPQ: one boolean matrix per variable, closed under the binary
//! rules by repeated multiplication.

use super::{graph_matrices, Triple};
use pathq_core::BoolMatrix;
use pathq_grammar::{BinarizedGrammar, Variable};
use pathq_graph::EdgeSource;
use std::collections::{BTreeMap, BTreeSet};

pub fn cfpq_matrix<G: EdgeSource>(grammar: &BinarizedGrammar, graph: &G) -> BTreeSet<Triple> {
    let graph = graph_matrices(graph);
    let n = graph.state_count();

    let mut matrices: BTreeMap<&Variable, BoolMatrix> = grammar
        .variables()
        .iter()
        .map(|v| (v, BoolMatrix::square(n)))
        .collect();

    for head in grammar.epsilon_heads() {
        if let Some(m) = matrices.get_mut(head) {
            *m |= &BoolMatrix::identity(n);
        }
    }
    for rule in grammar.terminal_rules() {
        if let (Some(m), Some(edges)) = (matrices.get_mut(&rule.head), graph.matrix(&rule.terminal)) {
            *m |= edges;
        }
    }

    log::debug!(
        "matrix cfpq: {} nodes, {} variables, {} binary rules",
        n,
        matrices.len(),
        grammar.binary_rules().len()
    );

    let total = |matrices: &BTreeMap<&Variable, BoolMatrix>| -> usize {
        matrices.values().map(BoolMatrix::nnz).sum()
    };

    let mut sweeps = 0;
    loop {
        let before = total(&matrices);
        for rule in grammar.binary_rules() {
            let (Some(left), Some(right)) = (matrices.get(&rule.left), matrices.get(&rule.right)) else {
                continue;
            };
            let product = left.mul(right);
            if let Some(head) = matrices.get_mut(&rule.head) {
                *head |= &product;
            }
        }
        sweeps += 1;
        let after = total(&matrices);
        log::trace!("matrix cfpq sweep {}: {} nonzero", sweeps, after);
        if after == before {
            break;
        }
    }

    let nodes = graph.index.states();
    let triples: BTreeSet<Triple> = matrices
        .iter()
        .flat_map(|(variable, m)| {
            m.iter()
                .map(move |(i, j)| (nodes[i], (*variable).clone(), nodes[j]))
        })
        .collect();
    log::debug!("matrix cfpq: converged after {} sweeps, {} facts", sweeps, triples.len());
    triples
}
