//! Tensor CFPQ over a recursive automaton.
//!
//! Each variable has a fact matrix recording which node pairs it is known to
//! connect. Each round takes the Kronecker product of the RFA with the
//! graph, where box transitions on a variable read that variable's fact
//! matrix and every other transition reads the graph's edge matrix. The
//! product is closed, and every closed path from a box's start to the same
//! box's final state marks the corresponding node pair as a fact. Rounds
//! repeat until no fact matrix grows.
//!
//! Fact matrices are kept apart from the edge matrices: a graph edge whose
//! label is spelled like a variable is an ordinary edge that no box reads.

use super::{graph_matrices, Triple};
use pathq_automata::ProductMatrices;
use pathq_core::BoolMatrix;
use pathq_grammar::{Rfa, Variable};
use pathq_graph::EdgeSource;
use std::collections::{BTreeMap, BTreeSet};

pub fn cfpq_tensor<G: EdgeSource>(rfa: &Rfa, graph: &G) -> BTreeSet<Triple> {
    let rfa_matrices = rfa.to_matrices();
    let calls = rfa.calls();
    let mut edges = graph_matrices(graph);
    edges.matrices.retain(|label, _| !calls.contains(label));
    let n = edges.state_count();

    let mut facts: BTreeMap<&Variable, BoolMatrix> =
        rfa.variables().map(|v| (v, BoolMatrix::square(n))).collect();
    for variable in rfa.nullable() {
        if let Some(m) = facts.get_mut(variable) {
            *m |= &BoolMatrix::identity(n);
        }
    }

    // (box start, box final) index pairs per variable.
    let bounds: BTreeMap<&Variable, (&BTreeSet<usize>, &BTreeSet<usize>)> = rfa_matrices
        .boxes
        .iter()
        .map(|(v, (starts, finals))| (v, (starts, finals)))
        .collect();

    log::debug!(
        "tensor cfpq: {} rfa states, {} nodes, {} variables",
        rfa_matrices.matrices.state_count(),
        n,
        facts.len()
    );

    let mut rounds = 0;
    loop {
        let mut right = edges.clone();
        right
            .matrices
            .extend(facts.iter().map(|(v, m)| (v.as_symbol(), m.clone())));
        let product = ProductMatrices::new(&rfa_matrices.matrices, &right);
        let mut closure = product.combined();
        closure.transitive_closure();

        let mut grew = false;
        for (i, j) in closure.iter() {
            let (rfa_from, node_from) = product.split(i);
            let (rfa_to, node_to) = product.split(j);
            let Some(variable) = rfa_matrices.owner(rfa_from) else {
                continue;
            };
            let Some((starts, finals)) = bounds.get(variable) else {
                continue;
            };
            if !starts.contains(&rfa_from) || !finals.contains(&rfa_to) {
                continue;
            }
            if let Some(m) = facts.get_mut(variable) {
                grew |= m.set(node_from, node_to);
            }
        }

        rounds += 1;
        log::trace!("tensor cfpq round {}: closure has {} nonzero", rounds, closure.nnz());
        if !grew {
            break;
        }
    }

    let nodes = edges.index.states();
    let triples: BTreeSet<Triple> = facts
        .iter()
        .flat_map(|(v, m)| m.iter().map(move |(i, j)| (nodes[i], (*v).clone(), nodes[j])))
        .collect();
    log::debug!("tensor cfpq: converged after {} rounds, {} facts", rounds, triples.len());
    triples
}
