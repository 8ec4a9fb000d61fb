//! Product (intersection) of two automata.

use crate::automaton::{Automaton, StateKey};
use crate::matrices::{AutomatonMatrices, ProductMatrices};

/// The product automaton of `left` and `right`, accepting the intersection
/// of their languages.
///
/// States are all pairs `(a, b)`. Transitions come from the Kronecker product
/// of the two operands' matrices for every symbol both use; start and final
/// states are the Cartesian products of the operands' start and final sets.
pub fn intersect<A: StateKey, B: StateKey>(
    left: &Automaton<A>,
    right: &Automaton<B>,
) -> Automaton<(A, B)> {
    let lm = AutomatonMatrices::from_automaton(left);
    let rm = AutomatonMatrices::from_automaton(right);
    let product = ProductMatrices::new(&lm, &rm);
    log::debug!(
        "intersecting {}x{} states over {} shared symbols",
        product.left_size,
        product.right_size,
        product.matrices.len()
    );

    let pair = |flat: usize| -> (A, B) {
        let (a, b) = product.split(flat);
        (lm.index.states()[a].clone(), rm.index.states()[b].clone())
    };

    let mut automaton = Automaton::new();
    for a in lm.index.states() {
        for b in rm.index.states() {
            automaton.add_state((a.clone(), b.clone()));
        }
    }
    for (symbol, m) in &product.matrices {
        for (i, j) in m.iter() {
            automaton.add_transition(pair(i), symbol.clone(), pair(j));
        }
    }
    for &i in &product.start {
        automaton.add_start(pair(i));
    }
    for &i in &product.finals {
        automaton.add_final(pair(i));
    }
    automaton
}
