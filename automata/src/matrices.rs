//! Boolean-matrix decomposition of automata.

use crate::automaton::{Automaton, StateKey};
use pathq_core::{BoolMatrix, StateIndex, Symbol};
use std::collections::{BTreeMap, BTreeSet};

/// An automaton as one adjacency matrix per symbol over a dense state index.
///
/// Bit `(i, j)` of `matrices[s]` is set iff the automaton has a transition
/// `state(i) --s--> state(j)`. Symbols with no transitions have no entry.
#[derive(Debug, Clone)]
pub struct AutomatonMatrices<S> {
    pub index: StateIndex<S>,
    pub matrices: BTreeMap<Symbol, BoolMatrix>,
    pub start: BTreeSet<usize>,
    pub finals: BTreeSet<usize>,
}

impl<S: StateKey> AutomatonMatrices<S> {
    /// Decompose an automaton. States are indexed in ascending order.
    pub fn from_automaton(automaton: &Automaton<S>) -> Self {
        let index: StateIndex<S> = automaton.states().iter().cloned().collect();
        let n = index.len();

        let mut matrices: BTreeMap<Symbol, BoolMatrix> = BTreeMap::new();
        for t in automaton.transitions() {
            // Both endpoints are states of the automaton, so the lookups hit.
            let (Some(i), Some(j)) = (index.index_of(&t.from), index.index_of(&t.to)) else {
                continue;
            };
            matrices
                .entry(t.symbol.clone())
                .or_insert_with(|| BoolMatrix::square(n))
                .set(i, j);
        }

        Self {
            start: index.indices_of(automaton.start_states()).into_iter().collect(),
            finals: index.indices_of(automaton.final_states()).into_iter().collect(),
            index,
            matrices,
        }
    }

    pub fn state_count(&self) -> usize {
        self.index.len()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.matrices.keys()
    }

    pub fn matrix(&self, symbol: &Symbol) -> Option<&BoolMatrix> {
        self.matrices.get(symbol)
    }

    /// The union of all symbol matrices: one-step reachability ignoring
    /// labels.
    pub fn combined(&self) -> BoolMatrix {
        let mut all = BoolMatrix::square(self.state_count());
        for m in self.matrices.values() {
            all |= m;
        }
        all
    }

    /// Rebuild an automaton over the original states.
    pub fn to_automaton(&self) -> Automaton<S> {
        let mut automaton = Automaton::new();
        for state in self.index.states() {
            automaton.add_state(state.clone());
        }
        for (symbol, m) in &self.matrices {
            for (i, j) in m.iter() {
                automaton.add_transition(
                    self.index.states()[i].clone(),
                    symbol.clone(),
                    self.index.states()[j].clone(),
                );
            }
        }
        for &i in &self.start {
            automaton.add_start(self.index.states()[i].clone());
        }
        for &i in &self.finals {
            automaton.add_final(self.index.states()[i].clone());
        }
        automaton
    }
}

/// Per-symbol Kronecker products of two decomposed automata.
///
/// A product state is the flat index `a * |B| + b` of the pair `(a, b)`;
/// `split` and `join` convert between the two. Only symbols present on both
/// sides get a matrix. The operands are borrowed, never combined with
/// themselves.
#[derive(Debug, Clone)]
pub struct ProductMatrices {
    pub left_size: usize,
    pub right_size: usize,
    pub matrices: BTreeMap<Symbol, BoolMatrix>,
    pub start: BTreeSet<usize>,
    pub finals: BTreeSet<usize>,
}

impl ProductMatrices {
    pub fn new<A: StateKey, B: StateKey>(
        left: &AutomatonMatrices<A>,
        right: &AutomatonMatrices<B>,
    ) -> Self {
        let right_size = right.state_count();
        let matrices = left
            .matrices
            .iter()
            .filter_map(|(symbol, l)| {
                right
                    .matrices
                    .get(symbol)
                    .map(|r| (symbol.clone(), l.kron(r)))
            })
            .collect();

        let pairs = |ls: &BTreeSet<usize>, rs: &BTreeSet<usize>| -> BTreeSet<usize> {
            ls.iter()
                .flat_map(|a| rs.iter().map(move |b| a * right_size + b))
                .collect()
        };

        Self {
            left_size: left.state_count(),
            right_size,
            start: pairs(&left.start, &right.start),
            finals: pairs(&left.finals, &right.finals),
            matrices,
        }
    }

    pub fn size(&self) -> usize {
        self.left_size * self.right_size
    }

    pub fn split(&self, flat: usize) -> (usize, usize) {
        (flat / self.right_size, flat % self.right_size)
    }

    pub fn join(&self, left: usize, right: usize) -> usize {
        left * self.right_size + right
    }

    /// Union of all product matrices.
    pub fn combined(&self) -> BoolMatrix {
        let mut all = BoolMatrix::square(self.size());
        for m in self.matrices.values() {
            all |= m;
        }
        all
    }
}
