//! Dense indexing of automaton states.

use std::collections::HashMap;
use std::hash::Hash;

/// A bijection between a set of states and `0..n`.
///
/// Indices are assigned in first-seen order, so building an index from an
/// ordered collection gives reproducible matrix layouts.
#[derive(Debug, Clone)]
pub struct StateIndex<S> {
    states: Vec<S>,
    positions: HashMap<S, usize>,
}

impl<S> Default for StateIndex<S> {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<S: Clone + Eq + Hash> StateIndex<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state, returning its index. Re-adding a state returns the
    /// index it already has.
    pub fn insert(&mut self, state: S) -> usize {
        if let Some(&idx) = self.positions.get(&state) {
            return idx;
        }
        let idx = self.states.len();
        self.positions.insert(state.clone(), idx);
        self.states.push(state);
        idx
    }

    pub fn index_of(&self, state: &S) -> Option<usize> {
        self.positions.get(state).copied()
    }

    pub fn state(&self, index: usize) -> Option<&S> {
        self.states.get(index)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.positions.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// States in index order.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// Indices of the given states; states not in the index are skipped.
    pub fn indices_of<'a>(&'a self, states: impl IntoIterator<Item = &'a S>) -> Vec<usize> {
        states
            .into_iter()
            .filter_map(|s| self.index_of(s))
            .collect()
    }
}

impl<S: Clone + Eq + Hash> FromIterator<S> for StateIndex<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = Self::new();
        for state in iter {
            index.insert(state);
        }
        index
    }
}
