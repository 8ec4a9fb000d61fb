//! Indexes for efficient graph lookups.

use pathq_core::Symbol;
use std::collections::HashMap;

/// Label index: Symbol -> edge positions
#[derive(Debug, Default, Clone)]
pub struct LabelIndex {
    index: HashMap<Symbol, Vec<usize>>,
}

impl LabelIndex {
    pub fn insert(&mut self, label: &Symbol, edge: usize) {
        self.index.entry(label.clone()).or_default().push(edge);
    }

    pub fn get(&self, label: &str) -> impl Iterator<Item = usize> + '_ {
        self.index
            .get(label)
            .into_iter()
            .flat_map(|edges| edges.iter().copied())
    }

    pub fn labels(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.index.keys()
    }
}
