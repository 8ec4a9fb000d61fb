//! The edge-source contract consumed by the query engines.

use pathq_core::{NodeId, Symbol};

/// A labeled edge `from --label--> to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub from: NodeId,
    pub label: Symbol,
    pub to: NodeId,
}

impl Edge {
    pub fn new(from: NodeId, label: impl Into<Symbol>, to: NodeId) -> Self {
        Self {
            from,
            label: label.into(),
            to,
        }
    }
}

/// Anything that can present itself as a node set plus a labeled edge multiset.
///
/// Every endpoint of an edge must also be reported by `nodes`.
pub trait EdgeSource {
    /// All nodes, including isolated ones, each reported once.
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_;

    /// All edges; parallel edges may repeat.
    fn edges(&self) -> impl Iterator<Item = &Edge> + '_;
}
