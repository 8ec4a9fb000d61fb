//! Core graph storage implementation.

use crate::index::LabelIndex;
use crate::source::{Edge, EdgeSource};
use pathq_core::{NodeId, Symbol};
use std::collections::BTreeSet;

/// Summary statistics of a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphInfo {
    pub node_count: usize,
    pub edge_count: usize,
    pub labels: BTreeSet<Symbol>,
}

/// An in-memory labeled directed multigraph.
///
/// Nodes are identified by the caller. Edges are kept in insertion order and
/// may repeat; adding an edge adds its endpoints.
#[derive(Debug, Default, Clone)]
pub struct LabeledGraph {
    /// Node storage
    nodes: BTreeSet<NodeId>,
    /// Edge storage
    edges: Vec<Edge>,
    /// Label index
    label_index: LabelIndex,
}

impl LabeledGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(from, label, to)` triples.
    pub fn from_edges<L: Into<Symbol>>(edges: impl IntoIterator<Item = (u64, L, u64)>) -> Self {
        let mut graph = Self::new();
        for (from, label, to) in edges {
            graph.add_edge(NodeId(from), label, NodeId(to));
        }
        graph
    }

    // ==================== Mutation ====================

    /// Add an isolated node. Returns false if it was already present.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        self.nodes.insert(node)
    }

    /// Add a labeled edge, adding its endpoints if needed.
    pub fn add_edge(&mut self, from: NodeId, label: impl Into<Symbol>, to: NodeId) {
        let edge = Edge::new(from, label, to);
        let pos = self.edges.len();

        self.nodes.insert(from);
        self.nodes.insert(to);
        self.label_index.insert(&edge.label, pos);
        self.edges.push(edge);
    }

    // ==================== Query Operations ====================

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// All nodes in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// All edges in insertion order.
    pub fn all_edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Find edges carrying a label.
    pub fn edges_labeled<'a>(&'a self, label: &str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.label_index.get(label).map(|pos| &self.edges[pos])
    }

    /// Distinct labels in ascending order.
    pub fn labels(&self) -> BTreeSet<Symbol> {
        self.label_index.labels().cloned().collect()
    }

    // ==================== Statistics ====================

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn info(&self) -> GraphInfo {
        GraphInfo {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            labels: self.labels(),
        }
    }
}

impl EdgeSource for LabeledGraph {
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids()
    }

    fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }
}
