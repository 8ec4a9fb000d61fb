//! Synthetic graphs.

use crate::graph::LabeledGraph;
use pathq_core::{NodeId, Symbol};

/// Two directed cycles sharing node 0.
///
/// The first cycle `0 -> 1 -> ... -> n -> 0` is labeled `labels.0`, the second
/// `0 -> n+1 -> ... -> n+m -> 0` is labeled `labels.1`. The graph has
/// `n + m + 1` nodes. A cycle of length zero contributes no edges.
pub fn two_cycles(n: u64, m: u64, labels: (&str, &str)) -> LabeledGraph {
    let (first, second) = (Symbol::from(labels.0), Symbol::from(labels.1));
    let mut graph = LabeledGraph::new();
    graph.add_node(NodeId(0));

    if n > 0 {
        for i in 0..n {
            graph.add_edge(NodeId(i), first.clone(), NodeId(i + 1));
        }
        graph.add_edge(NodeId(n), first, NodeId(0));
    }

    if m > 0 {
        graph.add_edge(NodeId(0), second.clone(), NodeId(n + 1));
        for i in n + 1..n + m {
            graph.add_edge(NodeId(i), second.clone(), NodeId(i + 1));
        }
        graph.add_edge(NodeId(n + m), second, NodeId(0));
    }

    graph
}
