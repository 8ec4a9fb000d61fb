//! Multi-source reachability by frontier propagation.
//!
//! Instead of closing the full product matrix, the sweep keeps one row per
//! pattern state. Row `p` holds, left of column `k`, the identity bit `p`, and
//! right of it the graph nodes known to be reachable in pattern state `p`.
//! Multiplying by `block_diag(P_s, G_s)` moves every row one `s`-step in both
//! automata at once; the left half of a product row says which pattern state
//! the right half now belongs to.

use pathq_automata::{graph_to_automaton, Automaton, AutomatonMatrices, StateKey};
use pathq_core::{BoolMatrix, NodeId};
use pathq_graph::EdgeSource;
use std::collections::{BTreeMap, BTreeSet};

/// Nodes reachable from the sources, combined or grouped by source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reachability {
    AnySource(BTreeSet<NodeId>),
    PerSource(BTreeMap<NodeId, BTreeSet<NodeId>>),
}

impl Reachability {
    /// All reachable nodes, whichever source they came from.
    pub fn nodes(&self) -> BTreeSet<NodeId> {
        match self {
            Reachability::AnySource(nodes) => nodes.clone(),
            Reachability::PerSource(map) => map.values().flatten().copied().collect(),
        }
    }

    /// `(source, node)` pairs. Empty for `AnySource`, which does not know
    /// the sources.
    pub fn pairs(&self) -> BTreeSet<(NodeId, NodeId)> {
        match self {
            Reachability::AnySource(_) => BTreeSet::new(),
            Reachability::PerSource(map) => map
                .iter()
                .flat_map(|(source, nodes)| nodes.iter().map(move |node| (*source, *node)))
                .collect(),
        }
    }
}

/// Pattern and graph matrices prepared for frontier sweeps.
struct Frontier<S> {
    pattern: AutomatonMatrices<S>,
    graph: AutomatonMatrices<NodeId>,
    /// `block_diag(P_s, G_s)` for every symbol both sides use.
    steps: Vec<BoolMatrix>,
}

impl<S: StateKey> Frontier<S> {
    fn new<G: EdgeSource>(pattern: &Automaton<S>, graph: &G) -> Self {
        let pattern = AutomatonMatrices::from_automaton(pattern);
        let no_nodes: [NodeId; 0] = [];
        let graph = AutomatonMatrices::from_automaton(&graph_to_automaton(graph, &no_nodes, &no_nodes));
        let steps = pattern
            .matrices
            .iter()
            .filter_map(|(symbol, p)| {
                graph
                    .matrices
                    .get(symbol)
                    .map(|g| BoolMatrix::block_diag(p, g))
            })
            .collect();
        Self {
            pattern,
            graph,
            steps,
        }
    }

    fn width(&self) -> usize {
        self.pattern.state_count() + self.graph.state_count()
    }

    /// Graph nodes (by index) reachable by a non-empty accepted path from
    /// any of `sources` (by index).
    fn sweep(&self, sources: &[usize]) -> BTreeSet<usize> {
        let k = self.pattern.state_count();
        let mut seed = BoolMatrix::from_coords(k, self.width(), (0..k).map(|p| (p, p)));
        for &p in &self.pattern.start {
            for &v in sources {
                seed.set(p, k + v);
            }
        }

        // Right-block bits reached by at least one step; the seed itself is
        // not an answer.
        let mut reached = BoolMatrix::new(k, self.width());
        let mut iterations = 0;
        loop {
            let before = reached.nnz();
            let mut frontier = seed.clone();
            frontier |= &reached;

            let mut next = BoolMatrix::new(k, self.width());
            for step in &self.steps {
                let moved = frontier.mul(step);
                for row in 0..k {
                    let bits = moved.row(row);
                    for target in bits.iter().take_while(|&c| c < k) {
                        for node in bits.iter().skip_while(|&c| c < k) {
                            next.set(target, node);
                        }
                    }
                }
            }
            reached |= &next;

            iterations += 1;
            log::trace!("bfs iteration {}: {} nonzero", iterations, reached.nnz());
            if reached.nnz() == before {
                break;
            }
        }

        self.pattern
            .finals
            .iter()
            .flat_map(|&f| reached.row(f).iter().map(move |c| c - k))
            .collect()
    }
}

/// Nodes in `finals` reachable from `sources` along a non-empty path whose
/// labels `pattern` accepts.
///
/// With `per_source`, each source is swept on its own and the result maps
/// every source the graph contains to its reachable set (possibly empty).
/// Sources the graph does not contain are ignored.
pub fn reachable_from<S: StateKey, G: EdgeSource>(
    pattern: &Automaton<S>,
    graph: &G,
    sources: &BTreeSet<NodeId>,
    finals: &BTreeSet<NodeId>,
    per_source: bool,
) -> Reachability {
    let frontier = Frontier::new(pattern, graph);
    log::debug!(
        "bfs: {} pattern states, {} graph nodes, {} shared symbols, {} sources",
        frontier.pattern.state_count(),
        frontier.graph.state_count(),
        frontier.steps.len(),
        sources.len()
    );

    let source_indices = frontier.graph.index.indices_of(sources);
    let decode = |reached: BTreeSet<usize>| -> BTreeSet<NodeId> {
        reached
            .into_iter()
            .map(|i| frontier.graph.index.states()[i])
            .filter(|node| finals.contains(node))
            .collect()
    };

    let result = if per_source {
        Reachability::PerSource(
            source_indices
                .iter()
                .map(|&s| (frontier.graph.index.states()[s], decode(frontier.sweep(&[s]))))
                .collect(),
        )
    } else if source_indices.is_empty() {
        Reachability::AnySource(BTreeSet::new())
    } else {
        Reachability::AnySource(decode(frontier.sweep(&source_indices)))
    };

    log::debug!("bfs: {} reachable nodes", result.nodes().len());
    result
}
