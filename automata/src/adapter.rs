//! Viewing a labeled graph as an automaton.

use crate::automaton::Automaton;
use pathq_core::NodeId;
use pathq_graph::EdgeSource;

/// The nondeterministic automaton whose states are the graph's nodes and
/// whose transitions are its edges.
///
/// `starts` and `finals` become the start and final states; nodes the graph
/// does not contain are ignored. Parallel edges collapse into one transition.
pub fn graph_to_automaton<'a, G: EdgeSource>(
    graph: &G,
    starts: impl IntoIterator<Item = &'a NodeId>,
    finals: impl IntoIterator<Item = &'a NodeId>,
) -> Automaton<NodeId> {
    let mut automaton = Automaton::new();
    for node in graph.nodes() {
        automaton.add_state(node);
    }
    for edge in graph.edges() {
        automaton.add_transition(edge.from, edge.label.clone(), edge.to);
    }

    for node in starts {
        if automaton.states().contains(node) {
            automaton.add_start(*node);
        }
    }
    for node in finals {
        if automaton.states().contains(node) {
            automaton.add_final(*node);
        }
    }
    automaton
}
