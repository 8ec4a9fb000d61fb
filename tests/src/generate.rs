//! Random inputs for property tests.
//!
//! Every generator takes the caller's RNG, so a seeded `StdRng` makes a
//! failing case reproducible.

use pathq_core::NodeId;
use pathq_graph::LabeledGraph;
use rand::Rng;

/// A graph on nodes `0..nodes` with `edges` random labeled edges. Every node
/// is present even if no edge touches it.
pub fn random_graph(rng: &mut impl Rng, nodes: u64, edges: usize, labels: &[&str]) -> LabeledGraph {
    let mut graph = LabeledGraph::new();
    for node in 0..nodes {
        graph.add_node(NodeId(node));
    }
    if nodes == 0 || labels.is_empty() {
        return graph;
    }
    for _ in 0..edges {
        let from = rng.gen_range(0..nodes);
        let to = rng.gen_range(0..nodes);
        let label = labels[rng.gen_range(0..labels.len())];
        graph.add_edge(NodeId(from), label, NodeId(to));
    }
    graph
}

/// A regular expression over `labels`, nested at most `depth` deep.
pub fn random_regex(rng: &mut impl Rng, depth: usize, labels: &[&str]) -> String {
    if depth == 0 || rng.gen_bool(0.3) {
        return labels[rng.gen_range(0..labels.len())].to_string();
    }
    match rng.gen_range(0..4) {
        0 => format!(
            "{} {}",
            random_regex(rng, depth - 1, labels),
            random_regex(rng, depth - 1, labels)
        ),
        1 => format!(
            "({} | {})",
            random_regex(rng, depth - 1, labels),
            random_regex(rng, depth - 1, labels)
        ),
        2 => format!("({})*", random_regex(rng, depth - 1, labels)),
        _ => format!("({})?", random_regex(rng, depth - 1, labels)),
    }
}

/// Grammar text with start `S` over the variables `S`, `A`, `B` and the
/// given terminals. Bodies have zero to three symbols.
pub fn random_grammar(rng: &mut impl Rng, productions: usize, terminals: &[&str]) -> String {
    const VARIABLES: [&str; 3] = ["S", "A", "B"];
    let mut lines = Vec::new();
    for i in 0..productions {
        // every variable gets at least one production
        let head = match VARIABLES.get(i) {
            Some(head) => *head,
            None => VARIABLES[rng.gen_range(0..VARIABLES.len())],
        };
        let len = rng.gen_range(0..=3);
        let body: Vec<&str> = (0..len)
            .map(|_| {
                if terminals.is_empty() || rng.gen_bool(0.5) {
                    VARIABLES[rng.gen_range(0..VARIABLES.len())]
                } else {
                    terminals[rng.gen_range(0..terminals.len())]
                }
            })
            .collect();
        let body = if body.is_empty() {
            "epsilon".to_string()
        } else {
            body.join(" ")
        };
        lines.push(format!("{} -> {}", head, body));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathq_automata::compile_regex;
    use pathq_grammar::Grammar;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_graph_keeps_every_node() {
        let mut rng = StdRng::seed_from_u64(42);
        let graph = random_graph(&mut rng, 10, 3, &["a", "b"]);
        assert_eq!(graph.node_count(), 10);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_generated_text_parses() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let regex = random_regex(&mut rng, 4, &["a", "b", "c"]);
            assert!(compile_regex(&regex).is_ok(), "{}", regex);

            let grammar = random_grammar(&mut rng, 6, &["a", "b"]);
            assert!(Grammar::from_text(&grammar).is_ok(), "{}", grammar);
        }
    }

    #[test]
    fn test_same_seed_same_graph() {
        let a = random_graph(&mut StdRng::seed_from_u64(3), 6, 12, &["x", "y"]);
        let b = random_graph(&mut StdRng::seed_from_u64(3), 6, 12, &["x", "y"]);
        assert_eq!(a.all_edges(), b.all_edges());
    }
}
