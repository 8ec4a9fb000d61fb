//! Worklist (Hellings) CFPQ.

use super::Triple;
use crate::config::WorklistOrder;
use pathq_core::{NodeId, StateIndex, Symbol};
use pathq_grammar::{BinarizedGrammar, Variable};
use pathq_graph::EdgeSource;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

type Fact = (usize, usize, usize);

/// Incremental closure over `(node, variable, node)` facts.
struct Worklist {
    facts: HashSet<Fact>,
    queue: VecDeque<Fact>,
    /// `u -> [(var, v)]`
    by_start: HashMap<usize, Vec<(usize, usize)>>,
    /// `v -> [(u, var)]`
    by_end: HashMap<usize, Vec<(usize, usize)>>,
    order: WorklistOrder,
}

impl Worklist {
    fn new(order: WorklistOrder) -> Self {
        Self {
            facts: HashSet::new(),
            queue: VecDeque::new(),
            by_start: HashMap::new(),
            by_end: HashMap::new(),
            order,
        }
    }

    fn add(&mut self, fact: Fact) {
        if self.facts.insert(fact) {
            let (u, var, v) = fact;
            self.by_start.entry(u).or_default().push((var, v));
            self.by_end.entry(v).or_default().push((u, var));
            self.queue.push_back(fact);
        }
    }

    fn pop(&mut self) -> Option<Fact> {
        match self.order {
            WorklistOrder::Fifo => self.queue.pop_front(),
            WorklistOrder::Lifo => self.queue.pop_back(),
        }
    }
}

/// All facts `(u, A, v)` such that some path from `u` to `v` spells a word
/// `A` derives.
pub fn cfpq_worklist<G: EdgeSource>(
    grammar: &BinarizedGrammar,
    graph: &G,
    order: WorklistOrder,
) -> BTreeSet<Triple> {
    let nodes: StateIndex<NodeId> = graph.nodes().collect();
    let variables: StateIndex<Variable> = grammar.variables().iter().cloned().collect();
    let var = |v: &Variable| variables.index_of(v);

    // Binary rules indexed by each side: `left -> [(head, right)]`,
    // `right -> [(head, left)]`.
    let mut by_left: HashMap<usize, Vec<(usize, usize)>> = HashMap::new();
    let mut by_right: HashMap<usize, Vec<(usize, usize)>> = HashMap::new();
    for rule in grammar.binary_rules() {
        let (Some(head), Some(left), Some(right)) = (var(&rule.head), var(&rule.left), var(&rule.right))
        else {
            continue;
        };
        by_left.entry(left).or_default().push((head, right));
        by_right.entry(right).or_default().push((head, left));
    }

    let mut terminal_heads: HashMap<&Symbol, Vec<usize>> = HashMap::new();
    for rule in grammar.terminal_rules() {
        if let Some(head) = var(&rule.head) {
            terminal_heads.entry(&rule.terminal).or_default().push(head);
        }
    }

    log::debug!(
        "worklist cfpq: {} nodes, {} variables, {} productions",
        nodes.len(),
        variables.len(),
        grammar.production_count()
    );

    let mut work = Worklist::new(order);
    for head in grammar.epsilon_heads().iter().filter_map(var) {
        for node in 0..nodes.len() {
            work.add((node, head, node));
        }
    }
    for edge in graph.edges() {
        let (Some(u), Some(v)) = (nodes.index_of(&edge.from), nodes.index_of(&edge.to)) else {
            continue;
        };
        for &head in terminal_heads.get(&edge.label).into_iter().flatten() {
            work.add((u, head, v));
        }
    }

    let mut processed = 0usize;
    while let Some((u, mid, v)) = work.pop() {
        let mut proposals = Vec::new();
        // (x, left, u) + (u, mid, v) with head -> left mid
        for &(x, left) in work.by_end.get(&u).into_iter().flatten() {
            for &(head, l) in by_right.get(&mid).into_iter().flatten() {
                if l == left {
                    proposals.push((x, head, v));
                }
            }
        }
        // (u, mid, v) + (v, right, y) with head -> mid right
        for &(right, y) in work.by_start.get(&v).into_iter().flatten() {
            for &(head, r) in by_left.get(&mid).into_iter().flatten() {
                if r == right {
                    proposals.push((u, head, y));
                }
            }
        }
        for fact in proposals {
            work.add(fact);
        }

        processed += 1;
        if processed % 1024 == 0 {
            log::trace!("worklist: {} processed, {} facts", processed, work.facts.len());
        }
    }

    log::debug!(
        "worklist cfpq: converged after {} pops, {} facts",
        processed,
        work.facts.len()
    );

    work.facts
        .into_iter()
        .map(|(u, v_idx, w)| {
            (
                nodes.states()[u],
                variables.states()[v_idx].clone(),
                nodes.states()[w],
            )
        })
        .collect()
}
