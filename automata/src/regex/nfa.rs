//! Thompson construction and epsilon elimination.

use super::ast::Regex;
use crate::automaton::Automaton;
use bit_set::BitSet;
use pathq_core::{StateId, Symbol};
use std::collections::{BTreeMap, HashMap};

/// An epsilon-NFA with a single start state (index 0) and a single final
/// state (the last one created).
#[derive(Debug, Clone)]
pub struct Nfa {
    /// Outgoing moves per state; `None` is an epsilon move.
    states: Vec<Vec<(Option<Symbol>, usize)>>,
}

impl Nfa {
    pub fn from_regex(regex: &Regex) -> Self {
        let mut nfa = Self { states: Vec::new() };
        let start = nfa.fresh();
        let last = nfa.build(regex, start);
        debug_assert_eq!(last, nfa.final_state());
        nfa
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    fn start_state(&self) -> usize {
        0
    }

    fn final_state(&self) -> usize {
        self.states.len() - 1
    }

    fn fresh(&mut self) -> usize {
        self.states.push(Vec::new());
        self.states.len() - 1
    }

    fn link(&mut self, from: usize, symbol: Option<Symbol>, to: usize) {
        self.states[from].push((symbol, to));
    }

    /// Build `regex` starting at `entry`; returns its exit state, which is
    /// always the most recently created state.
    fn build(&mut self, regex: &Regex, entry: usize) -> usize {
        match regex {
            Regex::Epsilon => {
                let exit = self.fresh();
                self.link(entry, None, exit);
                exit
            }
            Regex::Symbol(symbol) => {
                let exit = self.fresh();
                self.link(entry, Some(symbol.clone()), exit);
                exit
            }
            Regex::Concat(lhs, rhs) => {
                let mid = self.build(lhs, entry);
                self.build(rhs, mid)
            }
            Regex::Union(lhs, rhs) => {
                let left_entry = self.fresh();
                let right_entry = self.fresh();
                self.link(entry, None, left_entry);
                self.link(entry, None, right_entry);
                let left_exit = self.build(lhs, left_entry);
                let right_exit = self.build(rhs, right_entry);
                let exit = self.fresh();
                self.link(left_exit, None, exit);
                self.link(right_exit, None, exit);
                exit
            }
            Regex::Star(inner) => {
                let inner_entry = self.fresh();
                let inner_exit = self.build(inner, inner_entry);
                let exit = self.fresh();
                self.link(inner_exit, None, inner_entry);
                self.link(inner_exit, None, exit);
                self.link(entry, None, inner_entry);
                self.link(entry, None, exit);
                exit
            }
            Regex::Optional(inner) => {
                let inner_entry = self.fresh();
                let inner_exit = self.build(inner, inner_entry);
                let exit = self.fresh();
                self.link(inner_exit, None, exit);
                self.link(entry, None, inner_entry);
                self.link(entry, None, exit);
                exit
            }
        }
    }

    /// Epsilon closure of a set of states.
    fn close(&self, seeds: &BitSet) -> BitSet {
        let mut closed = seeds.clone();
        let mut stack: Vec<usize> = seeds.iter().collect();
        while let Some(state) = stack.pop() {
            for (symbol, next) in &self.states[state] {
                if symbol.is_none() && closed.insert(*next) {
                    stack.push(*next);
                }
            }
        }
        closed
    }

    /// Subset construction over epsilon-closed state sets. The result is
    /// deterministic and epsilon-free, with start state `q0`.
    pub fn to_dfa(&self) -> Automaton<StateId> {
        let mut dfa = Automaton::new();
        let mut ids: HashMap<BitSet, StateId> = HashMap::new();

        let mut seed = BitSet::with_capacity(self.state_count());
        seed.insert(self.start_state());
        let start = self.close(&seed);

        ids.insert(start.clone(), StateId(0));
        dfa.add_start(StateId(0));
        let mut stack = vec![start];

        while let Some(subset) = stack.pop() {
            let id = ids[&subset];
            if subset.contains(self.final_state()) {
                dfa.add_final(id);
            }

            let mut destinations: BTreeMap<&Symbol, BitSet> = BTreeMap::new();
            for state in subset.iter() {
                for (symbol, next) in &self.states[state] {
                    if let Some(symbol) = symbol {
                        destinations
                            .entry(symbol)
                            .or_insert_with(|| BitSet::with_capacity(self.state_count()))
                            .insert(*next);
                    }
                }
            }

            for (symbol, targets) in destinations {
                let closed = self.close(&targets);
                let target_id = match ids.get(&closed) {
                    Some(&existing) => existing,
                    None => {
                        let fresh = StateId::from(ids.len());
                        ids.insert(closed.clone(), fresh);
                        stack.push(closed);
                        fresh
                    }
                };
                dfa.add_transition(id, symbol.clone(), target_id);
            }
        }

        dfa
    }
}
