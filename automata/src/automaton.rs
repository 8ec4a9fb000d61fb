//! Finite automata over symbol-labeled transitions.
//!
//! An `Automaton` is an immutable-once-built value: states keyed by a caller
//! supplied identity, a set of `(from, symbol, to)` transitions, and start and
//! final state sets. It is epsilon-free by construction; the regex front end
//! eliminates the empty word before producing one.

use pathq_core::{StateId, Symbol};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

/// Bound for anything usable as an automaton state.
pub trait StateKey: Clone + Ord + Hash + Debug {}

impl<T: Clone + Ord + Hash + Debug> StateKey for T {}

/// A transition `from --symbol--> to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Transition<S> {
    pub from: S,
    pub symbol: Symbol,
    pub to: S,
}

/// A nondeterministic finite automaton without epsilon moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton<S: StateKey> {
    states: BTreeSet<S>,
    transitions: BTreeSet<Transition<S>>,
    start: BTreeSet<S>,
    finals: BTreeSet<S>,
}

impl<S: StateKey> Default for Automaton<S> {
    fn default() -> Self {
        Self {
            states: BTreeSet::new(),
            transitions: BTreeSet::new(),
            start: BTreeSet::new(),
            finals: BTreeSet::new(),
        }
    }
}

impl<S: StateKey> Automaton<S> {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Construction ====================

    pub fn add_state(&mut self, state: S) {
        self.states.insert(state);
    }

    /// Add a transition, adding both endpoints as states.
    pub fn add_transition(&mut self, from: S, symbol: impl Into<Symbol>, to: S) {
        self.states.insert(from.clone());
        self.states.insert(to.clone());
        self.transitions.insert(Transition {
            from,
            symbol: symbol.into(),
            to,
        });
    }

    pub fn add_start(&mut self, state: S) {
        self.states.insert(state.clone());
        self.start.insert(state);
    }

    pub fn add_final(&mut self, state: S) {
        self.states.insert(state.clone());
        self.finals.insert(state);
    }

    /// Builder form of `add_start` for a set of states.
    pub fn with_starts(mut self, states: impl IntoIterator<Item = S>) -> Self {
        for state in states {
            self.add_start(state);
        }
        self
    }

    /// Builder form of `add_final` for a set of states.
    pub fn with_finals(mut self, states: impl IntoIterator<Item = S>) -> Self {
        for state in states {
            self.add_final(state);
        }
        self
    }

    // ==================== Accessors ====================

    pub fn states(&self) -> &BTreeSet<S> {
        &self.states
    }

    pub fn transitions(&self) -> &BTreeSet<Transition<S>> {
        &self.transitions
    }

    pub fn start_states(&self) -> &BTreeSet<S> {
        &self.start
    }

    pub fn final_states(&self) -> &BTreeSet<S> {
        &self.finals
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Symbols that label at least one transition.
    pub fn symbols(&self) -> BTreeSet<Symbol> {
        self.transitions.iter().map(|t| t.symbol.clone()).collect()
    }

    /// True if there is at most one start state and no state has two
    /// transitions on the same symbol.
    pub fn is_deterministic(&self) -> bool {
        if self.start.len() > 1 {
            return false;
        }
        let mut seen = HashSet::new();
        self.transitions
            .iter()
            .all(|t| seen.insert((&t.from, &t.symbol)))
    }

    /// Relabel every state through `f`. `f` must be injective on this
    /// automaton's states for the result to accept the same language.
    pub fn map_states<T: StateKey>(&self, mut f: impl FnMut(&S) -> T) -> Automaton<T> {
        let mut out = Automaton::new();
        for state in &self.states {
            out.add_state(f(state));
        }
        for t in &self.transitions {
            out.add_transition(f(&t.from), t.symbol.clone(), f(&t.to));
        }
        for state in &self.start {
            out.add_start(f(state));
        }
        for state in &self.finals {
            out.add_final(f(state));
        }
        out
    }

    fn successor_map(&self) -> HashMap<(&S, &Symbol), Vec<&S>> {
        let mut delta: HashMap<(&S, &Symbol), Vec<&S>> = HashMap::new();
        for t in &self.transitions {
            delta.entry((&t.from, &t.symbol)).or_default().push(&t.to);
        }
        delta
    }

    // ==================== Language ====================

    /// Whether the automaton accepts `word`.
    pub fn accepts(&self, word: &[Symbol]) -> bool {
        let delta = self.successor_map();
        let mut current: BTreeSet<&S> = self.start.iter().collect();
        for symbol in word {
            current = current
                .into_iter()
                .filter_map(|s| delta.get(&(s, symbol)))
                .flatten()
                .copied()
                .collect();
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|s| self.finals.contains(*s))
    }

    /// Subset construction. Only subsets reachable from the start set are
    /// built and the empty subset is never materialized, so the result may be
    /// partial. State `q0` is the start state.
    pub fn determinize(&self) -> Automaton<StateId> {
        let delta = self.successor_map();
        let symbols = self.symbols();
        let mut dfa = Automaton::new();

        let initial: BTreeSet<&S> = self.start.iter().collect();
        let mut ids: HashMap<BTreeSet<&S>, StateId> = HashMap::new();
        let mut queue = VecDeque::new();

        ids.insert(initial.clone(), StateId(0));
        dfa.add_start(StateId(0));
        queue.push_back(initial);

        while let Some(subset) = queue.pop_front() {
            let id = ids[&subset];
            if subset.iter().any(|s| self.finals.contains(*s)) {
                dfa.add_final(id);
            }

            for symbol in &symbols {
                let next: BTreeSet<&S> = subset
                    .iter()
                    .filter_map(|s| delta.get(&(*s, symbol)))
                    .flatten()
                    .copied()
                    .collect();
                if next.is_empty() {
                    continue;
                }
                let next_id = match ids.get(&next) {
                    Some(&existing) => existing,
                    None => {
                        let fresh = StateId::from(ids.len());
                        ids.insert(next.clone(), fresh);
                        queue.push_back(next);
                        fresh
                    }
                };
                dfa.add_transition(id, symbol.clone(), next_id);
            }
        }

        dfa
    }

    /// The minimal (partial) DFA for this automaton's language.
    ///
    /// Determinizes, drops states from which no final state is reachable,
    /// then merges equivalent states by partition refinement. A missing
    /// transition stands for the implicit dead state. States are renumbered
    /// in breadth-first order from the start state `q0`.
    pub fn minimize(&self) -> Automaton<StateId> {
        let dfa = self.determinize();
        let live = dfa.coreachable();

        let start = StateId(0);
        if !live.contains(&start) {
            let mut empty = Automaton::new();
            empty.add_start(start);
            return empty;
        }

        let symbols: Vec<Symbol> = dfa.symbols().into_iter().collect();
        let delta: HashMap<(StateId, &Symbol), StateId> = dfa
            .transitions
            .iter()
            .filter(|t| live.contains(&t.to))
            .map(|t| ((t.from, &t.symbol), t.to))
            .collect();

        // Class of each live state; refined until the class count is stable.
        let mut class: BTreeMap<StateId, usize> = live
            .iter()
            .map(|s| (*s, usize::from(dfa.finals.contains(s))))
            .collect();
        let mut class_count = class.values().collect::<BTreeSet<_>>().len();

        loop {
            let mut signatures: HashMap<(usize, Vec<Option<usize>>), usize> = HashMap::new();
            let mut refined = BTreeMap::new();
            for (&state, &own) in &class {
                let targets = symbols
                    .iter()
                    .map(|sym| delta.get(&(state, sym)).map(|t| class[t]))
                    .collect();
                let next = signatures.len();
                let id = *signatures.entry((own, targets)).or_insert(next);
                refined.insert(state, id);
            }
            let refined_count = signatures.len();
            class = refined;
            if refined_count == class_count {
                break;
            }
            class_count = refined_count;
        }

        // Renumber classes breadth-first from the start state.
        let mut order: HashMap<usize, StateId> = HashMap::new();
        let mut queue = VecDeque::from([class[&start]]);
        order.insert(class[&start], StateId(0));
        let representatives: BTreeMap<usize, StateId> =
            class.iter().map(|(state, c)| (*c, *state)).collect();

        let mut minimal = Automaton::new();
        minimal.add_start(StateId(0));
        while let Some(c) = queue.pop_front() {
            let rep = representatives[&c];
            let id = order[&c];
            if dfa.finals.contains(&rep) {
                minimal.add_final(id);
            }
            for sym in &symbols {
                if let Some(target) = delta.get(&(rep, sym)) {
                    let tc = class[target];
                    let next = order.len();
                    let target_id = *order.entry(tc).or_insert_with(|| {
                        queue.push_back(tc);
                        StateId::from(next)
                    });
                    minimal.add_transition(id, sym.clone(), target_id);
                }
            }
        }

        minimal
    }

    /// States from which some final state is reachable.
    fn coreachable(&self) -> BTreeSet<S> {
        let mut reverse: HashMap<&S, Vec<&S>> = HashMap::new();
        for t in &self.transitions {
            reverse.entry(&t.to).or_default().push(&t.from);
        }
        let mut seen: BTreeSet<S> = self.finals.clone();
        let mut stack: Vec<&S> = self.finals.iter().collect();
        while let Some(state) = stack.pop() {
            for prev in reverse.get(state).into_iter().flatten() {
                if seen.insert((*prev).clone()) {
                    stack.push(prev);
                }
            }
        }
        seen
    }

    /// Language equivalence with another automaton.
    ///
    /// Walks the two determinized automata in lockstep (with an implicit dead
    /// state on each side) and fails on the first reachable pair that
    /// disagrees on acceptance.
    pub fn is_equivalent_to<T: StateKey>(&self, other: &Automaton<T>) -> bool {
        let left = self.determinize();
        let right = other.determinize();

        let mut symbols = left.symbols();
        symbols.extend(right.symbols());

        let left_delta = left.deterministic_delta();
        let right_delta = right.deterministic_delta();
        fn step(
            delta: &HashMap<(StateId, &Symbol), StateId>,
            state: Option<StateId>,
            sym: &Symbol,
        ) -> Option<StateId> {
            state.and_then(|s| delta.get(&(s, sym)).copied())
        }

        let initial = (
            left.start.first().copied(),
            right.start.first().copied(),
        );
        let mut seen = HashSet::from([initial]);
        let mut queue = VecDeque::from([initial]);

        while let Some((l, r)) = queue.pop_front() {
            let l_final = l.is_some_and(|s| left.finals.contains(&s));
            let r_final = r.is_some_and(|s| right.finals.contains(&s));
            if l_final != r_final {
                return false;
            }
            for sym in &symbols {
                let next = (step(&left_delta, l, sym), step(&right_delta, r, sym));
                if next != (None, None) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        true
    }
}

impl Automaton<StateId> {
    fn deterministic_delta(&self) -> HashMap<(StateId, &Symbol), StateId> {
        self.transitions
            .iter()
            .map(|t| ((t.from, &t.symbol), t.to))
            .collect()
    }
}
