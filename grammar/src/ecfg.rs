//! Extended context-free grammars and recursive automata.

use crate::cfg::{split_production, Grammar};
use crate::error::{GrammarError, GrammarResult};
use crate::symbol::{GrammarSymbol, Variable};
use pathq_automata::regex::parse_regex;
use pathq_automata::{Automaton, AutomatonMatrices, Regex};
use pathq_core::{StateId, Symbol};
use std::collections::{BTreeMap, BTreeSet};

/// A grammar with one regular expression per variable. Inside a body, a
/// symbol naming a variable of the grammar refers to that variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ecfg {
    start: Variable,
    variables: BTreeSet<Variable>,
    productions: BTreeMap<Variable, Regex>,
}

impl Ecfg {
    pub fn new(start: Variable, productions: BTreeMap<Variable, Regex>) -> Self {
        let mut variables: BTreeSet<Variable> = productions.keys().cloned().collect();
        variables.insert(start.clone());
        Self { start, variables, productions }
    }

    /// Parse `Head -> regex` lines with start variable `S`. Several lines with
    /// the same head are joined with union.
    pub fn from_text(text: &str) -> GrammarResult<Self> {
        Self::from_text_with_start(text, Variable::from("S"))
    }

    pub fn from_text_with_start(text: &str, start: Variable) -> GrammarResult<Self> {
        let mut productions: BTreeMap<Variable, Regex> = BTreeMap::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let (head, body) = split_production(line, i + 1)?;
            let regex =
                parse_regex(body).map_err(|source| GrammarError::Regex { line: i + 1, source })?;
            let merged = match productions.remove(&head) {
                Some(existing) => existing.union(regex),
                None => regex,
            };
            productions.insert(head, merged);
        }
        Ok(Self::new(start, productions))
    }

    /// The ECFG whose body for each variable is the union of that variable's
    /// production bodies.
    pub fn from_grammar(grammar: &Grammar) -> Self {
        let mut bodies: BTreeMap<Variable, Vec<Regex>> = BTreeMap::new();
        for p in grammar.productions() {
            let body = p
                .body
                .iter()
                .map(|symbol| match symbol {
                    GrammarSymbol::Variable(v) => Regex::Symbol(v.as_symbol()),
                    GrammarSymbol::Terminal(t) => Regex::Symbol(t.clone()),
                })
                .reduce(Regex::concat)
                .unwrap_or(Regex::Epsilon);
            bodies.entry(p.head.clone()).or_default().push(body);
        }
        let productions = bodies
            .into_iter()
            .filter_map(|(head, alternatives)| Some((head, Regex::union_all(alternatives)?)))
            .collect();
        Self {
            start: grammar.start().clone(),
            variables: grammar.variables(),
            productions,
        }
    }

    pub fn start(&self) -> &Variable {
        &self.start
    }

    pub fn productions(&self) -> &BTreeMap<Variable, Regex> {
        &self.productions
    }

    /// Every variable, including those referenced without a production.
    pub fn variables(&self) -> &BTreeSet<Variable> {
        &self.variables
    }

    /// Compile every body to a minimal DFA box.
    pub fn to_rfa(&self) -> Rfa {
        let boxes = self
            .productions
            .iter()
            .map(|(head, regex)| (head.clone(), regex.to_dfa()))
            .collect();
        Rfa {
            start: self.start.clone(),
            variables: self.variables.clone(),
            boxes,
        }
    }
}

/// A recursive finite automaton: one DFA box per variable. A box transition
/// labeled with a variable's name is a call to that variable's box; a
/// variable without a box derives nothing.
#[derive(Debug, Clone)]
pub struct Rfa {
    start: Variable,
    variables: BTreeSet<Variable>,
    boxes: BTreeMap<Variable, Automaton<StateId>>,
}

/// The flattened matrix form of an RFA.
#[derive(Debug, Clone)]
pub struct RfaMatrices {
    /// All boxes' states in one index, one matrix per symbol.
    pub matrices: AutomatonMatrices<(Variable, StateId)>,
    /// For each variable, its box's start and final state indices.
    pub boxes: BTreeMap<Variable, (BTreeSet<usize>, BTreeSet<usize>)>,
}

impl RfaMatrices {
    /// The variable whose box contains state `index`.
    pub fn owner(&self, index: usize) -> Option<&Variable> {
        self.matrices.index.state(index).map(|(v, _)| v)
    }
}

impl Rfa {
    pub fn start(&self) -> &Variable {
        &self.start
    }

    pub fn boxes(&self) -> &BTreeMap<Variable, Automaton<StateId>> {
        &self.boxes
    }

    pub fn box_of(&self, variable: &Variable) -> Option<&Automaton<StateId>> {
        self.boxes.get(variable)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    /// Box transition symbols that call a variable.
    pub fn calls(&self) -> BTreeSet<Symbol> {
        self.variables.iter().map(Variable::as_symbol).collect()
    }

    /// Variables whose box accepts the empty word.
    pub fn nullable(&self) -> BTreeSet<&Variable> {
        self.boxes
            .iter()
            .filter(|(_, dfa)| dfa.accepts(&[]))
            .map(|(v, _)| v)
            .collect()
    }

    /// Symbols on box transitions that are not variables of this RFA.
    pub fn terminals(&self) -> BTreeSet<Symbol> {
        let calls = self.calls();
        self.boxes
            .values()
            .flat_map(Automaton::symbols)
            .filter(|s| !calls.contains(s))
            .collect()
    }

    pub fn to_matrices(&self) -> RfaMatrices {
        let mut flat = Automaton::new();
        for (variable, dfa) in &self.boxes {
            flat = merge(flat, &dfa.map_states(|s| (variable.clone(), *s)));
        }
        let matrices = AutomatonMatrices::from_automaton(&flat);

        let boxes = self
            .boxes
            .iter()
            .map(|(variable, dfa)| {
                let tag = |s: &StateId| (variable.clone(), *s);
                let starts = dfa.start_states().iter().map(tag).collect::<Vec<_>>();
                let finals = dfa.final_states().iter().map(tag).collect::<Vec<_>>();
                (
                    variable.clone(),
                    (
                        matrices.index.indices_of(&starts).into_iter().collect(),
                        matrices.index.indices_of(&finals).into_iter().collect(),
                    ),
                )
            })
            .collect();

        RfaMatrices { matrices, boxes }
    }
}

fn merge<S: pathq_automata::StateKey>(mut into: Automaton<S>, from: &Automaton<S>) -> Automaton<S> {
    for state in from.states() {
        into.add_state(state.clone());
    }
    for t in from.transitions() {
        into.add_transition(t.from.clone(), t.symbol.clone(), t.to.clone());
    }
    for state in from.start_states() {
        into.add_start(state.clone());
    }
    for state in from.final_states() {
        into.add_final(state.clone());
    }
    into
}
