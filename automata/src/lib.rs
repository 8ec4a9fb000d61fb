//! pathq Automata
//!
//! This crate provides the automata side of path queries:
//! - `Automaton`: epsilon-free NFAs keyed by caller-supplied states, with
//!   determinization, minimisation and language equivalence
//! - `AutomatonMatrices`: one boolean adjacency matrix per symbol
//! - `ProductMatrices` and `intersect`: Kronecker-product intersection
//! - `graph_to_automaton`: a labeled graph seen as an automaton
//! - `regex`: path pattern text compiled to a minimal DFA

mod adapter;
mod automaton;
mod intersect;
mod matrices;
pub mod regex;

pub use adapter::graph_to_automaton;
pub use automaton::{Automaton, StateKey, Transition};
pub use intersect::intersect;
pub use matrices::{AutomatonMatrices, ProductMatrices};
pub use regex::{compile_regex, ParseError, Regex};
