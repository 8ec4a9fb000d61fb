//! Path patterns: text to minimal DFA.
//!
//! The pipeline is lexer → recursive-descent parser → Thompson epsilon-NFA →
//! subset construction → minimisation. Symbols are maximal runs of characters
//! other than whitespace and `| * ? ( ) . $`, so `a b` and `ab` are different
//! patterns.

mod ast;
mod error;
mod lexer;
mod nfa;
mod parser;

pub use ast::{Regex, Span};
pub use error::{ParseError, ParseResult};
pub use nfa::Nfa;
pub use parser::{parse_regex, Parser};

use crate::automaton::Automaton;
use pathq_core::StateId;

impl Regex {
    /// Minimal, epsilon-free DFA accepting this expression's language.
    pub fn to_dfa(&self) -> Automaton<StateId> {
        let nfa = Nfa::from_regex(self);
        let minimal = nfa.to_dfa().minimize();
        log::debug!(
            "compiled pattern {}: {} nfa states, {} dfa states",
            self,
            nfa.state_count(),
            minimal.state_count()
        );
        minimal
    }
}

/// Compile pattern text to a minimal DFA.
pub fn compile_regex(pattern: &str) -> ParseResult<Automaton<StateId>> {
    Ok(parse_regex(pattern)?.to_dfa())
}
