//! Edge and transition labels.

use std::borrow::Borrow;
use std::fmt;

/// An atomic label on a graph edge or automaton transition.
///
/// Symbols are compared by their text. The empty word is never a symbol:
/// automata handed to the matrix layer are epsilon-free.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for Symbol {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build a word (sequence of symbols) from whitespace-separated text.
pub fn word(text: &str) -> Vec<Symbol> {
    text.split_whitespace().map(Symbol::from).collect()
}
