//! Grammar symbols.

use pathq_core::Symbol;
use std::fmt;

/// A nonterminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(String);

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// The symbol a reference to this variable carries inside an RFA box.
    pub fn as_symbol(&self) -> Symbol {
        Symbol::new(self.0.clone())
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One position of a production body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GrammarSymbol {
    Variable(Variable),
    Terminal(Symbol),
}

impl GrammarSymbol {
    /// Classify a token of grammar text: a leading ASCII uppercase letter
    /// makes a variable, anything else is a terminal.
    pub fn from_token(token: &str) -> Self {
        if token.starts_with(|c: char| c.is_ascii_uppercase()) {
            GrammarSymbol::Variable(Variable::from(token))
        } else {
            GrammarSymbol::Terminal(Symbol::from(token))
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            GrammarSymbol::Variable(v) => Some(v),
            GrammarSymbol::Terminal(_) => None,
        }
    }

    pub fn as_terminal(&self) -> Option<&Symbol> {
        match self {
            GrammarSymbol::Terminal(t) => Some(t),
            GrammarSymbol::Variable(_) => None,
        }
    }
}

impl fmt::Display for GrammarSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarSymbol::Variable(v) => write!(f, "{}", v),
            GrammarSymbol::Terminal(t) => write!(f, "{}", t),
        }
    }
}

/// Spellings of the empty body.
pub(crate) fn is_epsilon_token(token: &str) -> bool {
    matches!(token, "epsilon" | "$" | "ε")
}
