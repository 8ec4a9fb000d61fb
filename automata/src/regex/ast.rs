//! Syntax tree for path patterns.

use pathq_core::Symbol;
use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// A regular expression over symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Regex {
    /// The empty word.
    Epsilon,
    Symbol(Symbol),
    Concat(Box<Regex>, Box<Regex>),
    Union(Box<Regex>, Box<Regex>),
    Star(Box<Regex>),
    Optional(Box<Regex>),
}

impl Regex {
    pub fn symbol(text: impl Into<Symbol>) -> Self {
        Regex::Symbol(text.into())
    }

    pub fn concat(self, rhs: Regex) -> Self {
        Regex::Concat(Box::new(self), Box::new(rhs))
    }

    pub fn union(self, rhs: Regex) -> Self {
        Regex::Union(Box::new(self), Box::new(rhs))
    }

    pub fn star(self) -> Self {
        Regex::Star(Box::new(self))
    }

    pub fn optional(self) -> Self {
        Regex::Optional(Box::new(self))
    }

    /// Union of a non-empty list of alternatives, or `None` for an empty list.
    pub fn union_all(alternatives: impl IntoIterator<Item = Regex>) -> Option<Self> {
        alternatives.into_iter().reduce(Regex::union)
    }
}

/// Prints a fully parenthesized form that parses back to the same tree.
impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regex::Epsilon => write!(f, "$"),
            Regex::Symbol(s) => write!(f, "{}", s),
            Regex::Concat(l, r) => write!(f, "({} {})", l, r),
            Regex::Union(l, r) => write!(f, "({} | {})", l, r),
            Regex::Star(inner) => write!(f, "({})*", inner),
            Regex::Optional(inner) => write!(f, "({})?", inner),
        }
    }
}
