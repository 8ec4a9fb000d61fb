//! Context-free grammars and their text form.
//!
//! Grammar text is one or more lines `Head -> body | body ...`. Body tokens
//! are separated by whitespace; see `GrammarSymbol::from_token` for how they
//! are classified. `epsilon`, `$` and `ε` spell the empty body.

use crate::error::{GrammarError, GrammarResult};
use crate::symbol::{is_epsilon_token, GrammarSymbol, Variable};
use pathq_core::Symbol;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

/// A production `head -> body`. An empty body is the empty word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Production {
    pub head: Variable,
    pub body: Vec<GrammarSymbol>,
}

impl Production {
    pub fn new(head: Variable, body: Vec<GrammarSymbol>) -> Self {
        Self { head, body }
    }

    /// `A -> B` for a single variable `B`.
    pub fn is_unit(&self) -> bool {
        matches!(self.body.as_slice(), [GrammarSymbol::Variable(_)])
    }

    pub fn is_epsilon(&self) -> bool {
        self.body.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.head)?;
        if self.body.is_empty() {
            return write!(f, " epsilon");
        }
        for symbol in &self.body {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

/// A context-free grammar: a start variable and a set of productions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    start: Variable,
    productions: BTreeSet<Production>,
}

impl Grammar {
    pub fn new(start: Variable) -> Self {
        Self {
            start,
            productions: BTreeSet::new(),
        }
    }

    pub fn with_productions(start: Variable, productions: impl IntoIterator<Item = Production>) -> Self {
        Self {
            start,
            productions: productions.into_iter().collect(),
        }
    }

    /// Parse grammar text with start variable `S`.
    pub fn from_text(text: &str) -> GrammarResult<Self> {
        Self::from_text_with_start(text, Variable::from("S"))
    }

    pub fn from_text_with_start(text: &str, start: Variable) -> GrammarResult<Self> {
        let mut grammar = Self::new(start);
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let (head, bodies) = split_production(line, i + 1)?;
            for body in bodies.split('|') {
                let body = body
                    .split_whitespace()
                    .filter(|token| !is_epsilon_token(token))
                    .map(GrammarSymbol::from_token)
                    .collect();
                grammar.add(Production::new(head.clone(), body));
            }
        }
        Ok(grammar)
    }

    /// Read grammar text from a file, with start variable `S`.
    pub fn from_file(path: impl AsRef<Path>) -> GrammarResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| GrammarError::io(path, e))?;
        Self::from_text(&text)
    }

    /// The same productions with a different start variable.
    pub fn with_start(&self, start: Variable) -> Self {
        Self {
            start,
            productions: self.productions.clone(),
        }
    }

    pub fn add(&mut self, production: Production) -> bool {
        self.productions.insert(production)
    }

    pub fn start(&self) -> &Variable {
        &self.start
    }

    pub fn productions(&self) -> &BTreeSet<Production> {
        &self.productions
    }

    /// Productions with the given head.
    pub fn productions_of<'a>(&'a self, head: &'a Variable) -> impl Iterator<Item = &'a Production> {
        self.productions.iter().filter(move |p| &p.head == head)
    }

    /// The start variable plus every variable mentioned by a production.
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut variables = BTreeSet::from([self.start.clone()]);
        for p in &self.productions {
            variables.insert(p.head.clone());
            variables.extend(p.body.iter().filter_map(GrammarSymbol::as_variable).cloned());
        }
        variables
    }

    pub fn terminals(&self) -> BTreeSet<Symbol> {
        self.productions
            .iter()
            .flat_map(|p| p.body.iter().filter_map(GrammarSymbol::as_terminal))
            .cloned()
            .collect()
    }

    /// Render as grammar text that `from_text` reads back, one line per head.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let heads: BTreeSet<&Variable> = self.productions.iter().map(|p| &p.head).collect();
        for head in heads {
            let bodies: Vec<String> = self
                .productions_of(head)
                .map(|p| {
                    if p.body.is_empty() {
                        "epsilon".to_string()
                    } else {
                        p.body.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
                    }
                })
                .collect();
            out.push_str(&format!("{} -> {}\n", head, bodies.join(" | ")));
        }
        out
    }
}

/// Split `Head -> rest` into a variable head and the body text.
pub(crate) fn split_production(line: &str, line_no: usize) -> GrammarResult<(Variable, &str)> {
    let Some((head, bodies)) = line.split_once("->") else {
        return Err(GrammarError::parse(line_no, format!("expected '->' in '{}'", line)));
    };
    if bodies.contains("->") {
        return Err(GrammarError::parse(line_no, format!("more than one '->' in '{}'", line)));
    }
    let head = head.trim();
    match GrammarSymbol::from_token(head) {
        GrammarSymbol::Variable(v) if !head.contains(char::is_whitespace) => Ok((v, bodies)),
        _ => Err(GrammarError::parse(
            line_no,
            format!("head '{}' is not a variable", head),
        )),
    }
}
