//! Grammars in weak Chomsky normal form.

use crate::cfg::{Grammar, Production};
use crate::error::{GrammarError, GrammarResult};
use crate::symbol::{GrammarSymbol, Variable};
use pathq_core::Symbol;
use std::collections::BTreeSet;

/// `head -> terminal`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminalRule {
    pub head: Variable,
    pub terminal: Symbol,
}

/// `head -> left right`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BinaryRule {
    pub head: Variable,
    pub left: Variable,
    pub right: Variable,
}

/// A grammar whose productions all have the shape `A -> ε`, `A -> t` or
/// `A -> B C`.
///
/// Only obtainable through `TryFrom<&Grammar>` (which checks the shapes) or
/// `normalize` (which produces them), so the engines never see a unit
/// production or a body longer than two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarizedGrammar {
    start: Variable,
    variables: BTreeSet<Variable>,
    terminals: BTreeSet<Symbol>,
    epsilon_heads: BTreeSet<Variable>,
    terminal_rules: BTreeSet<TerminalRule>,
    binary_rules: BTreeSet<BinaryRule>,
}

impl BinarizedGrammar {
    pub fn start(&self) -> &Variable {
        &self.start
    }

    pub fn variables(&self) -> &BTreeSet<Variable> {
        &self.variables
    }

    pub fn terminals(&self) -> &BTreeSet<Symbol> {
        &self.terminals
    }

    /// Variables with an `A -> ε` production.
    pub fn epsilon_heads(&self) -> &BTreeSet<Variable> {
        &self.epsilon_heads
    }

    pub fn terminal_rules(&self) -> &BTreeSet<TerminalRule> {
        &self.terminal_rules
    }

    pub fn binary_rules(&self) -> &BTreeSet<BinaryRule> {
        &self.binary_rules
    }

    pub fn production_count(&self) -> usize {
        self.epsilon_heads.len() + self.terminal_rules.len() + self.binary_rules.len()
    }

    /// Back to a plain grammar with the same productions.
    pub fn to_grammar(&self) -> Grammar {
        let epsilon = self
            .epsilon_heads
            .iter()
            .map(|head| Production::new(head.clone(), vec![]));
        let terminal = self.terminal_rules.iter().map(|r| {
            Production::new(r.head.clone(), vec![GrammarSymbol::Terminal(r.terminal.clone())])
        });
        let binary = self.binary_rules.iter().map(|r| {
            Production::new(
                r.head.clone(),
                vec![
                    GrammarSymbol::Variable(r.left.clone()),
                    GrammarSymbol::Variable(r.right.clone()),
                ],
            )
        });
        Grammar::with_productions(self.start.clone(), epsilon.chain(terminal).chain(binary))
    }
}

impl TryFrom<&Grammar> for BinarizedGrammar {
    type Error = GrammarError;

    fn try_from(grammar: &Grammar) -> GrammarResult<Self> {
        let mut out = BinarizedGrammar {
            start: grammar.start().clone(),
            variables: grammar.variables(),
            terminals: grammar.terminals(),
            epsilon_heads: BTreeSet::new(),
            terminal_rules: BTreeSet::new(),
            binary_rules: BTreeSet::new(),
        };

        for p in grammar.productions() {
            let head = p.head.clone();
            match p.body.as_slice() {
                [] => {
                    out.epsilon_heads.insert(head);
                }
                [GrammarSymbol::Terminal(terminal)] => {
                    out.terminal_rules.insert(TerminalRule {
                        head,
                        terminal: terminal.clone(),
                    });
                }
                [GrammarSymbol::Variable(left), GrammarSymbol::Variable(right)] => {
                    out.binary_rules.insert(BinaryRule {
                        head,
                        left: left.clone(),
                        right: right.clone(),
                    });
                }
                _ => return Err(GrammarError::not_binarized(p)),
            }
        }
        Ok(out)
    }
}

impl TryFrom<Grammar> for BinarizedGrammar {
    type Error = GrammarError;

    fn try_from(grammar: Grammar) -> GrammarResult<Self> {
        BinarizedGrammar::try_from(&grammar)
    }
}
