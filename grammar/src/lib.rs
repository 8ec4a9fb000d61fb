//! pathq Grammars
//!
//! This crate provides the grammar side of context-free path queries:
//! - `Grammar`: context-free grammars read from `Head -> body | body` text
//! - `normalize`: weak Chomsky normal form
//! - `BinarizedGrammar`: the checked normal form the CFPQ engines consume
//! - `Ecfg` and `Rfa`: regular-bodied grammars and their recursive automata

mod binarized;
mod cfg;
mod ecfg;
mod error;
mod normalize;
mod symbol;

pub use binarized::{BinarizedGrammar, BinaryRule, TerminalRule};
pub use cfg::{Grammar, Production};
pub use ecfg::{Ecfg, Rfa, RfaMatrices};
pub use error::{GrammarError, GrammarResult};
pub use normalize::normalize;
pub use symbol::{GrammarSymbol, Variable};
