//! Grammar error types.

use pathq_automata::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or converting grammars.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// The grammar file could not be read.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of grammar text is not a production.
    #[error("Grammar syntax error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A production does not have one of the binarized shapes
    /// `A -> ε`, `A -> t` or `A -> B C`.
    #[error("Production is not binarized: {production}")]
    NotBinarized { production: String },

    /// The regular body of an extended production does not parse.
    #[error("Invalid body on line {line}: {source}")]
    Regex {
        line: usize,
        #[source]
        source: ParseError,
    },
}

impl GrammarError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn not_binarized(production: impl ToString) -> Self {
        Self::NotBinarized {
            production: production.to_string(),
        }
    }
}

/// Result type for grammar operations.
pub type GrammarResult<T> = Result<T, GrammarError>;
