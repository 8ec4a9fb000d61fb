//! Query error types.

use pathq_automata::ParseError;
use pathq_grammar::GrammarError;
use pathq_graph::GraphError;
use thiserror::Error;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised by the capabilities a query consumes, tagged with the
/// capability that failed. The engines themselves never fail.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Regex compilation failed: {0}")]
    RegexCompilation(#[from] ParseError),

    #[error("Grammar normalization failed: {0}")]
    GrammarNormalization(#[from] GrammarError),

    #[error("Graph adapter failed: {0}")]
    GraphAdapter(#[from] GraphError),
}

impl QueryError {
    /// Name of the capability that failed.
    pub fn capability(&self) -> &'static str {
        match self {
            QueryError::RegexCompilation(_) => "regex compilation",
            QueryError::GrammarNormalization(_) => "grammar normalization",
            QueryError::GraphAdapter(_) => "graph adapter",
        }
    }
}
