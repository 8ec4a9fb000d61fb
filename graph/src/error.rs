//! Graph error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or loading a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The graph file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of an edge list is not `from to label`.
    #[error("Malformed edge on line {line}: {message} ('{text}')")]
    MalformedEdge {
        line: usize,
        text: String,
        message: String,
    },
}

impl GraphError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed_edge(line: usize, text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedEdge {
            line,
            text: text.into(),
            message: message.into(),
        }
    }
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
