//! pathq Query
//!
//! Evaluate path queries over a labeled graph.
//!
//! Responsibilities:
//! - Regular path queries by closing the pattern/graph product
//! - Multi-source reachability by frontier sweeps
//! - Context-free path queries (worklist, matrix and tensor engines)
//! - The exported query surface and its configuration

mod bfs;
mod cfpq;
mod config;
mod engine;
mod error;
mod rpq;

pub use bfs::{reachable_from, Reachability};
pub use cfpq::{cfpq_matrix, cfpq_tensor, cfpq_worklist, derives, group_by_source, Triple};
pub use config::{CfpqAlgorithm, QueryConfig, ReachabilityMode, WorklistOrder};
pub use engine::{query_context_free, query_reachability, query_regular, QueryEngine};
pub use error::{QueryError, QueryResult};
pub use rpq::regular_pairs;
