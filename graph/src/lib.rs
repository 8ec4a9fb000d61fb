//! pathq Graph Storage
//!
//! This crate provides the labeled directed multigraph that path queries run
//! over:
//! - Node and labeled edge storage (parallel edges allowed)
//! - Label index: find edges by label
//! - The `EdgeSource` contract consumed by the query engines
//! - Edge-list loading, DOT export, and the two-cycles generator

mod error;
mod generators;
mod graph;
mod index;
mod io;
mod source;

pub use error::{GraphError, GraphResult};
pub use generators::two_cycles;
pub use graph::{GraphInfo, LabeledGraph};
pub use source::{Edge, EdgeSource};
