//! pathq Core Types
//!
//! This crate provides the foundational types used throughout pathq:
//! - Identity types (NodeId for graph nodes, StateId for synthesized automaton states)
//! - Edge labels (Symbol)
//! - Boolean matrices over the (or, and) semiring
//! - Dense state indexing (StateIndex)

mod id;
mod index;
mod matrix;
mod symbol;

pub use id::*;
pub use index::*;
pub use matrix::*;
pub use symbol::*;
