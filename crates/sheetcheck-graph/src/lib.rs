//! Dependency graph utilities for parent-declared graphs.
//!
//! A graph is expressed as `node -> ordered parents`. Parents must be
//! processed before their children, so the natural queries are:
//! - a topological order (parents first)
//! - the reverse graph (`node -> ordered children`)
//! - the transitive descendants of a node

pub mod error;
pub mod order;

pub use error::{GraphError, Result};
pub use order::{children, descendants, reverse_graph, topological_order, Graph};
