//! Validate character records against inheritable presence schemas.
//!
//! sheetcheck decides whether a record (a nested mapping of fields) satisfies
//! a set of schemas related by inheritance, and reports which fields were
//! recognized and which were extraneous.
//!
//! # Crate Structure
//!
//! - [`graph`]: Topological order, reversal and descendants over parent-declared graphs
//! - [`path`]: Dot-path field resolution with wildcard fan-out
//! - [`schema`]: Schema model, immutable schema graph and the validation engine
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sheetcheck::{Schema, SchemaGraph};
//!
//! let graph = SchemaGraph::build([
//!     Schema::new("Base").with_mandatory(["name"]),
//!     Schema::new("Warrior").with_extends(["Base"]).with_mandatory(["strength"]),
//! ])?;
//!
//! let report = sheetcheck::validate(&json!({ "name": "Rin", "strength": 12 }), &graph)?;
//! assert!(report.success);
//! assert!(report.extraneous_fields.is_empty());
//! # Ok::<(), sheetcheck::SchemaError>(())
//! ```

/// Re-export graph utilities.
pub mod graph {
    pub use sheetcheck_graph::*;
}

/// Re-export field path types.
pub mod path {
    pub use sheetcheck_path::*;
}

/// Re-export schema and engine types.
pub mod schema {
    pub use sheetcheck_schema::*;
}

pub use serde_json::Value as Record;
pub use sheetcheck_schema::{
    classify, extraneous_fields, validate, validate_presence, Classification, GraphConfig,
    Presence, Result, Schema, SchemaDefinition, SchemaError, SchemaGraph, SchemaOutcome,
    ValidationReport,
};
