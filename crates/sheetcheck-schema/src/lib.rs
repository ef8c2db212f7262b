//! Inheritable presence schemas for character records.
//!
//! A schema lists fields a record must have (`Mandatory`), may have
//! (`Optional`) and must have at least one of (`AnyOf`), and may extend other
//! schemas. Schemas are assembled into an immutable [`SchemaGraph`] once, then
//! any number of records can be validated against it, from any thread.

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod schema;

pub use config::GraphConfig;
pub use engine::{
    classify, extraneous_fields, validate, validate_presence, Classification, Presence,
    SchemaOutcome, ValidationReport,
};
pub use error::{Result, SchemaError};
pub use graph::SchemaGraph;
pub use schema::{Schema, SchemaDefinition};
