use sheetcheck_graph::GraphError;
use sheetcheck_path::PathError;

/// Errors that can occur while building a schema graph or validating a record.
///
/// Every variant describes a broken schema set. A record that simply fails
/// its schemas is reported through [`crate::ValidationReport`], not here.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The `Extends` relation is cyclic.
    #[error("schema inheritance is not acyclic: {0}")]
    CycleDetected(#[from] GraphError),

    /// A schema extends a name that was never loaded.
    #[error("schema {schema} extends unknown schema {parent}")]
    UnknownParent { schema: String, parent: String },

    /// Two schemas share a name.
    #[error("duplicate schema name: {0}")]
    DuplicateSchema(String),

    /// More schemas than the configured limit.
    #[error("schema count exceeds configured max ({max}): {count}")]
    TooManySchemas { count: usize, max: usize },

    /// A schema set is not a mapping of schema name to definition.
    #[error("schema set must be a mapping of name to definition, found {0}")]
    NotASchemaSet(&'static str),

    /// A schema definition could not be decoded.
    #[error("invalid definition for schema {name}: {source}")]
    InvalidDefinition {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A schema declares a malformed field path.
    #[error("schema {schema} declares a bad field path: {source}")]
    InvalidPath {
        schema: String,
        #[source]
        source: PathError,
    },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
