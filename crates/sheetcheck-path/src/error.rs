/// Errors that can occur while parsing or reading a field path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path could not be parsed.
    #[error("invalid field path `{path}`: {reason}")]
    InvalidPathSyntax { path: String, reason: String },

    /// A named field is absent.
    #[error("field `{field}` not found while resolving `{path}`")]
    FieldNotFound { path: String, field: String },

    /// A sequence index is not a valid position.
    #[error("index [{index}] out of range for `{field}` while resolving `{path}`")]
    IndexOutOfRange {
        path: String,
        field: String,
        index: String,
    },

    /// An index was applied to a scalar value.
    #[error("cannot index into non-container `{field}` while resolving `{path}`")]
    NotIndexable { path: String, field: String },
}

pub type Result<T> = std::result::Result<T, PathError>;
