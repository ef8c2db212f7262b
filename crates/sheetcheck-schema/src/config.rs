/// Controls how a [`crate::SchemaGraph`] is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
    /// Maximum number of schemas accepted into one graph.
    pub max_schemas: usize,
    /// When true, an `Extends` entry naming an unloaded schema is an error.
    /// When false, the dangling edge is ignored for ordering and a warning
    /// is logged; the schema still counts as an extension.
    pub fail_on_unknown_parent: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_schemas: 1024,
            fail_on_unknown_parent: true,
        }
    }
}
