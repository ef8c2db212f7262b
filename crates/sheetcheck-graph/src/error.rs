/// Errors that can occur while analysing a dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Some nodes never reached zero remaining parents.
    #[error("cycle detected: {emitted} of {declared} nodes ordered, unresolved: {}", .unresolved.join(", "))]
    CycleDetected {
        emitted: usize,
        declared: usize,
        unresolved: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, GraphError>;
