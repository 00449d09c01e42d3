use thiserror::Error;

/// Errors produced by path resolution over a configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// No node exists at the given path.
    #[error("no value at `{path}`")]
    NotFound {
        /// Path up to and including the missing segment.
        path: String,
    },
    /// A path segment does not match the node kind it was applied to.
    #[error("type mismatch at `{path}`: expected {expected}, found {actual}")]
    TypeMismatch {
        /// Path up to and including the mismatched segment.
        path: String,
        /// Node kind the segment requires.
        expected: String,
        /// Node kind actually present.
        actual: String,
    },
}
