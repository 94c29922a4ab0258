//! Ordering failures.
//!
//! Every variant is fatal to the command that triggered it: ordering is
//! a pure function of a static graph, so retrying cannot help.

use thiserror::Error;

/// Errors raised by single- and multi-anchor ordering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// An identifier does not resolve in the graph
    #[error("Unknown project '{id}'")]
    UnknownProject { id: String },

    /// A project is both an ancestor and a descendant of the anchor
    #[error("Project '{project}' is both a dependency and a consumer of '{anchor}'")]
    GraphContradiction { project: String, anchor: String },

    /// A cycle was found on one side of the anchor
    #[error("Circular dependency detected: {}", cycle.join(" -> "))]
    CycleDetected { cycle: Vec<String> },

    /// The multi-project harvest loop ran past its bound
    #[error("Gave up collecting project closures after {limit} rounds")]
    TraversalSafetyExceeded { limit: usize },

    /// The slice merge loop ran past its bound
    #[error("Gave up merging project orders after {limit} rounds")]
    MergeSafetyExceeded { limit: usize },
}

impl OrderError {
    /// Shorthand for [`OrderError::UnknownProject`].
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownProject { id: id.into() }
    }
}

/// Result type alias for ordering operations.
pub type OrderResult<T> = Result<T, OrderError>;
