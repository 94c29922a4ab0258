//! Orchestration of `run` and `pushpull`.
//!
//! A command resolves its [`Selection`] to a build order, turns that
//! order into a [`Plan`] of shell steps, and hands the plan to
//! [`execute`].

mod exec;
mod plan;
mod selection;

use thiserror::Error;

use crate::order::{Modifier, OrderError};

pub use exec::{execute, ExecSummary};
pub use plan::{build_plan, Plan, PlanOptions, Step, StepKind, Task};
pub use selection::Selection;

/// Errors raised while selecting, planning, or running.
#[derive(Error, Debug)]
pub enum RunError {
    /// A modifier was not followed by exactly one project
    #[error("Modifier '{modifier}' takes exactly one project, got {count}")]
    ModifierArity { modifier: Modifier, count: usize },

    /// Ordering failed
    #[error(transparent)]
    Order(#[from] OrderError),

    /// A step's process could not be started
    #[error("Failed to start `{command}` in project '{project}': {source}")]
    Spawn {
        project: String,
        command: String,
        source: std::io::Error,
    },

    /// A step exited unsuccessfully
    #[error("`{command}` failed in project '{project}' ({status})")]
    CommandFailed {
        project: String,
        command: String,
        status: String,
    },
}

/// Result type alias for runner operations.
pub type RunResult<T> = Result<T, RunError>;
