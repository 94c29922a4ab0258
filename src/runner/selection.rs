//! Positional target grammar shared by `run` and `pushpull`.
//!
//! ```text
//! (nothing)              every project
//! <modifier> <project>   one anchor with the modifier's scope
//! <project>...           the listed projects
//! ```

use petgraph::graph::NodeIndex;

use super::{RunError, RunResult};
use crate::graph::ProjectGraph;
use crate::order::{self, Modifier, OrderOptions};

/// What a command should operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every project in the workspace
    Everything,
    /// One anchor and the part of its neighbourhood the modifier selects
    Anchored { modifier: Modifier, project: String },
    /// An explicit list of projects
    Projects(Vec<String>),
}

impl Selection {
    /// Parses positional targets.
    pub fn parse<S: AsRef<str>>(targets: &[S]) -> RunResult<Self> {
        let Some((first, rest)) = targets.split_first() else {
            return Ok(Selection::Everything);
        };

        match first.as_ref().parse::<Modifier>() {
            Ok(modifier) => match rest {
                [project] => Ok(Selection::Anchored {
                    modifier,
                    project: project.as_ref().to_string(),
                }),
                _ => Err(RunError::ModifierArity {
                    modifier,
                    count: rest.len(),
                }),
            },
            Err(_) => Ok(Selection::Projects(
                targets.iter().map(|t| t.as_ref().to_string()).collect(),
            )),
        }
    }

    /// Orders the selected projects.
    ///
    /// Selecting everything raises the round bound to at least the
    /// project count, since a workspace of independent projects needs
    /// one harvest round per project.
    pub fn resolve(&self, graph: &ProjectGraph, options: &OrderOptions) -> RunResult<Vec<NodeIndex>> {
        let ordered = match self {
            Selection::Everything => {
                let widened =
                    OrderOptions::with_safety_limit(options.safety_limit.max(graph.node_count()));
                order::order_multiple(graph, &graph.all_aliases(), &widened)?
            }
            Selection::Anchored { modifier, project } => {
                order::order(graph, project, modifier.scope())?
            }
            Selection::Projects(projects) => order::order_multiple(graph, projects, options)?,
        };
        Ok(ordered)
    }
}
