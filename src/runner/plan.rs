//! Turns an ordered project list into shell steps.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use petgraph::graph::NodeIndex;
use serde::Serialize;

use crate::config::ToolsConfig;
use crate::graph::{ProjectGraph, ProjectNode};

/// What a command does with each project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Run a named script
    Run { script: String },
    /// Link dependencies in, then publish
    PushPull,
}

/// Optional per-project steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanOptions {
    /// Install packages before anything else
    pub install: bool,
    /// Pull dependencies before and push after the script
    pub pushpull: bool,
}

/// Kind of a planned step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Install,
    Pull,
    Script,
    Push,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Install => write!(f, "install"),
            StepKind::Pull => write!(f, "pull"),
            StepKind::Script => write!(f, "script"),
            StepKind::Push => write!(f, "push"),
        }
    }
}

/// One shell command in one project directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Alias of the project the step runs in
    pub project: String,
    /// Working directory
    pub dir: PathBuf,
    /// What the step is for
    pub kind: StepKind,
    /// Shell command line
    pub command: String,
}

/// Steps in execution order plus the projects that lacked the script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub steps: Vec<Step>,
    pub skipped: Vec<String>,
}

impl Plan {
    /// Returns true if there is nothing to run.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

/// Plans `task` over the projects in `order`.
///
/// Pull steps only cover dependencies that are part of the same order,
/// since those are the ones pushed earlier in the run.
pub fn build_plan(
    graph: &ProjectGraph,
    order: &[NodeIndex],
    tools: &ToolsConfig,
    task: &Task,
    options: PlanOptions,
) -> Plan {
    let pushpull = options.pushpull || matches!(task, Task::PushPull);
    let included: HashSet<&str> = graph.aliases(order).into_iter().collect();
    let mut plan = Plan::default();

    for node in graph.projects(order) {
        let step = |kind, command: String| Step {
            project: node.alias.clone(),
            dir: node.path.clone(),
            kind,
            command,
        };

        if options.install {
            plan.steps.push(step(StepKind::Install, tools.install.clone()));
        }

        if pushpull {
            for (dep, _) in graph.dependencies_of(&node.alias) {
                if included.contains(dep.alias.as_str()) {
                    plan.steps
                        .push(step(StepKind::Pull, tools.pull_command(&dep.manifest.name)));
                }
            }
        }

        if let Task::Run { script } = task {
            match script_command(node, script, tools) {
                Some(command) => plan.steps.push(step(StepKind::Script, command)),
                None => {
                    tracing::warn!("Project '{}' has no '{}' script, skipping it", node.alias, script);
                    plan.skipped.push(node.alias.clone());
                }
            }
        }

        if pushpull {
            plan.steps.push(step(StepKind::Push, tools.push.clone()));
        }
    }

    tracing::info!(
        "Planned {} step(s) across {} project(s)",
        plan.len(),
        order.len()
    );
    plan
}

/// The command running `script` in `node`, if it has one.
fn script_command(node: &ProjectNode, script: &str, tools: &ToolsConfig) -> Option<String> {
    if let Some(command) = node.scripts.get(script) {
        return Some(command.clone());
    }
    node.manifest
        .scripts
        .contains(script)
        .then(|| tools.run_command(script))
}
