//! Builds the project graph from the workspace config and manifests.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use thiserror::Error;

use super::project_graph::{Manifest, ProjectGraph, ProjectNode};
use crate::config::WorkspaceConfig;
use crate::parser::{self, Dependency, DependencyType, ParseError};

/// Manifest file read from every project directory.
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Errors raised while building the graph.
#[derive(Error, Debug)]
pub enum BuildError {
    /// A project's manifest could not be read or is unusable
    #[error("Project '{alias}': cannot use manifest '{}': {source}", path.display())]
    Manifest {
        alias: String,
        path: PathBuf,
        source: ParseError,
    },
}

/// Result type alias for graph building.
pub type BuildResult<T> = Result<T, BuildError>;

/// Collects projects, then links them by package name.
///
/// Projects are linked in alias order and each project's dependency
/// names in sorted order, so two builds over the same input produce
/// identical edge iteration orders.
///
/// # Example
///
/// ```rust
/// use monoseq::graph::GraphBuilder;
///
/// let graph = GraphBuilder::new()
///     .with_project("iso", "@acme/iso", &[])
///     .with_project("client", "@acme/client", &["@acme/iso", "react"])
///     .build();
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1); // react is not a workspace project
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    projects: BTreeMap<String, (ProjectNode, Vec<Dependency>)>,
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every configured project's manifest.
    pub fn from_config(config: &WorkspaceConfig) -> BuildResult<Self> {
        let mut builder = Self::new();

        for (alias, project) in &config.projects {
            let path = project.path.join(MANIFEST_FILE_NAME);
            let manifest_error = |source| BuildError::Manifest {
                alias: alias.clone(),
                path: path.clone(),
                source,
            };

            let pkg = parser::parse_file(&path).map_err(manifest_error)?;
            parser::validate(&pkg).map_err(manifest_error)?;

            let node = ProjectNode {
                alias: alias.clone(),
                path: project.path.clone(),
                scripts: project.scripts.clone(),
                manifest: Manifest::from_package(&pkg),
            };
            builder.add_project(node, parser::extract_dependencies(&pkg));
        }

        Ok(builder)
    }

    /// Adds a project with the dependencies its manifest declares.
    ///
    /// A later project with the same alias replaces the earlier one.
    pub fn add_project(&mut self, node: ProjectNode, dependencies: Vec<Dependency>) -> &mut Self {
        self.projects.insert(node.alias.clone(), (node, dependencies));
        self
    }

    /// Adds an in-memory project whose dependencies are production
    /// dependencies on the given package names.
    pub fn with_project(mut self, alias: &str, package_name: &str, dependencies: &[&str]) -> Self {
        let deps = dependencies
            .iter()
            .map(|name| Dependency::new(*name, "*", DependencyType::Production))
            .collect();
        self.add_project(ProjectNode::new(alias, package_name), deps);
        self
    }

    /// Number of projects collected so far.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Returns true if no project was added.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Links the collected projects into an immutable graph.
    pub fn build(self) -> ProjectGraph {
        let count = self.projects.len();
        let mut graph = ProjectGraph::with_capacity(count, count);
        let mut owners = HashMap::with_capacity(count);
        let mut pending = Vec::with_capacity(count);

        for (alias, (node, dependencies)) in self.projects {
            let package = node.manifest.name.clone();
            let idx = graph.insert_project(node);

            match owners.entry(package) {
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
                Entry::Occupied(slot) => {
                    let owner = graph.project(*slot.get()).map_or("", |n| n.alias.as_str());
                    tracing::warn!(
                        "Projects '{}' and '{}' both declare package '{}'; using '{}'",
                        owner,
                        alias,
                        slot.key(),
                        owner
                    );
                }
            }
            pending.push((idx, alias, dependencies));
        }

        for (consumer, alias, mut dependencies) in pending {
            dependencies.sort_by(|a, b| a.name.cmp(&b.name));
            dependencies.dedup_by(|later, earlier| later.name == earlier.name);

            for dep in dependencies {
                let Some(&dependency) = owners.get(&dep.name) else {
                    continue;
                };
                if dependency == consumer {
                    tracing::debug!("Ignoring self reference in '{}'", alias);
                    continue;
                }
                graph.link(dependency, consumer, dep.dep_type);
            }
        }

        tracing::debug!(
            "Built project graph: {} projects, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }
}
