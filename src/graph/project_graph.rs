//! Workspace project graph implementation using petgraph.
//!
//! Nodes are workspace projects keyed by alias. Each edge points from a
//! dependency to the project consuming it, so a project's dependencies
//! are its incoming edges and its consumers are its outgoing edges.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;

use super::network::DependencyNetwork;
use crate::parser::{DependencyType, PackageJson};

/// Manifest metadata carried by a project node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Package name other manifests refer to this project by
    pub name: String,
    /// Declared version, if any
    pub version: Option<String>,
    /// Names of the scripts declared in package.json
    pub scripts: BTreeSet<String>,
}

impl Manifest {
    /// Creates manifest metadata with only a package name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Captures the fields of a parsed package.json that the graph keeps.
    pub fn from_package(pkg: &PackageJson) -> Self {
        Self {
            name: pkg.name.clone().unwrap_or_default(),
            version: pkg.version.clone(),
            scripts: pkg
                .scripts
                .as_ref()
                .map(|s| s.keys().cloned().collect())
                .unwrap_or_default(),
        }
    }
}

/// A workspace project.
///
/// # Example
///
/// ```rust
/// use monoseq::graph::ProjectNode;
///
/// let node = ProjectNode::new("client", "@acme/client");
/// assert_eq!(node.alias, "client");
/// assert_eq!(node.manifest.name, "@acme/client");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNode {
    /// Alias from the workspace config (identity key)
    pub alias: String,
    /// Absolute project directory
    pub path: PathBuf,
    /// Script overrides from the workspace config
    pub scripts: BTreeMap<String, String>,
    /// Manifest metadata
    pub manifest: Manifest,
}

impl ProjectNode {
    /// Creates a node with no location and no scripts.
    pub fn new(alias: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            path: PathBuf::new(),
            scripts: BTreeMap::new(),
            manifest: Manifest::named(package_name),
        }
    }

    /// Returns true if the project can run `script`, either through a
    /// config override or a manifest entry.
    pub fn has_script(&self, script: &str) -> bool {
        self.scripts.contains_key(script) || self.manifest.scripts.contains(script)
    }
}

/// Information about a detected circular dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleInfo {
    /// Aliases in the cycle (the last connects back to the first)
    pub nodes: Vec<String>,
}

impl CycleInfo {
    /// Returns a formatted cycle path, e.g. "a -> b -> c -> a".
    pub fn cycle_path(&self) -> String {
        match self.nodes.first() {
            Some(first) => format!("{} -> {}", self.nodes.join(" -> "), first),
            None => String::new(),
        }
    }

    /// Returns the number of projects in the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the cycle is empty (should not happen in practice).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The immutable project graph for one command invocation.
///
/// Built by [`GraphBuilder`](super::GraphBuilder); no mutation is exposed
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct ProjectGraph {
    /// The underlying directed graph, edges point dependency -> consumer
    graph: DiGraph<ProjectNode, DependencyType>,
    /// Maps aliases to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
}

impl ProjectGraph {
    pub(super) fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            node_indices: HashMap::with_capacity(nodes),
        }
    }

    /// Adds a project, returning the existing index if the alias is taken.
    pub(super) fn insert_project(&mut self, node: ProjectNode) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(&node.alias) {
            return idx;
        }
        let alias = node.alias.clone();
        let idx = self.graph.add_node(node);
        self.node_indices.insert(alias, idx);
        idx
    }

    /// Records that `consumer` requires `dependency`.
    pub(super) fn link(&mut self, dependency: NodeIndex, consumer: NodeIndex, dep_type: DependencyType) {
        if self.graph.find_edge(dependency, consumer).is_none() {
            self.graph.add_edge(dependency, consumer, dep_type);
        }
    }

    /// Gets a project by alias.
    pub fn get(&self, alias: &str) -> Option<&ProjectNode> {
        self.node_indices
            .get(alias)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Gets a project by index.
    pub fn project(&self, idx: NodeIndex) -> Option<&ProjectNode> {
        self.graph.node_weight(idx)
    }

    /// Resolves an ordering result to project references.
    pub fn projects(&self, order: &[NodeIndex]) -> Vec<&ProjectNode> {
        order.iter().filter_map(|&idx| self.project(idx)).collect()
    }

    /// Resolves an ordering result to aliases.
    pub fn aliases(&self, order: &[NodeIndex]) -> Vec<&str> {
        self.projects(order)
            .into_iter()
            .map(|node| node.alias.as_str())
            .collect()
    }

    /// Gets all projects in construction (alias-sorted) order.
    pub fn all_projects(&self) -> Vec<&ProjectNode> {
        self.graph.node_weights().collect()
    }

    /// Gets every alias in construction (alias-sorted) order.
    pub fn all_aliases(&self) -> Vec<&str> {
        self.graph.node_weights().map(|n| n.alias.as_str()).collect()
    }

    /// Gets the direct dependencies of a project with the edge kind.
    pub fn dependencies_of(&self, alias: &str) -> Vec<(&ProjectNode, DependencyType)> {
        let Some(&idx) = self.node_indices.get(alias) else {
            return Vec::new();
        };
        self.sorted_edges(idx, Direction::Incoming)
            .into_iter()
            .filter_map(|(edge, other)| {
                let weight = *self.graph.edge_weight(edge)?;
                Some((self.project(other)?, weight))
            })
            .collect()
    }

    /// Gets the projects that directly depend on a project.
    pub fn consumers_of(&self, alias: &str) -> Vec<&ProjectNode> {
        let Some(&idx) = self.node_indices.get(alias) else {
            return Vec::new();
        };
        self.sorted_edges(idx, Direction::Outgoing)
            .into_iter()
            .filter_map(|(_, other)| self.project(other))
            .collect()
    }

    /// Checks if a project exists in the graph.
    pub fn contains(&self, alias: &str) -> bool {
        self.node_indices.contains_key(alias)
    }

    /// Returns the number of projects.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Detects dependency cycles for reporting.
    ///
    /// Cycles are strongly connected components with more than one
    /// project, or a single project with a self-loop.
    pub fn detect_cycles(&self) -> Vec<CycleInfo> {
        let mut cycles: Vec<CycleInfo> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .map(|mut scc| {
                scc.sort();
                CycleInfo {
                    nodes: scc
                        .into_iter()
                        .filter_map(|idx| self.project(idx))
                        .map(|node| node.alias.clone())
                        .collect(),
                }
            })
            .collect();
        cycles.sort_by(|a, b| a.nodes.cmp(&b.nodes));
        cycles
    }

    /// Neighbours in one direction, ordered by edge insertion.
    fn sorted_edges(&self, idx: NodeIndex, direction: Direction) -> Vec<(EdgeIndex, NodeIndex)> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, direction)
            .map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                (edge.id(), other)
            })
            .collect();
        edges.sort_by_key(|&(id, _)| id);
        edges
    }
}

impl DependencyNetwork for ProjectGraph {
    type Node = NodeIndex;

    fn lookup(&self, id: &str) -> Option<NodeIndex> {
        self.node_indices.get(id).copied()
    }

    fn name(&self, node: NodeIndex) -> &str {
        self.project(node).map_or("", |n| n.alias.as_str())
    }

    fn dependencies(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.sorted_edges(node, Direction::Incoming)
            .into_iter()
            .map(|(_, other)| other)
            .collect()
    }

    fn consumers(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.sorted_edges(node, Direction::Outgoing)
            .into_iter()
            .map(|(_, other)| other)
            .collect()
    }
}
