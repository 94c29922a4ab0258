//! The capability the ordering algorithms need from a graph.

use std::fmt::Debug;
use std::hash::Hash;

/// Anything with named nodes connected by dependency/consumer edges.
///
/// The two neighbour views must describe one edge set: `b` is in
/// `consumers(a)` exactly when `a` is in `dependencies(b)`. Neighbour
/// lists must come back in a stable order, since ordering ties are
/// broken by it.
pub trait DependencyNetwork {
    /// Cheap handle to a node.
    type Node: Copy + Eq + Hash + Debug;

    /// Resolves an identity key to a node.
    fn lookup(&self, id: &str) -> Option<Self::Node>;

    /// Identity key of a node, used in error reports.
    fn name(&self, node: Self::Node) -> &str;

    /// Nodes this node directly requires.
    fn dependencies(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Nodes that directly require this node.
    fn consumers(&self, node: Self::Node) -> Vec<Self::Node>;
}
