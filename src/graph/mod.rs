//! Graph module for workspace project relationships.
//!
//! [`GraphBuilder`] turns the workspace config and each project's
//! manifest into an immutable [`ProjectGraph`]. The ordering algorithms
//! only see the graph through the [`DependencyNetwork`] trait.
//!
//! # Example
//!
//! ```rust
//! use monoseq::graph::GraphBuilder;
//!
//! let graph = GraphBuilder::new()
//!     .with_project("iso", "iso", &[])
//!     .with_project("server", "server", &["iso"])
//!     .with_project("client", "client", &["iso", "server"])
//!     .build();
//!
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edge_count(), 3);
//! ```

mod builder;
mod network;
mod project_graph;

pub use builder::{BuildError, BuildResult, GraphBuilder, MANIFEST_FILE_NAME};
pub use network::DependencyNetwork;
pub use project_graph::{CycleInfo, Manifest, ProjectGraph, ProjectNode};
