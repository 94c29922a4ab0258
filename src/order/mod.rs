//! Dependency-safe ordering of workspace projects.
//!
//! Two entry points:
//!
//! - [`order`] centres on one project and walks its consumers and/or
//!   dependencies, layering them by longest path.
//! - [`order_multiple`] takes any list of projects, possibly spread over
//!   disconnected parts of the graph, and merges their closures into a
//!   single sequence.
//!
//! Both are generic over [`DependencyNetwork`](crate::graph::DependencyNetwork)
//! and return node handles in build order: every project comes after
//! the projects it depends on.

mod component;
mod error;
mod merge;
mod multi;
mod scope;
mod single;

pub use error::{OrderError, OrderResult};
pub use multi::{order_multiple, resolve_all, OrderOptions, DEFAULT_SAFETY_LIMIT};
pub use scope::{Modifier, OrderScope};
pub use single::order;
