//! Multi-anchor ordering.
//!
//! The requested projects may sit in several disconnected parts of the
//! graph. Each still-unplaced project contributes the requested slice
//! of its weakly connected component; the slices are then merged into
//! one global order.

use std::collections::HashSet;

use super::error::{OrderError, OrderResult};
use super::merge::{merge_slices, restrict};
use super::scope::OrderScope;
use super::single::order_node;
use crate::graph::DependencyNetwork;

/// Default round bound for the harvest and merge loops.
pub const DEFAULT_SAFETY_LIMIT: usize = 20;

/// Tuning for [`order_multiple`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderOptions {
    /// Maximum rounds for the harvest loop and, separately, the merge loop
    pub safety_limit: usize,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            safety_limit: DEFAULT_SAFETY_LIMIT,
        }
    }
}

impl OrderOptions {
    /// Options with a custom safety limit.
    pub fn with_safety_limit(safety_limit: usize) -> Self {
        Self { safety_limit }
    }
}

/// Orders an arbitrary list of projects into one dependency-safe
/// sequence containing each of them exactly once.
///
/// # Example
///
/// ```rust
/// use monoseq::graph::GraphBuilder;
/// use monoseq::order::{order_multiple, OrderOptions};
///
/// let graph = GraphBuilder::new()
///     .with_project("iso", "iso", &[])
///     .with_project("server", "server", &["iso"])
///     .with_project("client", "client", &["iso", "server"])
///     .build();
///
/// let ordered = order_multiple(&graph, &["client", "iso"], &OrderOptions::default()).unwrap();
/// assert_eq!(graph.aliases(&ordered), vec!["iso", "client"]);
/// ```
pub fn order_multiple<G, S>(graph: &G, ids: &[S], options: &OrderOptions) -> OrderResult<Vec<G::Node>>
where
    G: DependencyNetwork,
    S: AsRef<str>,
{
    let requested = resolve_all(graph, ids)?;
    if requested.is_empty() {
        return Ok(Vec::new());
    }

    let requested_set: HashSet<G::Node> = requested.iter().copied().collect();
    let slices = harvest(graph, &requested, &requested_set, options.safety_limit)?;
    merge_slices(slices, options.safety_limit)
}

/// Resolves every id, dropping repeats but keeping first-seen order.
pub fn resolve_all<G, S>(graph: &G, ids: &[S]) -> OrderResult<Vec<G::Node>>
where
    G: DependencyNetwork,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(ids.len());

    for id in ids {
        let id = id.as_ref();
        let node = graph.lookup(id).ok_or_else(|| OrderError::unknown(id))?;
        if seen.insert(node) {
            nodes.push(node);
        }
    }

    Ok(nodes)
}

/// Collects one requested-only slice per touched component.
fn harvest<G: DependencyNetwork>(
    graph: &G,
    requested: &[G::Node],
    requested_set: &HashSet<G::Node>,
    limit: usize,
) -> OrderResult<Vec<Vec<G::Node>>> {
    let mut missing: Vec<G::Node> = requested.to_vec();
    let mut slices = Vec::new();
    let mut rounds = 0;

    while let Some(&pick) = missing.first() {
        rounds += 1;
        if rounds > limit {
            return Err(OrderError::TraversalSafetyExceeded { limit });
        }

        let closure = order_node(graph, pick, OrderScope::ALL)?;
        let slice = restrict(&closure, requested_set);
        tracing::debug!(
            "Closure of '{}' covers {} of {} requested project(s)",
            graph.name(pick),
            slice.len(),
            requested.len()
        );

        if slice.len() == requested.len() {
            return Ok(vec![slice]);
        }

        let placed: HashSet<G::Node> = slice.iter().copied().collect();
        missing.retain(|node| !placed.contains(node));
        slices.push(slice);
    }

    Ok(slices)
}
