//! Ordering of a whole weakly connected component.
//!
//! The component is every project linked to the anchor through any mix
//! of dependency and consumer edges. Members are layered by their
//! longest dependency chain inside the component, so two members that
//! share only a dependency still land after it.

use std::collections::{HashMap, HashSet, VecDeque};

use super::error::{OrderError, OrderResult};
use crate::graph::DependencyNetwork;

/// Orders the weakly connected component containing `anchor`.
///
/// Ties keep breadth-first discovery order from the anchor.
pub(crate) fn order_component<G: DependencyNetwork>(
    graph: &G,
    anchor: G::Node,
) -> OrderResult<Vec<G::Node>> {
    let members = collect(graph, anchor);

    // Kahn's algorithm, tracking the longest chain to each member
    let mut waiting: HashMap<G::Node, usize> = members
        .iter()
        .map(|&node| (node, graph.dependencies(node).len()))
        .collect();
    let mut depth: HashMap<G::Node, usize> = HashMap::with_capacity(members.len());
    let mut ready: VecDeque<G::Node> = members
        .iter()
        .copied()
        .filter(|node| waiting.get(node) == Some(&0))
        .collect();

    while let Some(node) = ready.pop_front() {
        let level = *depth.entry(node).or_insert(0);
        for consumer in graph.consumers(node) {
            let best = depth.entry(consumer).or_insert(0);
            *best = (*best).max(level + 1);
            if let Some(count) = waiting.get_mut(&consumer) {
                *count -= 1;
                if *count == 0 {
                    ready.push_back(consumer);
                }
            }
        }
    }

    let stuck: Vec<G::Node> = members
        .iter()
        .copied()
        .filter(|node| matches!(waiting.get(node), Some(&count) if count > 0))
        .collect();
    if !stuck.is_empty() {
        return Err(OrderError::CycleDetected {
            cycle: stuck_cycle(graph, &stuck),
        });
    }

    let mut ordered = members;
    ordered.sort_by_key(|node| depth.get(node).copied().unwrap_or(0));
    tracing::debug!(
        "Component of '{}' holds {} project(s)",
        graph.name(anchor),
        ordered.len()
    );
    Ok(ordered)
}

/// Breadth-first walk over both edge directions.
fn collect<G: DependencyNetwork>(graph: &G, anchor: G::Node) -> Vec<G::Node> {
    let mut seen = HashSet::from([anchor]);
    let mut members = vec![anchor];
    let mut queue = VecDeque::from([anchor]);

    while let Some(node) = queue.pop_front() {
        for next in graph
            .dependencies(node)
            .into_iter()
            .chain(graph.consumers(node))
        {
            if seen.insert(next) {
                members.push(next);
                queue.push_back(next);
            }
        }
    }

    members
}

/// Names one cycle among members Kahn's algorithm could not release.
///
/// Every stuck member waits on at least one stuck dependency, so
/// following those dependencies must revisit a member. The result reads
/// in consumer direction and closes on its first name.
fn stuck_cycle<G: DependencyNetwork>(graph: &G, stuck: &[G::Node]) -> Vec<String> {
    let stuck_set: HashSet<G::Node> = stuck.iter().copied().collect();
    let mut path: Vec<G::Node> = Vec::new();
    let mut position: HashMap<G::Node, usize> = HashMap::new();
    let mut current = stuck.first().copied();

    while let Some(node) = current {
        if let Some(&start) = position.get(&node) {
            let mut cycle: Vec<String> = path[start..]
                .iter()
                .rev()
                .map(|&n| graph.name(n).to_string())
                .collect();
            cycle.insert(0, graph.name(node).to_string());
            return cycle;
        }
        position.insert(node, path.len());
        path.push(node);
        current = graph
            .dependencies(node)
            .into_iter()
            .find(|dep| stuck_set.contains(dep));
    }

    path.iter().map(|&n| graph.name(n).to_string()).collect()
}
