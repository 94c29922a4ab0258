//! Property tests for project ordering.
//!
//! Graphs are random DAGs: a project may only depend on projects with a
//! lower index, so every generated graph is acyclic.

use std::collections::{BTreeSet, HashSet};

use monoseq::graph::{GraphBuilder, ProjectGraph};
use monoseq::order::{order, order_multiple, OrderOptions, OrderScope};
use proptest::prelude::*;

const MAX_PROJECTS: usize = 12;

fn alias(i: usize) -> String {
    format!("p{:02}", i)
}

/// Edges as (dependency, consumer) index pairs with dependency < consumer.
fn dag() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2..=MAX_PROJECTS).prop_flat_map(|n| {
        let edge = (0..n - 1).prop_flat_map(move |dep| (Just(dep), dep + 1..n));
        (Just(n), prop::collection::vec(edge, 0..n * 2))
    })
}

fn build(n: usize, edges: &[(usize, usize)]) -> ProjectGraph {
    let mut builder = GraphBuilder::new();
    for consumer in 0..n {
        let deps: Vec<String> = edges
            .iter()
            .filter(|&&(_, c)| c == consumer)
            .map(|&(d, _)| alias(d))
            .collect();
        let deps: Vec<&str> = deps.iter().map(String::as_str).collect();
        let name = alias(consumer);
        builder = builder.with_project(&name, &name, &deps);
    }
    builder.build()
}

/// Every in-result edge must point forward.
fn assert_topological(graph: &ProjectGraph, aliases: &[&str]) {
    for (pos, alias) in aliases.iter().enumerate() {
        for (dep, _) in graph.dependencies_of(alias) {
            if let Some(dep_pos) = aliases.iter().position(|a| *a == dep.alias) {
                assert!(
                    dep_pos < pos,
                    "{} must come before {} in {:?}",
                    dep.alias,
                    alias,
                    aliases
                );
            }
        }
    }
}

fn assert_unique(aliases: &[&str]) {
    let unique: HashSet<_> = aliases.iter().collect();
    assert_eq!(unique.len(), aliases.len(), "duplicates in {:?}", aliases);
}

/// Transitive closure along one direction, excluding the start.
fn reach(graph: &ProjectGraph, start: &str, consumers: bool) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![start.to_string()];
    while let Some(alias) = stack.pop() {
        let next: Vec<String> = if consumers {
            graph.consumers_of(&alias).into_iter().map(|n| n.alias.clone()).collect()
        } else {
            graph
                .dependencies_of(&alias)
                .into_iter()
                .map(|(n, _)| n.alias.clone())
                .collect()
        };
        for n in next {
            if found.insert(n.clone()) {
                stack.push(n);
            }
        }
    }
    found
}

/// Every project linked to `start` through edges of either direction,
/// including `start`.
fn weak_component(graph: &ProjectGraph, start: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::from([start.to_string()]);
    let mut stack = vec![start.to_string()];
    while let Some(alias) = stack.pop() {
        let next: Vec<String> = reach(graph, &alias, true)
            .into_iter()
            .chain(reach(graph, &alias, false))
            .collect();
        for n in next {
            if found.insert(n.clone()) {
                stack.push(n);
            }
        }
    }
    found
}

fn scopes() -> impl Strategy<Value = OrderScope> {
    (any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(anchor, up, down)| OrderScope::new(anchor, up, down))
}

proptest! {
    #[test]
    fn single_anchor_is_topological_and_complete(
        (n, edges) in dag(),
        pick in 0..MAX_PROJECTS,
        scope in scopes(),
    ) {
        let graph = build(n, &edges);
        let anchor = alias(pick % n);

        let ordered = order(&graph, &anchor, scope).unwrap();
        let aliases = graph.aliases(&ordered);

        assert_unique(&aliases);
        assert_topological(&graph, &aliases);

        let mut expected = BTreeSet::new();
        if scope.include_ancestors && scope.include_descendants {
            expected = weak_component(&graph, &anchor);
        } else if scope.include_ancestors {
            expected.extend(reach(&graph, &anchor, true));
        } else if scope.include_descendants {
            expected.extend(reach(&graph, &anchor, false));
        }
        if scope.include_anchor {
            expected.insert(anchor.clone());
        } else {
            expected.remove(&anchor);
        }
        let actual: BTreeSet<String> = aliases.iter().map(|a| a.to_string()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn full_scope_covers_weak_component(
        (n, edges) in dag(),
        pick in 0..MAX_PROJECTS,
    ) {
        let graph = build(n, &edges);
        let anchor = alias(pick % n);

        let ordered = order(&graph, &anchor, OrderScope::ALL).unwrap();
        let aliases = graph.aliases(&ordered);
        assert_topological(&graph, &aliases);

        let actual: BTreeSet<String> = aliases.iter().map(|a| a.to_string()).collect();
        prop_assert_eq!(actual, weak_component(&graph, &anchor));
    }

    #[test]
    fn single_anchor_is_deterministic(
        (n, edges) in dag(),
        pick in 0..MAX_PROJECTS,
    ) {
        let graph = build(n, &edges);
        let anchor = alias(pick % n);

        let first = order(&graph, &anchor, OrderScope::ALL).unwrap();
        let second = order(&graph, &anchor, OrderScope::ALL).unwrap();
        prop_assert_eq!(&first, &second);

        let rebuilt = build(n, &edges);
        let third = order(&rebuilt, &anchor, OrderScope::ALL).unwrap();
        prop_assert_eq!(graph.aliases(&first), rebuilt.aliases(&third));
    }

    #[test]
    fn multi_anchor_places_each_request_once(
        (n, edges) in dag(),
        picks in prop::collection::vec(0..MAX_PROJECTS, 1..8),
    ) {
        let graph = build(n, &edges);
        let ids: Vec<String> = picks.iter().map(|p| alias(p % n)).collect();
        let options = OrderOptions::with_safety_limit(MAX_PROJECTS * 2);

        let ordered = order_multiple(&graph, &ids, &options).unwrap();
        let aliases = graph.aliases(&ordered);

        assert_unique(&aliases);
        assert_topological(&graph, &aliases);
        let expected: BTreeSet<&str> = ids.iter().map(String::as_str).collect();
        let actual: BTreeSet<&str> = aliases.iter().copied().collect();
        prop_assert_eq!(actual, expected);

        let again = order_multiple(&graph, &ids, &options).unwrap();
        prop_assert_eq!(ordered, again);
    }
}
