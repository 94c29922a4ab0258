//! Single-anchor ordering by longest-path layering.
//!
//! Every project reached from the anchor gets a signed level: positive
//! on the consumer side, negative on the dependency side. A level is
//! the longest hop distance along a one-direction path from the anchor,
//! so sorting by level puts each project after all of its transitive
//! dependencies and before all of its transitive consumers.
//!
//! A scope covering both sides widens to the anchor's whole weakly
//! connected component, which also brings in siblings that only share a
//! dependency or a consumer with the anchor.

use std::collections::{HashMap, HashSet};

use super::component::order_component;
use super::error::{OrderError, OrderResult};
use super::scope::OrderScope;
use crate::graph::DependencyNetwork;

/// Orders the projects around `anchor` selected by `scope`.
///
/// # Example
///
/// ```rust
/// use monoseq::graph::GraphBuilder;
/// use monoseq::order::{order, Modifier};
///
/// let graph = GraphBuilder::new()
///     .with_project("assets", "assets", &[])
///     .with_project("iso", "iso", &[])
///     .with_project("server", "server", &["iso"])
///     .with_project("client", "client", &["iso", "server"])
///     .build();
///
/// let ordered = order(&graph, "client", Modifier::To.scope()).unwrap();
/// assert_eq!(graph.aliases(&ordered), vec!["iso", "server", "client"]);
/// ```
pub fn order<G: DependencyNetwork>(
    graph: &G,
    anchor: &str,
    scope: OrderScope,
) -> OrderResult<Vec<G::Node>> {
    let node = graph
        .lookup(anchor)
        .ok_or_else(|| OrderError::unknown(anchor))?;
    order_node(graph, node, scope)
}

/// [`order`] for an already resolved anchor.
pub(crate) fn order_node<G: DependencyNetwork>(
    graph: &G,
    anchor: G::Node,
    scope: OrderScope,
) -> OrderResult<Vec<G::Node>> {
    let mut levels = Levels::new(anchor);

    if scope.include_ancestors {
        relax(graph, anchor, Side::Ancestors, &mut levels)?;
    }
    if scope.include_descendants {
        relax(graph, anchor, Side::Descendants, &mut levels)?;
    }

    let keep = |node: G::Node| scope.include_anchor || node != anchor;
    let ordered = if scope.include_ancestors && scope.include_descendants {
        let mut component = order_component(graph, anchor)?;
        component.retain(|&node| keep(node));
        component
    } else {
        levels.flatten(keep)
    };
    tracing::debug!(
        "Ordered {} project(s) around '{}'",
        ordered.len(),
        graph.name(anchor)
    );
    Ok(ordered)
}

/// Which edge set a walk follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Ancestors,
    Descendants,
}

impl Side {
    fn step(self) -> i64 {
        match self {
            Side::Ancestors => 1,
            Side::Descendants => -1,
        }
    }

    fn neighbours<G: DependencyNetwork>(self, graph: &G, node: G::Node) -> Vec<G::Node> {
        match self {
            Side::Ancestors => graph.consumers(node),
            Side::Descendants => graph.dependencies(node),
        }
    }

    /// True if `level` was assigned by the opposite walk.
    fn opposes(self, level: i64) -> bool {
        match self {
            Side::Ancestors => level < 0,
            Side::Descendants => level > 0,
        }
    }
}

/// Levels keyed by node, remembering first-assignment order.
struct Levels<N> {
    seen: Vec<N>,
    level: HashMap<N, i64>,
}

impl<N: Copy + Eq + std::hash::Hash> Levels<N> {
    fn new(anchor: N) -> Self {
        let mut levels = Self {
            seen: Vec::new(),
            level: HashMap::new(),
        };
        levels.set(anchor, 0);
        levels
    }

    fn get(&self, node: N) -> Option<i64> {
        self.level.get(&node).copied()
    }

    fn set(&mut self, node: N, level: i64) {
        if self.level.insert(node, level).is_none() {
            self.seen.push(node);
        }
    }

    /// Nodes by ascending level; ties keep first-assignment order.
    fn flatten(self, keep: impl Fn(N) -> bool) -> Vec<N> {
        let Levels { seen, level } = self;
        let mut ordered: Vec<N> = seen.into_iter().filter(|&n| keep(n)).collect();
        ordered.sort_by_key(|n| level[n]);
        ordered
    }
}

/// One node being expanded by the walk.
struct Frame<N> {
    node: N,
    level: i64,
    pending: std::vec::IntoIter<N>,
}

/// Depth-first relaxation from the anchor along one side.
///
/// A node is re-expanded whenever a longer path to it is found, so its
/// final level is its longest distance from the anchor. The explicit
/// stack doubles as the current path, which is how cycles are caught.
fn relax<G: DependencyNetwork>(
    graph: &G,
    anchor: G::Node,
    side: Side,
    levels: &mut Levels<G::Node>,
) -> OrderResult<()> {
    let mut on_path = HashSet::from([anchor]);
    let mut stack = vec![Frame {
        node: anchor,
        level: 0,
        pending: side.neighbours(graph, anchor).into_iter(),
    }];

    while let Some(frame) = stack.last_mut() {
        let from = frame.node;
        let candidate = frame.level + side.step();
        let next = frame.pending.next();

        let Some(next) = next else {
            on_path.remove(&from);
            stack.pop();
            continue;
        };

        if next == anchor {
            return Err(OrderError::GraphContradiction {
                project: graph.name(from).to_string(),
                anchor: graph.name(anchor).to_string(),
            });
        }

        if on_path.contains(&next) {
            let mut cycle: Vec<String> = stack
                .iter()
                .skip_while(|f| f.node != next)
                .map(|f| graph.name(f.node).to_string())
                .collect();
            cycle.push(graph.name(next).to_string());
            return Err(OrderError::CycleDetected { cycle });
        }

        match levels.get(next) {
            Some(existing) if side.opposes(existing) => {
                return Err(OrderError::GraphContradiction {
                    project: graph.name(next).to_string(),
                    anchor: graph.name(anchor).to_string(),
                });
            }
            Some(existing) if existing.abs() >= candidate.abs() => continue,
            _ => {}
        }

        levels.set(next, candidate);
        on_path.insert(next);
        stack.push(Frame {
            node: next,
            level: candidate,
            pending: side.neighbours(graph, next).into_iter(),
        });
    }

    Ok(())
}
