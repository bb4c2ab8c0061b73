//! Shortest-path search and alternative route generation.

use crate::error::RouteError;
use crate::graph::AirportGraph;
use crate::models::{PathKind, RoutePath};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Maximum number of alternatives produced when the caller doesn't say.
pub const DEFAULT_MAX_ALTERNATIVES: usize = 2;

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    cost: FloatOrd,
    node: usize,
    via: Option<usize>,
    seq: usize,
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equal-cost entries fall back to catalog position, then push order.
impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.node.cmp(&other.node))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Check that both endpoints exist, differ, and that routing is possible at all.
pub fn validate_endpoints(
    graph: &AirportGraph,
    origin: &str,
    destination: &str,
) -> Result<(), RouteError> {
    if graph.node_count() < 2 {
        return Err(RouteError::EmptyCatalog {
            nodes: graph.node_count(),
        });
    }
    if origin == destination {
        return Err(RouteError::invalid_endpoint(
            origin,
            destination,
            "origin and destination are identical",
        ));
    }
    if !graph.contains(origin) {
        return Err(RouteError::invalid_endpoint(
            origin,
            destination,
            format!("unknown origin {origin}"),
        ));
    }
    if !graph.contains(destination) {
        return Err(RouteError::invalid_endpoint(
            origin,
            destination,
            format!("unknown destination {destination}"),
        ));
    }
    Ok(())
}

/// Minimum planar-weight path from `origin` to `destination`.
///
/// Runs Dijkstra over the whole graph and stops the first time the
/// destination is settled. When the destination is unreachable the result
/// is the two-node `[origin, destination]` path tagged [`PathKind::Fallback`].
pub fn shortest_path(
    graph: &AirportGraph,
    origin: &str,
    destination: &str,
) -> Result<RoutePath, RouteError> {
    validate_endpoints(graph, origin, destination)?;

    // Both lookups succeed after validation.
    let (Some(start), Some(goal)) = (graph.index_of(origin), graph.index_of(destination)) else {
        return Err(RouteError::invalid_endpoint(origin, destination, "unknown endpoint"));
    };

    let mut settled: Vec<Option<Option<usize>>> = vec![None; graph.node_count()];
    let mut open = BinaryHeap::new();
    let mut seq = 0usize;
    open.push(Reverse(OpenNode {
        cost: FloatOrd(0.0),
        node: start,
        via: None,
        seq,
    }));

    let mut nodes_settled = 0usize;
    while let Some(Reverse(current)) = open.pop() {
        if settled[current.node].is_some() {
            continue;
        }
        settled[current.node] = Some(current.via);
        nodes_settled += 1;

        if current.node == goal {
            let path = reconstruct(graph, &settled, goal);
            tracing::debug!(
                "Shortest path {} -> {} settled {} node(s), cost {:.4}",
                origin,
                destination,
                nodes_settled,
                current.cost.0
            );
            return Ok(RoutePath::new(path, PathKind::Shortest));
        }

        for &(next, weight) in graph.edges_at(current.node) {
            if settled[next].is_some() {
                continue;
            }
            seq += 1;
            open.push(Reverse(OpenNode {
                cost: FloatOrd(current.cost.0 + weight),
                node: next,
                via: Some(current.node),
                seq,
            }));
        }
    }

    tracing::warn!(
        "No path found {} -> {}; returning direct fallback",
        origin,
        destination
    );
    Ok(RoutePath::new(
        vec![origin.to_string(), destination.to_string()],
        PathKind::Fallback,
    ))
}

fn reconstruct(graph: &AirportGraph, settled: &[Option<Option<usize>>], goal: usize) -> Vec<String> {
    let mut path = vec![graph.code_at(goal).to_string()];
    let mut cursor = goal;
    while let Some(Some(prev)) = settled[cursor] {
        path.push(graph.code_at(prev).to_string());
        cursor = prev;
    }
    path.reverse();
    path
}

/// Up to `max_count` single-stop detours `[origin, X, destination]`.
///
/// `X` walks `all_codes` in order, skipping anything already on `main_path`,
/// and generation stops as soon as `max_count` paths exist.
pub fn alternatives<'a>(
    main_path: &RoutePath,
    all_codes: impl IntoIterator<Item = &'a str>,
    max_count: usize,
) -> Vec<RoutePath> {
    let (Some(origin), Some(destination)) = (main_path.origin(), main_path.destination()) else {
        return Vec::new();
    };
    if max_count == 0 || main_path.codes.len() < 2 {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(max_count);
    for code in all_codes {
        if main_path.contains(code) {
            continue;
        }
        result.push(RoutePath::new(
            vec![origin.to_string(), code.to_string(), destination.to_string()],
            PathKind::Alternative,
        ));
        if result.len() == max_count {
            break;
        }
    }
    result
}
