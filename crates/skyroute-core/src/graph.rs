//! In-memory airport graph used for path search.
//!
//! Edge weights are planar Euclidean distances over raw (lat, lon) degrees.
//! They rank candidate paths only; reported distances come from
//! [`crate::cost::segment_distance_km`].

use crate::models::Airport;
use std::collections::HashMap;

/// Planar distance between two (lat, lon) pairs in degrees.
pub fn planar_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Immutable weighted graph over catalog airports.
///
/// Built once and shared read-only between requests.
#[derive(Debug, Clone, Default)]
pub struct AirportGraph {
    airports: Vec<Airport>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl AirportGraph {
    /// Complete graph: every ordered pair of distinct airports is connected.
    pub fn build(catalog: &[Airport]) -> Self {
        let mut graph = Self::with_nodes(catalog);
        let count = graph.airports.len();
        for from in 0..count {
            let mut edges = Vec::with_capacity(count.saturating_sub(1));
            for to in 0..count {
                if from != to {
                    edges.push((to, graph.weight_between(from, to)));
                }
            }
            graph.adjacency[from] = edges;
        }
        tracing::debug!("Built complete airport graph with {} nodes", count);
        graph
    }

    /// Sparse graph containing only the given undirected connections.
    ///
    /// Pairs naming unknown codes, or the same code twice, are ignored.
    pub fn from_edges<'a>(
        catalog: &[Airport],
        edges: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut graph = Self::with_nodes(catalog);
        for (a, b) in edges {
            let (Some(&from), Some(&to)) = (graph.index.get(a), graph.index.get(b)) else {
                tracing::warn!("Ignoring edge {} - {} with unknown endpoint", a, b);
                continue;
            };
            if from == to || graph.adjacency[from].iter().any(|(n, _)| *n == to) {
                continue;
            }
            let weight = graph.weight_between(from, to);
            graph.adjacency[from].push((to, weight));
            graph.adjacency[to].push((from, weight));
        }
        graph
    }

    fn with_nodes(catalog: &[Airport]) -> Self {
        let mut airports = Vec::with_capacity(catalog.len());
        let mut index = HashMap::with_capacity(catalog.len());
        for airport in catalog {
            if index.contains_key(&airport.code) {
                continue;
            }
            index.insert(airport.code.clone(), airports.len());
            airports.push(airport.clone());
        }
        let adjacency = vec![Vec::new(); airports.len()];
        Self {
            airports,
            index,
            adjacency,
        }
    }

    fn weight_between(&self, from: usize, to: usize) -> f64 {
        planar_distance(
            self.airports[from].coordinates(),
            self.airports[to].coordinates(),
        )
    }

    pub fn node_count(&self) -> usize {
        self.airports.len()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.index.get(code).map(|&idx| &self.airports[idx])
    }

    /// Codes in catalog order.
    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.airports.iter().map(|a| a.code.as_str())
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    /// Outgoing edges of `code`. Empty for unknown codes.
    pub fn neighbors(&self, code: &str) -> Vec<(&str, f64)> {
        match self.index.get(code) {
            Some(&idx) => self.adjacency[idx]
                .iter()
                .map(|&(to, weight)| (self.airports[to].code.as_str(), weight))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Weight of the edge `from -> to`, if present.
    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        let from = *self.index.get(from)?;
        let to = *self.index.get(to)?;
        self.adjacency[from]
            .iter()
            .find(|(n, _)| *n == to)
            .map(|&(_, w)| w)
    }

    /// (lat, lon) for each code, skipping codes not in the graph.
    pub fn coordinates<S: AsRef<str>>(&self, codes: &[S]) -> Vec<(f64, f64)> {
        codes
            .iter()
            .filter_map(|code| self.airport(code.as_ref()))
            .map(Airport::coordinates)
            .collect()
    }

    pub(crate) fn index_of(&self, code: &str) -> Option<usize> {
        self.index.get(code).copied()
    }

    pub(crate) fn code_at(&self, idx: usize) -> &str {
        &self.airports[idx].code
    }

    pub(crate) fn edges_at(&self, idx: usize) -> &[(usize, f64)] {
        &self.adjacency[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Airport> {
        vec![
            Airport::new("DEL", "Delhi", 28.56, 77.10),
            Airport::new("BOM", "Mumbai", 19.08, 72.88),
            Airport::new("BLR", "Bengaluru", 12.97, 77.59),
        ]
    }

    #[test]
    fn complete_graph_has_no_self_loops() {
        let graph = AirportGraph::build(&catalog());
        assert_eq!(graph.node_count(), 3);
        for code in ["DEL", "BOM", "BLR"] {
            let neighbors = graph.neighbors(code);
            assert_eq!(neighbors.len(), 2);
            assert!(neighbors.iter().all(|(n, _)| *n != code));
        }
        assert!(graph.weight("DEL", "DEL").is_none());
    }

    #[test]
    fn weights_are_symmetric_planar_distance() {
        let graph = AirportGraph::build(&catalog());
        let forward = graph.weight("DEL", "BOM").unwrap();
        let backward = graph.weight("BOM", "DEL").unwrap();
        assert_eq!(forward, backward);

        let expected = ((28.56f64 - 19.08).powi(2) + (77.10f64 - 72.88).powi(2)).sqrt();
        assert!((forward - expected).abs() < 1e-12);
    }

    #[test]
    fn unknown_code_has_no_neighbors() {
        let graph = AirportGraph::build(&catalog());
        assert!(graph.neighbors("JFK").is_empty());
        assert!(!graph.contains("JFK"));
    }

    #[test]
    fn empty_catalog_builds_empty_graph() {
        let graph = AirportGraph::build(&[]);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.codes().count(), 0);
    }

    #[test]
    fn sparse_graph_keeps_only_listed_edges() {
        let graph = AirportGraph::from_edges(&catalog(), [("DEL", "BOM"), ("BOM", "XYZ"), ("BOM", "BOM")]);
        assert_eq!(graph.neighbors("DEL"), vec![("BOM", graph.weight("DEL", "BOM").unwrap())]);
        assert_eq!(graph.neighbors("BOM").len(), 1);
        assert!(graph.neighbors("BLR").is_empty());
    }
}
