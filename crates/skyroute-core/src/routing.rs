//! Route planning entry points: search, alternatives and quotes in one call.

use crate::advisor::{consult, AdvisorOutcome, AngleAdvisor};
use crate::cost;
use crate::error::RouteError;
use crate::graph::AirportGraph;
use crate::models::{Airport, QuboMatrix, RoutePath, RoutePlan, RouteQuote};
use crate::error::AdvisorError;
use crate::planner::{alternatives, shortest_path, DEFAULT_MAX_ALTERNATIVES};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A route plan together with whatever the angle advisor reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeReport {
    pub plan: RoutePlan,
    pub angles: AdvisorOutcome,
}

/// Stateless planner over a shared, immutable graph.
#[derive(Debug, Clone)]
pub struct RoutePlanner {
    graph: Arc<AirportGraph>,
    max_alternatives: usize,
}

impl RoutePlanner {
    pub fn new(graph: Arc<AirportGraph>) -> Self {
        Self {
            graph,
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
        }
    }

    pub fn with_max_alternatives(mut self, max_alternatives: usize) -> Self {
        self.max_alternatives = max_alternatives;
        self
    }

    pub fn graph(&self) -> &AirportGraph {
        &self.graph
    }

    pub fn plan(&self, origin: &str, destination: &str) -> Result<RoutePlan, RouteError> {
        plan_on_graph(&self.graph, origin, destination, self.max_alternatives)
    }

    /// Plan a route, then consult the advisor.
    ///
    /// Endpoint errors are returned before the advisor is called. Advisor
    /// failures never affect the plan.
    pub fn plan_with_advisor(
        &self,
        origin: &str,
        destination: &str,
        advisor: Option<&dyn AngleAdvisor>,
        matrix: &QuboMatrix,
    ) -> Result<OptimizeReport, RouteError> {
        self.plan_with_matrix(origin, destination, advisor, Ok(*matrix))
    }

    /// Like [`plan_with_advisor`](Self::plan_with_advisor), but takes a matrix
    /// that may have failed validation. A bad matrix is reported in the
    /// angles and the advisor is not called.
    pub fn plan_with_matrix(
        &self,
        origin: &str,
        destination: &str,
        advisor: Option<&dyn AngleAdvisor>,
        matrix: Result<QuboMatrix, AdvisorError>,
    ) -> Result<OptimizeReport, RouteError> {
        let plan = self.plan(origin, destination)?;
        let angles = match matrix {
            Ok(matrix) => consult(advisor, &matrix),
            Err(err) => {
                tracing::warn!("Angle advisor skipped: {}", err);
                AdvisorOutcome::Unavailable {
                    error: err.to_string(),
                }
            }
        };
        Ok(OptimizeReport { plan, angles })
    }

    pub fn quote(&self, path: &RoutePath) -> RouteQuote {
        quote_path(&self.graph, path)
    }
}

/// Build a graph from `catalog` and plan a route on it.
pub fn plan_route(
    catalog: &[Airport],
    origin: &str,
    destination: &str,
) -> Result<RoutePlan, RouteError> {
    let graph = AirportGraph::build(catalog);
    plan_on_graph(&graph, origin, destination, DEFAULT_MAX_ALTERNATIVES)
}

/// Plan a route on an existing graph.
pub fn plan_on_graph(
    graph: &AirportGraph,
    origin: &str,
    destination: &str,
    max_alternatives: usize,
) -> Result<RoutePlan, RouteError> {
    let main_path = shortest_path(graph, origin, destination)?;
    let alternative_paths = alternatives(&main_path, graph.codes(), max_alternatives);

    let quotes = std::iter::once(&main_path)
        .chain(alternative_paths.iter())
        .map(|path| quote_path(graph, path))
        .collect();

    tracing::info!(
        "Planned {} -> {}: {} ({} alternative(s))",
        origin,
        destination,
        main_path.display(),
        alternative_paths.len()
    );

    Ok(RoutePlan {
        main_path,
        alternative_paths,
        quotes,
    })
}

/// Great-circle quote for a path's coordinates.
pub fn quote_path(graph: &AirportGraph, path: &RoutePath) -> RouteQuote {
    cost::quote(&graph.coordinates(path.codes.as_slice()))
}
