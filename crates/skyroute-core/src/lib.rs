//! Skyroute core: airport graph, route search and route costing.

pub mod advisor;
pub mod catalog;
pub mod cost;
pub mod error;
pub mod graph;
pub mod models;
pub mod planner;
pub mod routing;

pub use advisor::{consult, matrix_from_json, zero_matrix, AdvisorOutcome, AngleAdvisor};
pub use catalog::{AirportFilter, AirportSummary, Catalog, CatalogStats};
pub use cost::{
    estimate_cost, estimate_duration, km_to_miles, round2, segment_distance_km,
    total_distance_km, CostParams,
};
pub use error::{AdvisorError, CatalogError, RouteError};
pub use graph::{planar_distance, AirportGraph};
pub use models::{
    AnglePrediction, Airport, FlightDuration, PathKind, QuboMatrix, RoutePath, RoutePlan,
    RouteQuote, QUBO_SIZE,
};
pub use planner::{alternatives, shortest_path, DEFAULT_MAX_ALTERNATIVES};
pub use routing::{plan_on_graph, plan_route, quote_path, OptimizeReport, RoutePlanner};
