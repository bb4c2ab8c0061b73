//! Route optimization endpoint.
//!
//! Plans the main route plus alternatives, quotes each one and attaches the
//! angle advisor's answer. Figures are rounded to two decimals here and
//! nowhere else.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use skyroute_core::{
    matrix_from_json, round2, zero_matrix, AdvisorOutcome, OptimizeReport, PathKind, RouteError,
    RoutePath, RouteQuote,
};
use std::sync::Arc;

use crate::api::request_id::RequestId;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub origin: String,
    pub destination: String,
    /// Only checked when the advisor needs it; a bad shape never blocks routing.
    #[serde(default)]
    pub qubo_matrix: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub path: String,
    pub codes: Vec<String>,
    pub coordinates: Vec<[f64; 2]>,
    pub kind: PathKind,
    pub fallback: bool,
    pub distance_km: f64,
    pub distance_miles: f64,
    pub duration_hours: u32,
    pub duration_minutes: u32,
    pub total_cost: f64,
    pub fuel_cost: f64,
}

#[derive(Debug, Serialize)]
pub struct RouteTiming {
    pub estimated_duration_hours: u32,
    pub estimated_duration_minutes: u32,
    pub total_distance_miles: f64,
    pub total_distance_km: f64,
}

#[derive(Debug, Serialize)]
pub struct MainRoute {
    pub path: String,
    pub timing: RouteTiming,
    pub total_cost: f64,
    pub total_fuel_cost: f64,
}

#[derive(Debug, Serialize)]
pub struct OptimizationResults {
    pub method: String,
    /// Miles.
    pub total_distance: f64,
    pub total_cost: f64,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub all_routes: Vec<RouteSummary>,
    pub route: MainRoute,
    pub optimization_results: OptimizationResults,
    pub qaoa_result: AdvisorOutcome,
}

type ApiError = (StatusCode, Json<Value>);

pub async fn optimize_route(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    let origin = request.origin.trim().to_uppercase();
    let destination = request.destination.trim().to_uppercase();
    let matrix = request
        .qubo_matrix
        .as_ref()
        .map_or_else(|| Ok(zero_matrix()), matrix_from_json);

    // The advisor may block on network I/O.
    let worker_state = state.clone();
    let (origin_code, destination_code) = (origin.clone(), destination.clone());
    let result = tokio::task::spawn_blocking(move || {
        worker_state.planner().plan_with_matrix(
            &origin_code,
            &destination_code,
            worker_state.advisor(),
            matrix,
        )
    })
    .await
    .map_err(|err| {
        tracing::error!("Route planning task failed: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Route planning failed" })),
        )
    })?;

    match result {
        Ok(report) => Ok(Json(build_response(&state, report))),
        Err(err) => {
            let request_id = request_id.map(|Extension(id)| id.0).unwrap_or_default();
            Err(route_error_response(&request_id, &origin, &destination, err))
        }
    }
}

fn route_error_response(
    request_id: &str,
    origin: &str,
    destination: &str,
    err: RouteError,
) -> ApiError {
    match err {
        RouteError::InvalidEndpoint { .. } => {
            tracing::info!(
                request_id,
                "Rejected route {} -> {}: {}",
                origin,
                destination,
                err
            );
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid origin or destination",
                    "details": err.to_string(),
                    "all_routes": [],
                })),
            )
        }
        RouteError::EmptyCatalog { .. } => {
            tracing::warn!(
                request_id,
                "Route {} -> {} impossible: {}",
                origin,
                destination,
                err
            );
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "No route possible",
                    "details": err.to_string(),
                    "all_routes": [],
                })),
            )
        }
    }
}

fn summarize(state: &AppState, path: &RoutePath, quote: &RouteQuote) -> RouteSummary {
    let coordinates = state
        .planner()
        .graph()
        .coordinates(path.codes.as_slice())
        .into_iter()
        .map(|(lat, lon)| [lat, lon])
        .collect();
    RouteSummary {
        path: path.display(),
        codes: path.codes.clone(),
        coordinates,
        kind: path.kind,
        fallback: path.is_fallback(),
        distance_km: round2(quote.distance_km),
        distance_miles: round2(quote.distance_miles),
        duration_hours: quote.duration.hours,
        duration_minutes: quote.duration.minutes,
        total_cost: round2(quote.total_cost),
        fuel_cost: round2(quote.fuel_cost),
    }
}

fn build_response(state: &AppState, report: OptimizeReport) -> OptimizeResponse {
    let plan = &report.plan;
    let all_routes: Vec<RouteSummary> = plan
        .routes()
        .map(|(path, quote)| summarize(state, path, quote))
        .collect();

    let main_path = plan.main_path.display();
    let main_quote = plan
        .main_quote()
        .copied()
        .unwrap_or_else(|| state.planner().quote(&plan.main_path));

    OptimizeResponse {
        route: MainRoute {
            path: main_path.clone(),
            timing: RouteTiming {
                estimated_duration_hours: main_quote.duration.hours,
                estimated_duration_minutes: main_quote.duration.minutes,
                total_distance_miles: round2(main_quote.distance_miles),
                total_distance_km: round2(main_quote.distance_km),
            },
            total_cost: round2(main_quote.total_cost),
            total_fuel_cost: round2(main_quote.fuel_cost),
        },
        optimization_results: OptimizationResults {
            method: "QAOA".to_string(),
            total_distance: round2(main_quote.distance_miles),
            total_cost: round2(main_quote.total_cost),
            path: main_path,
        },
        all_routes,
        qaoa_result: report.angles,
    }
}
