//! Airport catalog endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use skyroute_core::{Airport, AirportFilter, AirportSummary};
use std::sync::Arc;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AirportListResponse {
    pub airports: Vec<Airport>,
}

#[derive(Debug, Serialize)]
pub struct AirportStatsResponse {
    pub total_airports: usize,
    pub sample_codes: Vec<AirportSummary>,
    pub message: String,
}

/// List airports, optionally filtered by `country`, `city` or `code`.
pub async fn list_airports(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<AirportFilter>,
) -> Json<AirportListResponse> {
    let airports = state
        .catalog()
        .filter(&filter)
        .into_iter()
        .cloned()
        .collect();
    Json(AirportListResponse { airports })
}

pub async fn find_airport(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Json<Value> {
    match state.catalog().find(&code) {
        Some(airport) => Json(json!({ "found": true, "airport": airport })),
        None => Json(json!({
            "found": false,
            "message": format!("Airport with code '{}' not found", code.trim().to_uppercase()),
        })),
    }
}

pub async fn airport_stats(State(state): State<Arc<AppState>>) -> Json<AirportStatsResponse> {
    let stats = state.catalog().stats(None);
    Json(AirportStatsResponse {
        message: format!("Catalog contains {} airports", stats.total_airports),
        total_airports: stats.total_airports,
        sample_codes: stats.sample_codes,
    })
}
