//! REST API routes.

use axum::{
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::{airports, optimize};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    let catalog_routes = Router::new()
        .route("/v1/airports", get(airports::list_airports))
        .route("/v1/airports/stats", get(airports::airport_stats))
        .route("/v1/airports/find/:code", get(airports::find_airport));

    let route_routes = Router::new()
        .route("/v1/routes/optimize", post(optimize::optimize_route))
        // Path kept for older frontends.
        .route("/optimize/", post(optimize::optimize_route));

    Router::new()
        .route("/health", get(health))
        .merge(catalog_routes)
        .merge(route_routes)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
