//! API routes for the Skyroute server.

pub mod airports;
pub mod optimize;
pub mod request_id;
mod routes;

use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    routes::create_router()
}

/// Router with state and the standard middleware stack applied.
pub fn app(state: Arc<AppState>) -> Router {
    routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::ensure_request_id))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests;
