//! Shared, read-only application state.

use skyroute_core::{AirportGraph, AngleAdvisor, Catalog, RoutePlanner};
use std::sync::Arc;
use std::time::Duration;

use crate::advisor_client::HttpAngleAdvisor;
use crate::config::Config;

/// Catalog, graph and advisor built once at startup and shared by every request.
pub struct AppState {
    catalog: Catalog,
    planner: RoutePlanner,
    advisor: Option<Arc<dyn AngleAdvisor>>,
    config: Config,
}

impl AppState {
    /// Build state from a loaded catalog, wiring the HTTP advisor when configured.
    pub fn new(catalog: Catalog, config: Config) -> Self {
        let advisor: Option<Arc<dyn AngleAdvisor>> = match config.advisor_url.as_deref() {
            Some(url) => {
                tracing::info!("Angle advisor enabled at {}", url);
                Some(Arc::new(HttpAngleAdvisor::new(
                    url,
                    Duration::from_secs(config.advisor_timeout_s),
                )))
            }
            None => {
                tracing::info!("Angle advisor disabled");
                None
            }
        };
        Self::with_advisor(catalog, config, advisor)
    }

    pub fn with_advisor(
        catalog: Catalog,
        config: Config,
        advisor: Option<Arc<dyn AngleAdvisor>>,
    ) -> Self {
        let graph = Arc::new(AirportGraph::build(catalog.airports()));
        if graph.node_count() < 2 {
            tracing::warn!(
                "Airport graph has {} node(s); route requests will fail",
                graph.node_count()
            );
        }
        Self {
            catalog,
            planner: RoutePlanner::new(graph),
            advisor,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn planner(&self) -> &RoutePlanner {
        &self.planner
    }

    pub fn advisor(&self) -> Option<&dyn AngleAdvisor> {
        self.advisor.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
