//! Error taxonomy for the routing core.

use thiserror::Error;

/// Errors raised before or during route search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Origin or destination missing from the catalog, or both identical.
    #[error("invalid endpoints {origin} -> {destination}: {reason}")]
    InvalidEndpoint {
        origin: String,
        destination: String,
        reason: String,
    },

    /// Fewer than two airports in the graph.
    #[error("no route possible: graph has {nodes} airport(s)")]
    EmptyCatalog { nodes: usize },
}

impl RouteError {
    pub fn invalid_endpoint(
        origin: impl Into<String>,
        destination: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidEndpoint {
            origin: origin.into(),
            destination: destination.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading the airport catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures of the external angle advisor. Never fatal to routing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvisorError {
    #[error("angle advisor unreachable: {0}")]
    Transport(String),

    #[error("angle advisor rejected request: {0}")]
    Rejected(String),

    #[error("angle advisor returned malformed response: {0}")]
    Malformed(String),

    #[error("qubo_matrix must be {size}x{size}")]
    InvalidMatrix { size: usize },
}
