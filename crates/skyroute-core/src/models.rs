//! Core data models for the routing system.

use serde::{Deserialize, Serialize};

/// Number of rows/columns in the matrix consumed by the angle advisor.
pub const QUBO_SIZE: usize = 8;

/// Fixed-size matrix handed to the angle advisor.
pub type QuboMatrix = [[f64; QUBO_SIZE]; QUBO_SIZE];

/// An airport from the static catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub airport_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Airport {
    /// Create an airport with only the required attributes.
    pub fn new(code: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            latitude,
            longitude,
            country: None,
            city: None,
            airport_type: None,
            timezone: None,
        }
    }

    pub fn with_location(mut self, country: impl Into<String>, city: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self.city = Some(city.into());
        self
    }

    /// (latitude, longitude) in decimal degrees.
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// How a path was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    /// Minimum planar-weight path found by the search.
    Shortest,
    /// Degenerate `[origin, destination]` path returned when the search found nothing.
    Fallback,
    /// Single-stop detour produced by the alternatives heuristic.
    Alternative,
}

/// Ordered sequence of airport codes from origin to destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePath {
    pub codes: Vec<String>,
    pub kind: PathKind,
}

impl RoutePath {
    pub fn new(codes: Vec<String>, kind: PathKind) -> Self {
        Self { codes, kind }
    }

    pub fn origin(&self) -> Option<&str> {
        self.codes.first().map(String::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.codes.last().map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn is_fallback(&self) -> bool {
        self.kind == PathKind::Fallback
    }

    /// Number of legs flown.
    pub fn legs(&self) -> usize {
        self.codes.len().saturating_sub(1)
    }

    /// Human readable form, e.g. `DEL → BOM → BLR`.
    pub fn display(&self) -> String {
        self.codes.join(" → ")
    }
}

/// Whole hours plus remaining minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightDuration {
    pub hours: u32,
    pub minutes: u32,
}

/// Distance, duration and cost figures for one path. Values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteQuote {
    pub distance_km: f64,
    pub distance_miles: f64,
    pub duration: FlightDuration,
    pub total_cost: f64,
    pub fuel_cost: f64,
}

/// Result of planning a route between two catalog airports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlan {
    pub main_path: RoutePath,
    pub alternative_paths: Vec<RoutePath>,
    /// One quote per path: the main path first, then each alternative in order.
    pub quotes: Vec<RouteQuote>,
}

impl RoutePlan {
    /// Iterate every path (main first) alongside its quote.
    pub fn routes(&self) -> impl Iterator<Item = (&RoutePath, &RouteQuote)> {
        std::iter::once(&self.main_path)
            .chain(self.alternative_paths.iter())
            .zip(self.quotes.iter())
    }

    pub fn main_quote(&self) -> Option<&RouteQuote> {
        self.quotes.first()
    }
}

/// Control angles returned by the angle advisor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnglePrediction {
    pub beta: f64,
    pub gamma: f64,
}
