//! Distance, duration and cost estimation for planned paths.
//!
//! All figures use great-circle distance. Constants describe a generic
//! commercial jet and are policy, not configuration.

use crate::models::{FlightDuration, RouteQuote};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const KM_TO_MILES: f64 = 0.621371;

pub const DEFAULT_AVG_SPEED_KMH: f64 = 800.0;
/// Fixed takeoff/landing overhead in hours.
pub const TAKEOFF_LANDING_OVERHEAD_H: f64 = 0.5;

pub const DEFAULT_FUEL_PRICE_PER_LITER: f64 = 0.8;
pub const DEFAULT_FUEL_CONSUMPTION_LPH: f64 = 2500.0;
pub const DEFAULT_BASE_COST_PER_KM: f64 = 1.2;
/// Cruise speed used for fuel burn, independent of the duration estimate.
const FUEL_BURN_SPEED_KMH: f64 = 800.0;

/// Great-circle distance in kilometres between two (lat, lon) points.
pub fn segment_distance_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lon1) = a;
    let (lat2, lon2) = b;

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Sum of consecutive segment distances.
pub fn total_distance_km(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|pair| segment_distance_km(pair[0], pair[1]))
        .sum()
}

pub fn km_to_miles(km: f64) -> f64 {
    km * KM_TO_MILES
}

/// Block time for `distance_km`, truncated to whole hours and minutes.
pub fn estimate_duration(distance_km: f64, avg_speed_kmh: f64) -> FlightDuration {
    let time_hours = distance_km / avg_speed_kmh + TAKEOFF_LANDING_OVERHEAD_H;
    let hours = time_hours.trunc();
    let minutes = ((time_hours - hours) * 60.0).trunc();
    FlightDuration {
        hours: hours as u32,
        minutes: minutes as u32,
    }
}

/// Fuel and operational cost parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostParams {
    pub fuel_price_per_liter: f64,
    pub fuel_consumption_lph: f64,
    pub base_cost_per_km: f64,
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            fuel_price_per_liter: DEFAULT_FUEL_PRICE_PER_LITER,
            fuel_consumption_lph: DEFAULT_FUEL_CONSUMPTION_LPH,
            base_cost_per_km: DEFAULT_BASE_COST_PER_KM,
        }
    }
}

/// Returns `(total_cost, fuel_cost)`.
pub fn estimate_cost(distance_km: f64, params: &CostParams) -> (f64, f64) {
    let flight_hours = distance_km / FUEL_BURN_SPEED_KMH;
    let fuel_cost = flight_hours * params.fuel_consumption_lph * params.fuel_price_per_liter;
    let operational_cost = distance_km * params.base_cost_per_km;
    (fuel_cost + operational_cost, fuel_cost)
}

/// Full quote for a coordinate sequence using the default constants.
pub fn quote(points: &[(f64, f64)]) -> RouteQuote {
    let distance_km = total_distance_km(points);
    let (total_cost, fuel_cost) = estimate_cost(distance_km, &CostParams::default());
    RouteQuote {
        distance_km,
        distance_miles: km_to_miles(distance_km),
        duration: estimate_duration(distance_km, DEFAULT_AVG_SPEED_KMH),
        total_cost,
        fuel_cost,
    }
}

/// Round to two decimal places for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
