//! Static airport catalog loaded once at startup.
//!
//! The catalog file is a JSON array of airport records. Records without a
//! code, name or coordinates are skipped, codes are upper-cased, and the
//! first record wins when a code repeats. File order is preserved because
//! the alternatives heuristic depends on it.

use crate::error::CatalogError;
use crate::models::Airport;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const DEFAULT_STATS_SAMPLE: usize = 20;

#[derive(Debug, Deserialize)]
struct RawLocation {
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAirport {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    location: Option<RawLocation>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default, rename = "type")]
    airport_type: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
}

impl RawAirport {
    fn into_airport(self) -> Option<Airport> {
        let code = non_empty(self.code)?.to_uppercase();
        let name = non_empty(self.name)?;
        let latitude = self.latitude.filter(|v| v.is_finite())?;
        let longitude = self.longitude.filter(|v| v.is_finite())?;

        let (loc_country, loc_city) = match self.location {
            Some(loc) => (loc.country, loc.city),
            None => (None, None),
        };

        Some(Airport {
            code,
            name,
            latitude,
            longitude,
            country: non_empty(loc_country.or(self.country)),
            city: non_empty(loc_city.or(self.city)),
            airport_type: non_empty(self.airport_type),
            timezone: non_empty(self.timezone),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Query parameters for narrowing the catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirportFilter {
    /// Case-insensitive substring of the country.
    #[serde(default)]
    pub country: Option<String>,
    /// Case-insensitive substring of the city.
    #[serde(default)]
    pub city: Option<String>,
    /// Case-insensitive exact code.
    #[serde(default)]
    pub code: Option<String>,
}

impl AirportFilter {
    fn is_empty(&self) -> bool {
        self.country.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.city.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.code.as_deref().map_or(true, |s| s.trim().is_empty())
    }

    fn matches(&self, airport: &Airport) -> bool {
        fn contains(field: Option<&str>, needle: Option<&str>) -> bool {
            let needle = match needle.map(str::trim).filter(|s| !s.is_empty()) {
                Some(needle) => needle.to_lowercase(),
                None => return true,
            };
            field
                .map(|value| value.to_lowercase().contains(&needle))
                .unwrap_or(false)
        }

        let code_ok = match self.code.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(code) => airport.code.eq_ignore_ascii_case(code),
            None => true,
        };

        code_ok
            && contains(airport.country.as_deref(), self.country.as_deref())
            && contains(airport.city.as_deref(), self.city.as_deref())
    }
}

/// Code/name pair used in catalog statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirportSummary {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub total_airports: usize,
    pub sample_codes: Vec<AirportSummary>,
}

/// Immutable, ordered airport catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    airports: Vec<Airport>,
    skipped: usize,
}

impl Catalog {
    /// Build a catalog from already-parsed airports, dropping duplicate codes.
    pub fn from_airports(airports: impl IntoIterator<Item = Airport>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut skipped = 0;
        for airport in airports {
            if seen.insert(airport.code.clone()) {
                kept.push(airport);
            } else {
                tracing::warn!("Duplicate airport code {} ignored", airport.code);
                skipped += 1;
            }
        }
        Self {
            airports: kept,
            skipped,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let total = records.len();
        let parsed: Vec<Airport> = records
            .into_iter()
            .enumerate()
            .filter_map(|(idx, record)| match serde_json::from_value::<RawAirport>(record) {
                Ok(raw) => raw.into_airport(),
                Err(err) => {
                    tracing::warn!("Airport record {} is malformed: {}", idx, err);
                    None
                }
            })
            .collect();
        let incomplete = total - parsed.len();
        if incomplete > 0 {
            tracing::warn!("Skipped {} incomplete airport record(s)", incomplete);
        }

        let mut catalog = Self::from_airports(parsed);
        catalog.skipped += incomplete;
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            "Loaded {} airports from {} ({} skipped)",
            catalog.len(),
            path.display(),
            catalog.skipped
        );
        Ok(catalog)
    }

    /// Airports in catalog order.
    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Records dropped while loading (incomplete or duplicate).
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn find(&self, code: &str) -> Option<&Airport> {
        let code = code.trim();
        self.airports
            .iter()
            .find(|airport| airport.code.eq_ignore_ascii_case(code))
    }

    pub fn filter(&self, filter: &AirportFilter) -> Vec<&Airport> {
        if filter.is_empty() {
            return self.airports.iter().collect();
        }
        self.airports
            .iter()
            .filter(|airport| filter.matches(airport))
            .collect()
    }

    pub fn stats(&self, sample: Option<usize>) -> CatalogStats {
        let sample = sample.unwrap_or(DEFAULT_STATS_SAMPLE);
        CatalogStats {
            total_airports: self.airports.len(),
            sample_codes: self
                .airports
                .iter()
                .take(sample)
                .map(|airport| AirportSummary {
                    code: airport.code.clone(),
                    name: airport.name.clone(),
                })
                .collect(),
        }
    }
}
