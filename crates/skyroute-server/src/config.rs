//! Server configuration from environment.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub catalog_path: String,
    /// Angle advisor endpoint. `None` disables the advisor.
    pub advisor_url: Option<String>,
    pub advisor_timeout_s: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SKYROUTE_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            catalog_path: env::var("SKYROUTE_CATALOG_PATH")
                .unwrap_or_else(|_| "data/airports.json".to_string()),
            advisor_url: env::var("SKYROUTE_ADVISOR_URL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            advisor_timeout_s: env::var("SKYROUTE_ADVISOR_TIMEOUT_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5)
                .max(1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            catalog_path: "data/airports.json".to_string(),
            advisor_url: None,
            advisor_timeout_s: 5,
        }
    }
}
