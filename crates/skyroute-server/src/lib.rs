//! Skyroute HTTP service: catalog browsing and route optimization.

pub mod advisor_client;
pub mod api;
pub mod config;
pub mod state;
