use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use skyroute_core::{AdvisorError, Airport, AngleAdvisor, AnglePrediction, Catalog, QuboMatrix};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{api, config::Config, state::AppState};

struct StubAdvisor {
    calls: AtomicUsize,
    fail: bool,
}

impl AngleAdvisor for StubAdvisor {
    fn predict_angles(&self, matrix: &QuboMatrix) -> Result<AnglePrediction, AdvisorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AdvisorError::Transport("connection refused".to_string()));
        }
        Ok(AnglePrediction {
            beta: 0.5 + matrix[0][0],
            gamma: 1.25,
        })
    }
}

fn fixture_catalog() -> Catalog {
    Catalog::from_airports(vec![
        Airport::new("DEL", "Delhi", 28.56, 77.10).with_location("India", "New Delhi"),
        Airport::new("BOM", "Mumbai", 19.08, 72.88).with_location("India", "Mumbai"),
        Airport::new("BLR", "Bengaluru", 12.97, 77.59).with_location("India", "Bengaluru"),
        Airport::new("LHR", "Heathrow", 51.47, -0.45).with_location("United Kingdom", "London"),
    ])
}

fn setup_app(fail_advisor: bool) -> (axum::Router, Arc<StubAdvisor>) {
    let advisor = Arc::new(StubAdvisor {
        calls: AtomicUsize::new(0),
        fail: fail_advisor,
    });
    let state = Arc::new(AppState::with_advisor(
        fixture_catalog(),
        Config::default(),
        Some(advisor.clone() as Arc<dyn AngleAdvisor>),
    ));
    (api::app(state), advisor)
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn assert_close(value: &Value, expected: f64) {
    let actual = value.as_f64().unwrap_or_else(|| panic!("not a number: {value}"));
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_reports_healthy() {
    let (app, _) = setup_app(false);
    let res = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    let body = read_json(res).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let (app, _) = setup_app(false);
    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.headers()["x-request-id"], "abc-123");
}

#[tokio::test]
async fn optimize_returns_main_alternatives_and_angles() {
    let (app, advisor) = setup_app(false);
    let res = app
        .oneshot(post_json(
            "/v1/routes/optimize",
            json!({ "origin": "del", "destination": " BLR " }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;

    let routes = body["all_routes"].as_array().unwrap();
    assert_eq!(routes.len(), 3);
    assert_eq!(routes[0]["path"], "DEL → BLR");
    assert_eq!(routes[0]["kind"], "shortest");
    assert_eq!(routes[0]["fallback"], false);
    assert_close(&routes[0]["distance_km"], 1734.27);
    assert_close(&routes[0]["distance_miles"], 1077.63);
    assert_eq!(routes[0]["duration_hours"], 2);
    assert_eq!(routes[0]["duration_minutes"], 40);
    assert_close(&routes[0]["total_cost"], 6416.8);
    assert_close(&routes[0]["fuel_cost"], 4335.68);
    assert_eq!(routes[0]["coordinates"], json!([[28.56, 77.10], [12.97, 77.59]]));
    assert_eq!(routes[1]["path"], "DEL → BOM → BLR");
    assert_eq!(routes[2]["path"], "DEL → LHR → BLR");

    assert_eq!(body["route"]["path"], "DEL → BLR");
    assert_eq!(body["route"]["timing"]["estimated_duration_hours"], 2);
    assert_eq!(body["route"]["timing"]["estimated_duration_minutes"], 40);
    assert_close(&body["route"]["timing"]["total_distance_km"], 1734.27);
    assert_close(&body["route"]["total_fuel_cost"], 4335.68);
    assert_eq!(body["optimization_results"]["method"], "QAOA");
    assert_close(&body["optimization_results"]["total_distance"], 1077.63);

    assert_eq!(body["qaoa_result"], json!({ "beta": 0.5, "gamma": 1.25 }));
    assert_eq!(advisor.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn optimize_passes_supplied_matrix() {
    let (app, _) = setup_app(false);
    let mut matrix = vec![vec![0.0; 8]; 8];
    matrix[0][0] = 0.25;
    let res = app
        .oneshot(post_json(
            "/optimize/",
            json!({ "origin": "DEL", "destination": "BOM", "qubo_matrix": matrix }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_close(&body["qaoa_result"]["beta"], 0.75);
}

#[tokio::test]
async fn misshapen_matrix_still_returns_routes() {
    let (app, advisor) = setup_app(false);
    let matrix = vec![vec![0.0; 8]; 7];
    let res = app
        .oneshot(post_json(
            "/optimize/",
            json!({ "origin": "DEL", "destination": "BLR", "qubo_matrix": matrix }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["all_routes"].as_array().unwrap().len(), 3);
    assert_eq!(body["route"]["path"], "DEL → BLR");
    assert_eq!(body["qaoa_result"], json!({ "error": "qubo_matrix must be 8x8" }));
    assert_eq!(advisor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn null_matrix_defaults_to_zeros() {
    let (app, advisor) = setup_app(false);
    let res = app
        .oneshot(post_json(
            "/v1/routes/optimize",
            json!({ "origin": "DEL", "destination": "BOM", "qubo_matrix": null }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["qaoa_result"], json!({ "beta": 0.5, "gamma": 1.25 }));
    assert_eq!(advisor.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn advisor_failure_still_returns_routes() {
    let (app, advisor) = setup_app(true);
    let res = app
        .oneshot(post_json(
            "/v1/routes/optimize",
            json!({ "origin": "DEL", "destination": "BLR" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["all_routes"].as_array().unwrap().len(), 3);
    assert!(body["qaoa_result"]["error"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
    assert_eq!(advisor.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn identical_endpoints_are_bad_request() {
    let (app, advisor) = setup_app(false);
    let res = app
        .oneshot(post_json(
            "/v1/routes/optimize",
            json!({ "origin": "DEL", "destination": "del" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().contains_key("x-request-id"));
    let body = read_json(res).await;
    assert_eq!(body["error"], "Invalid origin or destination");
    assert_eq!(body["all_routes"], json!([]));
    assert_eq!(advisor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_airport_is_bad_request() {
    let (app, _) = setup_app(false);
    let res = app
        .oneshot(post_json(
            "/v1/routes/optimize",
            json!({ "origin": "DEL", "destination": "ZZZ" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn single_airport_catalog_reports_no_route() {
    let state = Arc::new(AppState::with_advisor(
        Catalog::from_airports(vec![Airport::new("DEL", "Delhi", 28.56, 77.10)]),
        Config::default(),
        None,
    ));
    let res = api::app(state)
        .oneshot(post_json(
            "/v1/routes/optimize",
            json!({ "origin": "DEL", "destination": "BLR" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(res).await;
    assert_eq!(body["error"], "No route possible");
}

#[tokio::test]
async fn missing_advisor_is_reported_not_fatal() {
    let state = Arc::new(AppState::with_advisor(fixture_catalog(), Config::default(), None));
    let res = api::app(state)
        .oneshot(post_json(
            "/v1/routes/optimize",
            json!({ "origin": "BOM", "destination": "LHR" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["qaoa_result"]["error"], "angle advisor not configured");
}

#[tokio::test]
async fn airports_filter_by_country() {
    let (app, _) = setup_app(false);
    let res = app
        .oneshot(get("/v1/airports?country=united"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    let airports = body["airports"].as_array().unwrap();
    assert_eq!(airports.len(), 1);
    assert_eq!(airports[0]["code"], "LHR");
    assert_eq!(airports[0]["city"], "London");
}

#[tokio::test]
async fn airports_unfiltered_lists_everything() {
    let (app, _) = setup_app(false);
    let res = app.oneshot(get("/v1/airports")).await.unwrap();
    let body = read_json(res).await;
    assert_eq!(body["airports"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn find_airport_by_code() {
    let (app, _) = setup_app(false);
    let res = app.clone().oneshot(get("/v1/airports/find/bom")).await.unwrap();
    let body = read_json(res).await;
    assert_eq!(body["found"], true);
    assert_eq!(body["airport"]["name"], "Mumbai");

    let res = app.oneshot(get("/v1/airports/find/xyz")).await.unwrap();
    let body = read_json(res).await;
    assert_eq!(body["found"], false);
    assert_eq!(body["message"], "Airport with code 'XYZ' not found");
}

#[tokio::test]
async fn airport_stats_counts_catalog() {
    let (app, _) = setup_app(false);
    let res = app.oneshot(get("/v1/airports/stats")).await.unwrap();
    let body = read_json(res).await;
    assert_eq!(body["total_airports"], 4);
    assert_eq!(body["sample_codes"].as_array().unwrap().len(), 4);
    assert_eq!(body["sample_codes"][0]["code"], "DEL");
}
