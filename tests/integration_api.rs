//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use nexus_sim::api::{AppState, router};
use nexus_sim::config::PlantConfig;
use nexus_sim::sim::engine::BalanceEngine;
use nexus_sim::sim::types::SimulationInputs;

/// Run the wet-feed scenario and return the API state.
fn build_api_state() -> Arc<AppState> {
    let config = PlantConfig::wet_feed();
    let engine = BalanceEngine::new(config.engine_constants());
    let inputs = config.inputs();
    let outputs = engine.compute(&inputs).unwrap();
    Arc::new(AppState {
        engine,
        inputs,
        outputs,
    })
}

#[tokio::test]
async fn state_exposes_scenario_and_summary() {
    let app = router(build_api_state());

    let req = Request::builder()
        .uri("/state")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["inputs"]["feed_rate_kg_h"], 1000.0);
    assert_eq!(json["inputs"]["moisture_fraction"], 0.6);
    let net = json["summary"]["net_power_kw"].as_f64().unwrap();
    assert!((net - 1003.2).abs() < 3.0);
}

#[tokio::test]
async fn stages_table_is_ordered_by_pipeline() {
    let app = router(build_api_state());

    let req = Request::builder()
        .uri("/stages")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let rows: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(rows[0]["stage"], "feed");
    assert_eq!(rows.last().unwrap()["stage"], "summary");

    // Stage blocks appear in dependency order
    let stages: Vec<&str> = rows.iter().filter_map(|r| r["stage"].as_str()).collect();
    let first = |name: &str| stages.iter().position(|s| *s == name).unwrap();
    assert!(first("feed") < first("htc"));
    assert!(first("htc") < first("digester"));
    assert!(first("digester") < first("combustion"));
    assert!(first("combustion") < first("brayton"));
    assert!(first("brayton") < first("rankine"));
    assert!(first("rankine") < first("summary"));
}

#[tokio::test]
async fn compute_round_trips_new_inputs() {
    let app = router(build_api_state());

    let inputs = SimulationInputs {
        feed_rate_kg_h: 2000.0,
        moisture_fraction: 0.6,
        ..SimulationInputs::default()
    };
    let req = Request::builder()
        .method("POST")
        .uri("/compute")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&inputs).unwrap()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    // Twice the wet-feed rate doubles the plant
    let net = json["summary"]["net_power_kw"].as_f64().unwrap();
    assert!((net - 2.0 * 1003.2).abs() < 6.0);
}

#[tokio::test]
async fn compute_rejects_out_of_range_field() {
    let app = router(build_api_state());

    let inputs = SimulationInputs {
        pressure_ratio: 50.0,
        ..SimulationInputs::default()
    };
    let req = Request::builder()
        .method("POST")
        .uri("/compute")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&inputs).unwrap()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["field"], "pressure_ratio");
}
