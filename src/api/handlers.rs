//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, StateResponse};
use crate::sim::types::{SimulationInputs, StageValue};

/// Returns the startup scenario inputs and plant summary.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    Json(StateResponse {
        inputs: state.inputs.clone(),
        summary: state.outputs.summary.clone(),
    })
}

/// Returns the flattened stage table of the startup run.
///
/// `GET /stages` → 200 + `Vec<StageValue>` JSON
pub async fn get_stages(State(state): State<Arc<AppState>>) -> Json<Vec<StageValue>> {
    Json(state.outputs.stage_values())
}

/// Evaluates a caller-supplied input record through the engine.
///
/// `POST /compute` + `SimulationInputs` JSON → 200 + `SimulationOutputs` JSON
/// Invalid inputs → 400 + `ErrorResponse` naming the offending field
pub async fn post_compute(
    State(state): State<Arc<AppState>>,
    Json(inputs): Json<SimulationInputs>,
) -> impl IntoResponse {
    match state.engine.compute(&inputs) {
        Ok(outputs) => Ok(Json(outputs)),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                field: e.field,
                error: e.message,
            }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::sim::engine::BalanceEngine;

    fn make_test_state() -> Arc<AppState> {
        let engine = BalanceEngine::default();
        let inputs = SimulationInputs::default();
        let outputs = engine.compute(&inputs).unwrap();
        Arc::new(AppState {
            engine,
            inputs,
            outputs,
        })
    }

    #[tokio::test]
    async fn state_returns_200() {
        let state = make_test_state();
        let app = router(state);

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
        assert!(json.get("inputs").is_some());
        assert!(json.get("summary").is_some());
        assert_eq!(json["inputs"]["feed_rate_kg_h"], 36000.0);
    }

    #[tokio::test]
    async fn stages_returns_full_table() {
        let state = make_test_state();
        let expected = state.outputs.stage_values().len();
        let app = router(state);

        let req = Request::builder()
            .uri("/stages")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), expected);
        assert_eq!(json[0]["stage"], "feed");
        assert_eq!(json[0]["name"], "dry_matter");
    }

    #[tokio::test]
    async fn compute_evaluates_posted_inputs() {
        let state = make_test_state();
        let app = router(state);

        let inputs = SimulationInputs {
            feed_rate_kg_h: 1000.0,
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
        let net = json["summary"]["net_power_kw"].as_f64().unwrap();
        assert!((net - 1003.2).abs() < 3.0);
    }

    #[tokio::test]
    async fn compute_invalid_inputs_returns_400_with_field() {
        let state = make_test_state();
        let app = router(state);

        let inputs = SimulationInputs {
            moisture_fraction: 1.5,
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
        assert_eq!(json["field"], "moisture_fraction");
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn compute_rejects_unknown_fields() {
        let state = make_test_state();
        let app = router(state);

        let mut body = serde_json::to_value(SimulationInputs::default()).unwrap();
        body["bogus"] = serde_json::json!(1.0);
        let req = Request::builder()
            .method("POST")
            .uri("/compute")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        // Unknown fields fail JSON deserialization before the engine runs
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
