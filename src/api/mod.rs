//! REST API for plant balance results and on-demand evaluation.
//!
//! Provides three endpoints:
//! - `GET /state` — scenario inputs and plant summary for the startup run
//! - `GET /stages` — flattened stage table of the startup run
//! - `POST /compute` — evaluate a caller-supplied input record

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::sim::engine::BalanceEngine;
use crate::sim::types::{SimulationInputs, SimulationOutputs};

/// Immutable application state shared across all request handlers.
///
/// Holds the startup scenario and its precomputed outputs plus the engine
/// itself for `POST /compute`; everything is read-only, so `Arc` suffices
/// without locks.
pub struct AppState {
    /// Engine bound to the scenario's constant set.
    pub engine: BalanceEngine,
    /// Inputs of the startup scenario.
    pub inputs: SimulationInputs,
    /// Outputs of the startup scenario.
    pub outputs: SimulationOutputs,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/stages", get(handlers::get_stages))
        .route("/compute", post(handlers::post_compute))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
