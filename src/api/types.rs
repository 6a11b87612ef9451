//! API response types.

use serde::Serialize;

use crate::sim::types::{PlantSummary, SimulationInputs};

/// Combined state response: scenario inputs and plant summary.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    /// Inputs of the startup scenario.
    pub inputs: SimulationInputs,
    /// Plant summary of the startup scenario.
    pub summary: PlantSummary,
}

/// Error response body for 400-class errors.
///
/// `field` carries the offending input field name so clients can highlight
/// the control that caused the rejection.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Offending input field.
    pub field: String,
    /// Human-readable error message.
    pub error: String,
}
