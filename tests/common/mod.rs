//! Shared test fixtures for integration tests.

use nexus_sim::config::PlantConfig;
use nexus_sim::sim::engine::BalanceEngine;
use nexus_sim::sim::types::SimulationInputs;

/// Baseline scenario engine (stock constant set).
pub fn baseline_engine() -> BalanceEngine {
    BalanceEngine::new(PlantConfig::baseline().engine_constants())
}

/// Baseline scenario inputs (stock plant parameters).
pub fn baseline_inputs() -> SimulationInputs {
    PlantConfig::baseline().inputs()
}

/// Wet-feed worked example: 1000 kg/h at 60% moisture, everything else stock.
pub fn wet_feed_inputs() -> SimulationInputs {
    PlantConfig::wet_feed().inputs()
}
