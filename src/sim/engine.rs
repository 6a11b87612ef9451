//! Balance engine orchestrating the pipeline stages in dependency order.

use super::constants::EngineConstants;
use super::types::{InputError, PlantSummary, SimulationInputs, SimulationOutputs};
use super::{brayton, combustion, digester, feed, htc, rankine};

/// Steady-state process balance engine.
///
/// Stateless apart from the immutable constant set bound at construction:
/// every call to [`BalanceEngine::compute`] validates a fresh input record,
/// evaluates the stage chain once, and returns a fresh output value.
/// Identical inputs produce bit-identical outputs, and concurrent callers
/// can share one engine freely.
#[derive(Debug, Clone, Default)]
pub struct BalanceEngine {
    constants: EngineConstants,
}

impl BalanceEngine {
    /// Creates an engine with the given constant set.
    pub fn new(constants: EngineConstants) -> Self {
        Self { constants }
    }

    /// Returns the engine's constant set.
    pub fn constants(&self) -> &EngineConstants {
        &self.constants
    }

    /// Validates the inputs and evaluates the full pipeline.
    ///
    /// Stages run in strict dependency order: feed characterization, HTC,
    /// AD, combustion, gas cycle, steam cycle, aggregation. Zero precursors
    /// propagate zeros; no stage divides by a zero denominator.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] if any field violates its range; no
    /// partial output is produced.
    pub fn compute(&self, inputs: &SimulationInputs) -> Result<SimulationOutputs, InputError> {
        inputs.check()?;
        let c = &self.constants;

        let feed = feed::characterize(
            inputs.feed_rate_kg_h,
            inputs.moisture_fraction,
            inputs.vs_fraction,
            inputs.lhv_dry_mj_kg,
        );

        let htc = htc::carbonize(
            c,
            &feed,
            inputs.feed_rate_kg_h,
            inputs.htc_temperature_c,
            inputs.hydrochar_yield,
            inputs.htc_energy_recovery,
        );

        let digester = digester::digest(
            c,
            feed.volatile_solids_kg_h,
            inputs.vs_destruction_fraction,
            inputs.methane_yield_m3_kg,
            inputs.methane_fraction,
        );

        let combustion = combustion::heat_release(
            htc.hydrochar_energy_kw,
            digester.biogas_energy_kw,
            htc.heat_demand_kw,
        );

        let brayton = brayton::expand(
            c,
            combustion.net_heat_kw,
            inputs.pressure_ratio,
            inputs.compressor_efficiency,
            inputs.gas_turbine_efficiency,
            inputs.turbine_inlet_temp_k,
        );

        let rankine = rankine::recover(
            c,
            brayton.exhaust_heat_kw,
            inputs.hrsg_effectiveness,
            inputs.boiler_pressure_mpa,
            inputs.boiler_temperature_c,
            inputs.condenser_pressure_mpa,
            inputs.steam_turbine_efficiency,
        );

        let gas_power_kw = brayton.net_work_kw;
        let steam_power_kw = rankine.net_work_kw;
        let net_power_kw = gas_power_kw + steam_power_kw;
        let fuel_energy_kw = combustion.gross_heat_kw;
        let overall_efficiency = if fuel_energy_kw > 0.0 {
            net_power_kw / fuel_energy_kw
        } else {
            0.0
        };

        Ok(SimulationOutputs {
            feed,
            htc,
            digester,
            combustion,
            brayton,
            rankine,
            summary: PlantSummary {
                gas_power_kw,
                steam_power_kw,
                net_power_kw,
                fuel_energy_kw,
                overall_efficiency,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The worked wet-feed scenario: 1000 kg/h at 60% moisture.
    fn wet_feed_inputs() -> SimulationInputs {
        SimulationInputs {
            feed_rate_kg_h: 1000.0,
            moisture_fraction: 0.6,
            ..SimulationInputs::default()
        }
    }

    #[test]
    fn wet_feed_scenario_end_to_end() {
        let engine = BalanceEngine::default();
        let out = engine.compute(&wet_feed_inputs()).unwrap();

        assert!((out.feed.dry_matter_kg_h - 400.0).abs() < 1e-3);
        assert!((out.htc.hydrochar_kg_h - 220.0).abs() < 1e-3);
        assert!(out.htc.hydrochar_kg_h < out.feed.dry_matter_kg_h);
        assert!(out.digester.methane_m3_h > 0.0);
        assert!(out.summary.overall_efficiency > 0.0);
        assert!(out.summary.overall_efficiency < 1.0);
    }

    #[test]
    fn wet_feed_scenario_reference_numbers() {
        let engine = BalanceEngine::default();
        let out = engine.compute(&wet_feed_inputs()).unwrap();

        assert!((out.combustion.net_heat_kw - 1962.2).abs() < 1.0);
        assert!((out.summary.gas_power_kw - 569.6).abs() < 2.0);
        assert!((out.summary.steam_power_kw - 433.6).abs() < 2.0);
        assert!((out.summary.net_power_kw - 1003.2).abs() < 3.0);
        assert!((out.summary.overall_efficiency - 0.488).abs() < 0.005);
    }

    #[test]
    fn invalid_input_rejected_before_any_stage() {
        let engine = BalanceEngine::default();
        let inputs = SimulationInputs {
            moisture_fraction: 1.5,
            ..SimulationInputs::default()
        };
        let err = engine.compute(&inputs).unwrap_err();
        assert_eq!(err.field, "moisture_fraction");
    }

    #[test]
    fn condenser_above_boiler_rejected_before_any_stage() {
        // An unchecked pair like this would drive the feed pump work negative
        let engine = BalanceEngine::default();
        let inputs = SimulationInputs {
            boiler_pressure_mpa: 0.1,
            condenser_pressure_mpa: 1.0,
            ..SimulationInputs::default()
        };
        let err = engine.compute(&inputs).unwrap_err();
        assert_eq!(err.field, "condenser_pressure_mpa");
    }

    #[test]
    fn zero_feed_zeroes_the_plant() {
        let engine = BalanceEngine::default();
        let inputs = SimulationInputs {
            feed_rate_kg_h: 0.0,
            ..SimulationInputs::default()
        };
        let out = engine.compute(&inputs).unwrap();
        assert_eq!(out.feed.dry_matter_kg_h, 0.0);
        assert_eq!(out.htc.hydrochar_energy_kw, 0.0);
        assert_eq!(out.digester.biogas_energy_kw, 0.0);
        assert_eq!(out.combustion.net_heat_kw, 0.0);
        assert_eq!(out.summary.net_power_kw, 0.0);
        assert_eq!(out.summary.overall_efficiency, 0.0);
    }

    #[test]
    fn deterministic_across_calls() {
        let engine = BalanceEngine::default();
        let inputs = SimulationInputs::default();
        let a = engine.compute(&inputs).unwrap();
        let b = engine.compute(&inputs).unwrap();
        for (x, y) in a.stage_values().iter().zip(b.stage_values().iter()) {
            assert_eq!(x.value.to_bits(), y.value.to_bits(), "{}.{}", x.stage, x.name);
        }
    }

    #[test]
    fn net_power_monotone_in_methane_yield() {
        let engine = BalanceEngine::default();
        let base = wet_feed_inputs();
        let mut prev_energy = -1.0_f32;
        let mut prev_power = -1.0_f32;
        for yield_m3 in [0.1, 0.2, 0.35, 0.5] {
            let inputs = SimulationInputs {
                methane_yield_m3_kg: yield_m3,
                ..base.clone()
            };
            let out = engine.compute(&inputs).unwrap();
            assert!(out.digester.biogas_energy_kw >= prev_energy);
            assert!(out.summary.net_power_kw >= prev_power);
            prev_energy = out.digester.biogas_energy_kw;
            prev_power = out.summary.net_power_kw;
        }
    }

    #[test]
    fn custom_constants_flow_through() {
        let constants = EngineConstants {
            lhv_methane_mj_m3: 50.0,
            ..EngineConstants::default()
        };
        let engine = BalanceEngine::new(constants);
        let stock = BalanceEngine::default();
        let inputs = wet_feed_inputs();
        let rich = engine.compute(&inputs).unwrap();
        let base = stock.compute(&inputs).unwrap();
        assert!(rich.digester.biogas_energy_kw > base.digester.biogas_energy_kw);
    }
}
