//! Core engine types: the input record, input errors, and stage results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Complete set of physical parameters for one balance evaluation.
///
/// Immutable by convention: the engine takes a shared reference and a fresh
/// record is built per evaluation, so results from different runs never
/// share state. Every field carries a fixed unit and an enumerated valid
/// range checked by [`SimulationInputs::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationInputs {
    /// Wet biomass feed rate (kg/h, 0 to 3.6e6; zero models the idle plant).
    pub feed_rate_kg_h: f32,
    /// Feed moisture content as a mass fraction (0.0 to 1.0).
    pub moisture_fraction: f32,
    /// Volatile-solids fraction of the dry matter (0.0 to 1.0).
    pub vs_fraction: f32,
    /// Lower heating value of the dry matter (MJ/kg, dry basis).
    pub lhv_dry_mj_kg: f32,
    /// HTC reactor temperature (°C).
    pub htc_temperature_c: f32,
    /// Hydrochar mass yield on dry matter (0.0 to 1.0).
    pub hydrochar_yield: f32,
    /// Fraction of feed chemical energy retained in the hydrochar (0.0 to 1.0).
    pub htc_energy_recovery: f32,
    /// Volatile-solids destruction fraction in the digester (0.0 to 1.0).
    pub vs_destruction_fraction: f32,
    /// Methane yield per kg of volatile solids destroyed (m³/kg).
    pub methane_yield_m3_kg: f32,
    /// Methane volume fraction of the biogas (0.0 to 1.0).
    pub methane_fraction: f32,
    /// Boiler (steam drum) pressure (MPa).
    pub boiler_pressure_mpa: f32,
    /// Boiler outlet (live steam) temperature (°C).
    pub boiler_temperature_c: f32,
    /// Condenser pressure (MPa, strictly below the boiler pressure).
    pub condenser_pressure_mpa: f32,
    /// Steam turbine isentropic efficiency (0.5 to 1.0).
    pub steam_turbine_efficiency: f32,
    /// Compressor pressure ratio of the gas cycle.
    pub pressure_ratio: f32,
    /// Compressor isentropic efficiency (0.5 to 1.0).
    pub compressor_efficiency: f32,
    /// Gas turbine isentropic efficiency (0.5 to 1.0).
    pub gas_turbine_efficiency: f32,
    /// Gas turbine inlet temperature (K).
    pub turbine_inlet_temp_k: f32,
    /// HRSG heat-recovery effectiveness (0.0 to 1.0).
    pub hrsg_effectiveness: f32,
}

impl Default for SimulationInputs {
    /// Baseline plant parameters.
    fn default() -> Self {
        Self {
            feed_rate_kg_h: 36_000.0,
            moisture_fraction: 0.25,
            vs_fraction: 0.8,
            lhv_dry_mj_kg: 18.0,
            htc_temperature_c: 220.0,
            hydrochar_yield: 0.55,
            htc_energy_recovery: 0.75,
            vs_destruction_fraction: 0.5,
            methane_yield_m3_kg: 0.35,
            methane_fraction: 0.6,
            boiler_pressure_mpa: 8.0,
            boiler_temperature_c: 500.0,
            condenser_pressure_mpa: 0.01,
            steam_turbine_efficiency: 0.85,
            pressure_ratio: 8.0,
            compressor_efficiency: 0.88,
            gas_turbine_efficiency: 0.85,
            turbine_inlet_temp_k: 1200.0,
            hrsg_effectiveness: 0.8,
        }
    }
}

impl SimulationInputs {
    /// Field name, value, and valid range for every parameter.
    ///
    /// Within these ranges the closed-form cycle relations keep every
    /// reported efficiency in [0, 1].
    fn ranged_fields(&self) -> [(&'static str, f32, f32, f32); 19] {
        [
            ("feed_rate_kg_h", self.feed_rate_kg_h, 0.0, 3_600_000.0),
            ("moisture_fraction", self.moisture_fraction, 0.0, 1.0),
            ("vs_fraction", self.vs_fraction, 0.0, 1.0),
            ("lhv_dry_mj_kg", self.lhv_dry_mj_kg, 5.0, 30.0),
            ("htc_temperature_c", self.htc_temperature_c, 100.0, 350.0),
            ("hydrochar_yield", self.hydrochar_yield, 0.0, 1.0),
            ("htc_energy_recovery", self.htc_energy_recovery, 0.0, 1.0),
            (
                "vs_destruction_fraction",
                self.vs_destruction_fraction,
                0.0,
                1.0,
            ),
            ("methane_yield_m3_kg", self.methane_yield_m3_kg, 0.0, 1.0),
            ("methane_fraction", self.methane_fraction, 0.0, 1.0),
            ("boiler_pressure_mpa", self.boiler_pressure_mpa, 0.1, 30.0),
            (
                "boiler_temperature_c",
                self.boiler_temperature_c,
                200.0,
                700.0,
            ),
            (
                "condenser_pressure_mpa",
                self.condenser_pressure_mpa,
                0.001,
                1.0,
            ),
            (
                "steam_turbine_efficiency",
                self.steam_turbine_efficiency,
                0.5,
                1.0,
            ),
            ("pressure_ratio", self.pressure_ratio, 2.0, 20.0),
            (
                "compressor_efficiency",
                self.compressor_efficiency,
                0.5,
                1.0,
            ),
            (
                "gas_turbine_efficiency",
                self.gas_turbine_efficiency,
                0.5,
                1.0,
            ),
            (
                "turbine_inlet_temp_k",
                self.turbine_inlet_temp_k,
                800.0,
                2000.0,
            ),
            ("hrsg_effectiveness", self.hrsg_effectiveness, 0.0, 1.0),
        ]
    }

    /// Validates every field against its range and returns all violations.
    ///
    /// Returns an empty vector when the record is valid. Front ends report
    /// all violations at once; the engine rejects on the first. Besides the
    /// per-field ranges there is one cross-field constraint: the condenser
    /// must sit strictly below the boiler pressure, otherwise the feed pump
    /// would report negative work.
    pub fn validate(&self) -> Vec<InputError> {
        let mut errors = Vec::new();
        for (field, value, min, max) in self.ranged_fields() {
            if !value.is_finite() {
                errors.push(InputError {
                    field: field.to_string(),
                    message: "must be a finite number".to_string(),
                });
            } else if value < min || value > max {
                errors.push(InputError {
                    field: field.to_string(),
                    message: format!("must be in [{min}, {max}], got {value}"),
                });
            }
        }
        // The per-field pressure ranges overlap
        if self.condenser_pressure_mpa.is_finite()
            && self.boiler_pressure_mpa.is_finite()
            && self.condenser_pressure_mpa >= self.boiler_pressure_mpa
        {
            errors.push(InputError {
                field: "condenser_pressure_mpa".to_string(),
                message: format!(
                    "must be below boiler_pressure_mpa ({}), got {}",
                    self.boiler_pressure_mpa, self.condenser_pressure_mpa
                ),
            });
        }
        errors
    }

    /// Returns `Ok(())` when valid, or the first violation.
    pub fn check(&self) -> Result<(), InputError> {
        match self.validate().into_iter().next() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// An input field outside its valid range, named for the caller.
///
/// Raised before any pipeline stage executes; no partial output accompanies
/// it.
#[derive(Debug, Clone, Serialize)]
pub struct InputError {
    /// Name of the offending `SimulationInputs` field.
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid input: {} — {}", self.field, self.message)
    }
}

impl std::error::Error for InputError {}

/// Stage 1 — feed characterization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedBreakdown {
    /// Dry matter flow (kg/h).
    pub dry_matter_kg_h: f32,
    /// Moisture flow (kg/h).
    pub moisture_kg_h: f32,
    /// Volatile-solids flow (kg/h).
    pub volatile_solids_kg_h: f32,
    /// Chemical energy rate of the dry feed (kW).
    pub chemical_energy_kw: f32,
}

/// Stage 2 — hydrothermal carbonization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtcResult {
    /// Hydrochar mass flow (kg/h).
    pub hydrochar_kg_h: f32,
    /// Hydrochar higher heating value (MJ/kg).
    pub hydrochar_hhv_mj_kg: f32,
    /// Chemical energy rate of the hydrochar (kW).
    pub hydrochar_energy_kw: f32,
    /// Net reactor heat demand after reaction heat credit (kW, >= 0).
    pub heat_demand_kw: f32,
}

/// Stage 3 — anaerobic digestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigesterResult {
    /// Volatile solids destroyed (kg/h).
    pub vs_destroyed_kg_h: f32,
    /// Methane production (m³/h).
    pub methane_m3_h: f32,
    /// Total biogas production (m³/h, always >= the methane volume).
    pub biogas_m3_h: f32,
    /// Chemical energy rate of the biogas (kW).
    pub biogas_energy_kw: f32,
}

/// Stage 4 — combustion heat release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombustionResult {
    /// Gross heat release from hydrochar and biogas (kW).
    pub gross_heat_kw: f32,
    /// Parasitic heat demand of the HTC reactor (kW).
    pub parasitic_heat_kw: f32,
    /// Net thermal input to the power cycle (kW, >= 0).
    pub net_heat_kw: f32,
}

/// Stage 5 — gas (Brayton) cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BraytonResult {
    /// Compressor outlet temperature (K).
    pub compressor_outlet_k: f32,
    /// Turbine outlet temperature (K).
    pub turbine_outlet_k: f32,
    /// Working-fluid mass flow (kg/s).
    pub gas_flow_kg_s: f32,
    /// Compressor work (kW).
    pub compressor_work_kw: f32,
    /// Turbine work (kW).
    pub turbine_work_kw: f32,
    /// Net shaft work (kW, >= 0).
    pub net_work_kw: f32,
    /// Exhaust heat available to the HRSG (kW).
    pub exhaust_heat_kw: f32,
    /// Cycle first-law efficiency (0.0 to 1.0).
    pub efficiency: f32,
}

/// Stage 6 — steam (Rankine) cycle fed by the HRSG.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankineResult {
    /// Saturated condensate enthalpy h1 (kJ/kg).
    pub condensate_enthalpy_kj_kg: f32,
    /// Feedwater enthalpy after the pump h2 (kJ/kg).
    pub feedwater_enthalpy_kj_kg: f32,
    /// Live steam enthalpy h3 (kJ/kg).
    pub steam_enthalpy_kj_kg: f32,
    /// Turbine exhaust enthalpy h4 (kJ/kg).
    pub exhaust_enthalpy_kj_kg: f32,
    /// Steam mass flow (kg/s).
    pub steam_flow_kg_s: f32,
    /// Heat recovered by the HRSG (kW).
    pub heat_recovered_kw: f32,
    /// Turbine work (kW).
    pub turbine_work_kw: f32,
    /// Feed pump work (kW).
    pub pump_work_kw: f32,
    /// Net cycle work (kW, >= 0).
    pub net_work_kw: f32,
    /// Cycle first-law efficiency (0.0 to 1.0).
    pub efficiency: f32,
}

/// Stage 7 — plant-level aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantSummary {
    /// Gas-cycle electrical output (kW).
    pub gas_power_kw: f32,
    /// Steam-cycle electrical output (kW).
    pub steam_power_kw: f32,
    /// Net plant electrical output (kW).
    pub net_power_kw: f32,
    /// Gross chemical energy input from both fuels (kW).
    pub fuel_energy_kw: f32,
    /// Overall first-law efficiency (0.0 to 1.0; 0 when no fuel energy).
    pub overall_efficiency: f32,
}

/// One named scalar from the ordered result set, for tables and CSV rows.
#[derive(Debug, Clone, Serialize)]
pub struct StageValue {
    /// Pipeline stage the value belongs to.
    pub stage: &'static str,
    /// Scalar name.
    pub name: &'static str,
    /// Value in the unit below.
    pub value: f32,
    /// Fixed unit label.
    pub unit: &'static str,
}

/// Complete result of one pipeline evaluation.
///
/// Constructed once at the end of a run and immutable thereafter. Holds
/// every intermediate stage record plus the plant summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutputs {
    /// Feed characterization.
    pub feed: FeedBreakdown,
    /// HTC stage.
    pub htc: HtcResult,
    /// AD stage.
    pub digester: DigesterResult,
    /// Combustion heat release.
    pub combustion: CombustionResult,
    /// Gas cycle.
    pub brayton: BraytonResult,
    /// Steam cycle.
    pub rankine: RankineResult,
    /// Plant summary.
    pub summary: PlantSummary,
}

impl SimulationOutputs {
    /// Flattens the run into the ordered named-scalar collection.
    ///
    /// Order follows the pipeline: feed, HTC, AD, combustion, gas cycle,
    /// steam cycle, summary.
    pub fn stage_values(&self) -> Vec<StageValue> {
        let v = |stage, name, value, unit| StageValue {
            stage,
            name,
            value,
            unit,
        };
        vec![
            v("feed", "dry_matter", self.feed.dry_matter_kg_h, "kg/h"),
            v("feed", "moisture", self.feed.moisture_kg_h, "kg/h"),
            v(
                "feed",
                "volatile_solids",
                self.feed.volatile_solids_kg_h,
                "kg/h",
            ),
            v("feed", "chemical_energy", self.feed.chemical_energy_kw, "kW"),
            v("htc", "hydrochar", self.htc.hydrochar_kg_h, "kg/h"),
            v("htc", "hydrochar_hhv", self.htc.hydrochar_hhv_mj_kg, "MJ/kg"),
            v("htc", "hydrochar_energy", self.htc.hydrochar_energy_kw, "kW"),
            v("htc", "heat_demand", self.htc.heat_demand_kw, "kW"),
            v(
                "digester",
                "vs_destroyed",
                self.digester.vs_destroyed_kg_h,
                "kg/h",
            ),
            v("digester", "methane", self.digester.methane_m3_h, "m3/h"),
            v("digester", "biogas", self.digester.biogas_m3_h, "m3/h"),
            v(
                "digester",
                "biogas_energy",
                self.digester.biogas_energy_kw,
                "kW",
            ),
            v(
                "combustion",
                "gross_heat",
                self.combustion.gross_heat_kw,
                "kW",
            ),
            v(
                "combustion",
                "parasitic_heat",
                self.combustion.parasitic_heat_kw,
                "kW",
            ),
            v("combustion", "net_heat", self.combustion.net_heat_kw, "kW"),
            v(
                "brayton",
                "compressor_outlet_temp",
                self.brayton.compressor_outlet_k,
                "K",
            ),
            v(
                "brayton",
                "turbine_outlet_temp",
                self.brayton.turbine_outlet_k,
                "K",
            ),
            v("brayton", "gas_flow", self.brayton.gas_flow_kg_s, "kg/s"),
            v(
                "brayton",
                "compressor_work",
                self.brayton.compressor_work_kw,
                "kW",
            ),
            v("brayton", "turbine_work", self.brayton.turbine_work_kw, "kW"),
            v("brayton", "net_work", self.brayton.net_work_kw, "kW"),
            v("brayton", "exhaust_heat", self.brayton.exhaust_heat_kw, "kW"),
            v("brayton", "efficiency", self.brayton.efficiency, "-"),
            v(
                "rankine",
                "steam_enthalpy",
                self.rankine.steam_enthalpy_kj_kg,
                "kJ/kg",
            ),
            v("rankine", "steam_flow", self.rankine.steam_flow_kg_s, "kg/s"),
            v(
                "rankine",
                "heat_recovered",
                self.rankine.heat_recovered_kw,
                "kW",
            ),
            v("rankine", "turbine_work", self.rankine.turbine_work_kw, "kW"),
            v("rankine", "pump_work", self.rankine.pump_work_kw, "kW"),
            v("rankine", "net_work", self.rankine.net_work_kw, "kW"),
            v("rankine", "efficiency", self.rankine.efficiency, "-"),
            v("summary", "gas_power", self.summary.gas_power_kw, "kW"),
            v("summary", "steam_power", self.summary.steam_power_kw, "kW"),
            v("summary", "net_power", self.summary.net_power_kw, "kW"),
            v("summary", "fuel_energy", self.summary.fuel_energy_kw, "kW"),
            v(
                "summary",
                "overall_efficiency",
                self.summary.overall_efficiency,
                "-",
            ),
        ]
    }
}

impl fmt::Display for SimulationOutputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Plant Balance Report ---")?;
        writeln!(
            f,
            "Feed:       dry {:.1} kg/h  moisture {:.1} kg/h  VS {:.1} kg/h  energy {:.1} kW",
            self.feed.dry_matter_kg_h,
            self.feed.moisture_kg_h,
            self.feed.volatile_solids_kg_h,
            self.feed.chemical_energy_kw,
        )?;
        writeln!(
            f,
            "HTC:        char {:.1} kg/h @ {:.2} MJ/kg  energy {:.1} kW  heat demand {:.1} kW",
            self.htc.hydrochar_kg_h,
            self.htc.hydrochar_hhv_mj_kg,
            self.htc.hydrochar_energy_kw,
            self.htc.heat_demand_kw,
        )?;
        writeln!(
            f,
            "Digester:   CH4 {:.1} m3/h  biogas {:.1} m3/h  energy {:.1} kW",
            self.digester.methane_m3_h, self.digester.biogas_m3_h, self.digester.biogas_energy_kw,
        )?;
        writeln!(
            f,
            "Combustion: gross {:.1} kW  parasitic {:.1} kW  net {:.1} kW",
            self.combustion.gross_heat_kw,
            self.combustion.parasitic_heat_kw,
            self.combustion.net_heat_kw,
        )?;
        writeln!(
            f,
            "Gas cycle:  work {:.1} kW  exhaust {:.1} kW  eta {:.1}%",
            self.brayton.net_work_kw,
            self.brayton.exhaust_heat_kw,
            self.brayton.efficiency * 100.0,
        )?;
        writeln!(
            f,
            "Steam cycle: work {:.1} kW  recovered {:.1} kW  eta {:.1}%",
            self.rankine.net_work_kw,
            self.rankine.heat_recovered_kw,
            self.rankine.efficiency * 100.0,
        )?;
        write!(
            f,
            "Plant:      net {:.1} kW  fuel {:.1} kW  overall eta {:.2}%",
            self.summary.net_power_kw,
            self.summary.fuel_energy_kw,
            self.summary.overall_efficiency * 100.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inputs_are_valid() {
        let inputs = SimulationInputs::default();
        let errors = inputs.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
        assert!(inputs.check().is_ok());
    }

    #[test]
    fn moisture_out_of_range_names_field() {
        let inputs = SimulationInputs {
            moisture_fraction: 1.5,
            ..SimulationInputs::default()
        };
        let errors = inputs.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "moisture_fraction");
        let err = inputs.check().unwrap_err();
        assert_eq!(err.field, "moisture_fraction");
    }

    #[test]
    fn negative_feed_rejected() {
        let inputs = SimulationInputs {
            feed_rate_kg_h: -1.0,
            ..SimulationInputs::default()
        };
        let errors = inputs.validate();
        assert!(errors.iter().any(|e| e.field == "feed_rate_kg_h"));
    }

    #[test]
    fn zero_feed_is_valid() {
        let inputs = SimulationInputs {
            feed_rate_kg_h: 0.0,
            ..SimulationInputs::default()
        };
        assert!(inputs.validate().is_empty());
    }

    #[test]
    fn feed_rate_bounded_above() {
        let at_max = SimulationInputs {
            feed_rate_kg_h: 3_600_000.0,
            ..SimulationInputs::default()
        };
        assert!(at_max.validate().is_empty());

        let huge = SimulationInputs {
            feed_rate_kg_h: 1e38,
            ..SimulationInputs::default()
        };
        let errors = huge.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "feed_rate_kg_h");
    }

    #[test]
    fn condenser_above_boiler_rejected() {
        // Both pressures are inside their own ranges; the pair is not
        let inputs = SimulationInputs {
            boiler_pressure_mpa: 0.1,
            condenser_pressure_mpa: 1.0,
            ..SimulationInputs::default()
        };
        let errors = inputs.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "condenser_pressure_mpa");
        assert!(errors[0].message.contains("boiler_pressure_mpa"));
    }

    #[test]
    fn condenser_equal_to_boiler_rejected() {
        let inputs = SimulationInputs {
            boiler_pressure_mpa: 0.5,
            condenser_pressure_mpa: 0.5,
            ..SimulationInputs::default()
        };
        let err = inputs.check().unwrap_err();
        assert_eq!(err.field, "condenser_pressure_mpa");
    }

    #[test]
    fn nan_rejected_with_field_name() {
        let inputs = SimulationInputs {
            pressure_ratio: f32::NAN,
            ..SimulationInputs::default()
        };
        let errors = inputs.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "pressure_ratio");
        assert!(errors[0].message.contains("finite"));
    }

    #[test]
    fn multiple_violations_all_reported() {
        let inputs = SimulationInputs {
            moisture_fraction: -0.1,
            pressure_ratio: 50.0,
            hrsg_effectiveness: 2.0,
            ..SimulationInputs::default()
        };
        let errors = inputs.validate();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn input_error_display_names_field() {
        let e = InputError {
            field: "moisture_fraction".to_string(),
            message: "must be in [0, 1], got 1.5".to_string(),
        };
        let s = format!("{e}");
        assert!(s.contains("moisture_fraction"));
        assert!(s.starts_with("invalid input"));
    }
}
