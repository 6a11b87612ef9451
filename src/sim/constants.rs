//! Engine-wide physical constants.
//!
//! Everything that would otherwise be a module-level magic number lives in
//! one immutable value bound at engine construction, so a scenario file can
//! override any constant and tests can run engines with different constant
//! sets side by side.

use serde::{Deserialize, Serialize};

/// Fixed physical constants of the balance engine.
///
/// Defaults are literature-standard values for air, wet biomass slurry, and
/// methane; steam-side enthalpy fits match the simplified water model the
/// cycle relations were calibrated against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConstants {
    /// Specific heat of air at constant pressure (kJ/kg·K).
    pub cp_air_kj_kg_k: f32,
    /// Heat capacity ratio of air.
    pub gamma_air: f32,
    /// Ambient temperature (K); compressor inlet state.
    pub ambient_temp_k: f32,
    /// Ambient temperature (°C); HTC sensible-heat reference.
    pub ambient_temp_c: f32,
    /// Ambient pressure (MPa); compressor inlet state.
    pub ambient_pressure_mpa: f32,
    /// Specific heat of the wet biomass slurry (kJ/kg·K).
    pub cp_slurry_kj_kg_k: f32,
    /// HTC reaction enthalpy per kg dry matter (MJ/kg; negative = exothermic).
    pub htc_reaction_heat_mj_kg: f32,
    /// Volumetric lower heating value of methane (MJ/m³).
    pub lhv_methane_mj_m3: f32,
    /// Specific volume of saturated liquid water (m³/kg); pump work model.
    pub water_specific_volume_m3_kg: f32,
}

impl Default for EngineConstants {
    fn default() -> Self {
        Self {
            cp_air_kj_kg_k: 1.005,
            gamma_air: 1.4,
            ambient_temp_k: 298.15,
            ambient_temp_c: 25.0,
            ambient_pressure_mpa: 0.1013,
            cp_slurry_kj_kg_k: 3.8,
            htc_reaction_heat_mj_kg: -1.0,
            lhv_methane_mj_m3: 35.8,
            water_specific_volume_m3_kg: 0.00101,
        }
    }
}

impl EngineConstants {
    /// Isentropic pressure-ratio exponent `(γ - 1) / γ`.
    pub fn pressure_exponent(&self) -> f32 {
        (self.gamma_air - 1.0) / self.gamma_air
    }

    /// Saturated condensate enthalpy h1 at the condenser pressure (kJ/kg).
    ///
    /// Three-band lookup matching the simplified water model.
    pub fn condensate_enthalpy_kj_kg(&self, condenser_pressure_mpa: f32) -> f32 {
        if condenser_pressure_mpa <= 0.01 {
            191.8
        } else if condenser_pressure_mpa <= 0.02 {
            251.4
        } else {
            300.0
        }
    }
}

/// Converts an energy rate in MJ/h to kW.
pub fn mj_per_h_to_kw(mj_per_h: f32) -> f32 {
    mj_per_h * (1000.0 / 3600.0)
}
