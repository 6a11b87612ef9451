//! TOML-based plant scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::sim::constants::EngineConstants;
use crate::sim::types::SimulationInputs;

/// Top-level plant scenario parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from TOML
/// with [`PlantConfig::from_toml_file`] or use [`PlantConfig::baseline`]
/// for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlantConfig {
    /// Biomass feedstock parameters.
    pub feedstock: FeedstockConfig,
    /// Hydrothermal carbonization parameters.
    pub htc: HtcConfig,
    /// Anaerobic digester parameters.
    pub digester: DigesterConfig,
    /// Rankine steam cycle parameters.
    pub steam_cycle: SteamCycleConfig,
    /// Brayton gas cycle parameters.
    pub gas_cycle: GasCycleConfig,
    /// HRSG heat-recovery parameters.
    pub recovery: RecoveryConfig,
    /// Physical-constant overrides for the engine.
    pub constants: EngineConstants,
}

/// Biomass feedstock parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedstockConfig {
    /// Wet feed rate (kg/h).
    pub feed_rate_kg_h: f32,
    /// Moisture mass fraction (0.0 to 1.0).
    pub moisture_fraction: f32,
    /// Volatile-solids fraction of dry matter (0.0 to 1.0).
    pub vs_fraction: f32,
    /// Lower heating value, dry basis (MJ/kg).
    pub lhv_dry_mj_kg: f32,
}

impl Default for FeedstockConfig {
    fn default() -> Self {
        Self {
            feed_rate_kg_h: 36_000.0,
            moisture_fraction: 0.25,
            vs_fraction: 0.8,
            lhv_dry_mj_kg: 18.0,
        }
    }
}

/// Hydrothermal carbonization parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HtcConfig {
    /// Reactor temperature (°C).
    pub temperature_c: f32,
    /// Hydrochar mass yield on dry matter (0.0 to 1.0).
    pub hydrochar_yield: f32,
    /// Fraction of feed energy retained in the hydrochar (0.0 to 1.0).
    pub energy_recovery: f32,
}

impl Default for HtcConfig {
    fn default() -> Self {
        Self {
            temperature_c: 220.0,
            hydrochar_yield: 0.55,
            energy_recovery: 0.75,
        }
    }
}

/// Anaerobic digester parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DigesterConfig {
    /// Volatile-solids destruction fraction (0.0 to 1.0).
    pub vs_destruction_fraction: f32,
    /// Methane yield per kg VS destroyed (m³/kg).
    pub methane_yield_m3_kg: f32,
    /// Methane volume fraction of the biogas (0.0 to 1.0).
    pub methane_fraction: f32,
}

impl Default for DigesterConfig {
    fn default() -> Self {
        Self {
            vs_destruction_fraction: 0.5,
            methane_yield_m3_kg: 0.35,
            methane_fraction: 0.6,
        }
    }
}

/// Rankine steam cycle parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SteamCycleConfig {
    /// Boiler pressure (MPa).
    pub boiler_pressure_mpa: f32,
    /// Live steam temperature (°C).
    pub boiler_temperature_c: f32,
    /// Condenser pressure (MPa).
    pub condenser_pressure_mpa: f32,
    /// Steam turbine isentropic efficiency (0.5 to 1.0).
    pub turbine_efficiency: f32,
}

impl Default for SteamCycleConfig {
    fn default() -> Self {
        Self {
            boiler_pressure_mpa: 8.0,
            boiler_temperature_c: 500.0,
            condenser_pressure_mpa: 0.01,
            turbine_efficiency: 0.85,
        }
    }
}

/// Brayton gas cycle parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GasCycleConfig {
    /// Compressor pressure ratio.
    pub pressure_ratio: f32,
    /// Compressor isentropic efficiency (0.5 to 1.0).
    pub compressor_efficiency: f32,
    /// Turbine isentropic efficiency (0.5 to 1.0).
    pub turbine_efficiency: f32,
    /// Turbine inlet temperature (K).
    pub turbine_inlet_temp_k: f32,
}

impl Default for GasCycleConfig {
    fn default() -> Self {
        Self {
            pressure_ratio: 8.0,
            compressor_efficiency: 0.88,
            turbine_efficiency: 0.85,
            turbine_inlet_temp_k: 1200.0,
        }
    }
}

/// HRSG heat-recovery parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecoveryConfig {
    /// Heat-recovery effectiveness (0.0 to 1.0).
    pub hrsg_effectiveness: f32,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            hrsg_effectiveness: 0.8,
        }
    }
}

/// Configuration error with dotted field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"feedstock.moisture_fraction"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

/// Maps a `SimulationInputs` field name to its dotted config path.
fn dotted_path(field: &str) -> String {
    let section = match field {
        "feed_rate_kg_h" | "moisture_fraction" | "vs_fraction" | "lhv_dry_mj_kg" => "feedstock",
        "htc_temperature_c" | "hydrochar_yield" | "htc_energy_recovery" => "htc",
        "vs_destruction_fraction" | "methane_yield_m3_kg" | "methane_fraction" => "digester",
        "boiler_pressure_mpa"
        | "boiler_temperature_c"
        | "condenser_pressure_mpa"
        | "steam_turbine_efficiency" => "steam_cycle",
        "pressure_ratio"
        | "compressor_efficiency"
        | "gas_turbine_efficiency"
        | "turbine_inlet_temp_k" => "gas_cycle",
        "hrsg_effectiveness" => "recovery",
        _ => return field.to_string(),
    };
    let leaf = match field {
        "htc_temperature_c" => "temperature_c",
        "htc_energy_recovery" => "energy_recovery",
        "steam_turbine_efficiency" | "gas_turbine_efficiency" => "turbine_efficiency",
        other => other,
    };
    format!("{section}.{leaf}")
}

impl PlantConfig {
    /// Returns the baseline scenario (stock plant parameters).
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the wet-feed preset: high-moisture AD-heavy feedstock.
    ///
    /// This is the worked example scenario: 1000 kg/h at 60% moisture.
    pub fn wet_feed() -> Self {
        Self {
            feedstock: FeedstockConfig {
                feed_rate_kg_h: 1000.0,
                moisture_fraction: 0.6,
                ..FeedstockConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the high-firing preset: aggressive gas cycle and hotter boiler.
    pub fn high_firing() -> Self {
        Self {
            steam_cycle: SteamCycleConfig {
                boiler_pressure_mpa: 12.0,
                boiler_temperature_c: 560.0,
                ..SteamCycleConfig::default()
            },
            gas_cycle: GasCycleConfig {
                pressure_ratio: 12.0,
                turbine_inlet_temp_k: 1600.0,
                ..GasCycleConfig::default()
            },
            recovery: RecoveryConfig {
                hrsg_effectiveness: 0.85,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "wet_feed", "high_firing"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "wet_feed" => Ok(Self::wet_feed()),
            "high_firing" => Ok(Self::high_firing()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Builds the flat engine input record from the config sections.
    pub fn inputs(&self) -> SimulationInputs {
        SimulationInputs {
            feed_rate_kg_h: self.feedstock.feed_rate_kg_h,
            moisture_fraction: self.feedstock.moisture_fraction,
            vs_fraction: self.feedstock.vs_fraction,
            lhv_dry_mj_kg: self.feedstock.lhv_dry_mj_kg,
            htc_temperature_c: self.htc.temperature_c,
            hydrochar_yield: self.htc.hydrochar_yield,
            htc_energy_recovery: self.htc.energy_recovery,
            vs_destruction_fraction: self.digester.vs_destruction_fraction,
            methane_yield_m3_kg: self.digester.methane_yield_m3_kg,
            methane_fraction: self.digester.methane_fraction,
            boiler_pressure_mpa: self.steam_cycle.boiler_pressure_mpa,
            boiler_temperature_c: self.steam_cycle.boiler_temperature_c,
            condenser_pressure_mpa: self.steam_cycle.condenser_pressure_mpa,
            steam_turbine_efficiency: self.steam_cycle.turbine_efficiency,
            pressure_ratio: self.gas_cycle.pressure_ratio,
            compressor_efficiency: self.gas_cycle.compressor_efficiency,
            gas_turbine_efficiency: self.gas_cycle.turbine_efficiency,
            turbine_inlet_temp_k: self.gas_cycle.turbine_inlet_temp_k,
            hrsg_effectiveness: self.recovery.hrsg_effectiveness,
        }
    }

    /// Returns the engine constant set for this scenario.
    pub fn engine_constants(&self) -> EngineConstants {
        self.constants.clone()
    }

    /// Validates all fields and returns a list of errors with dotted paths.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors: Vec<ConfigError> = self
            .inputs()
            .validate()
            .into_iter()
            .map(|e| ConfigError {
                field: dotted_path(&e.field),
                message: e.message,
            })
            .collect();

        let c = &self.constants;
        if c.cp_air_kj_kg_k <= 0.0 {
            errors.push(ConfigError {
                field: "constants.cp_air_kj_kg_k".into(),
                message: "must be > 0".into(),
            });
        }
        if c.gamma_air <= 1.0 {
            errors.push(ConfigError {
                field: "constants.gamma_air".into(),
                message: "must be > 1".into(),
            });
        }
        if c.lhv_methane_mj_m3 <= 0.0 {
            errors.push(ConfigError {
                field: "constants.lhv_methane_mj_m3".into(),
                message: "must be > 0".into(),
            });
        }
        if c.ambient_temp_k <= 0.0 {
            errors.push(ConfigError {
                field: "constants.ambient_temp_k".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}
