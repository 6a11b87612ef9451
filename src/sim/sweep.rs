//! Parameter sweeps: independent engine evaluations over one input axis.
//!
//! Replaces the interactive recompute-on-slider-change behavior with an
//! explicit batch operation: each sweep point is one pure `compute` call on
//! a fresh copy of the base inputs.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::engine::BalanceEngine;
use super::types::{InputError, SimulationInputs};

/// Input axis a sweep can vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SweepParameter {
    /// Wet feed rate (kg/h).
    FeedRate,
    /// Feed moisture fraction.
    MoistureFraction,
    /// Methane yield per kg VS destroyed (m³/kg).
    MethaneYield,
    /// Compressor pressure ratio.
    PressureRatio,
    /// Gas turbine inlet temperature (K).
    TurbineInletTemp,
}

impl SweepParameter {
    /// All sweepable parameter names, for CLI help and error messages.
    pub const NAMES: &[&str] = &[
        "feed_rate",
        "moisture_fraction",
        "methane_yield",
        "pressure_ratio",
        "turbine_inlet_temp",
    ];

    /// CLI/CSV name of the parameter.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FeedRate => "feed_rate",
            Self::MoistureFraction => "moisture_fraction",
            Self::MethaneYield => "methane_yield",
            Self::PressureRatio => "pressure_ratio",
            Self::TurbineInletTemp => "turbine_inlet_temp",
        }
    }

    /// Writes `value` into the corresponding field of `inputs`.
    fn apply(&self, inputs: &mut SimulationInputs, value: f32) {
        match self {
            Self::FeedRate => inputs.feed_rate_kg_h = value,
            Self::MoistureFraction => inputs.moisture_fraction = value,
            Self::MethaneYield => inputs.methane_yield_m3_kg = value,
            Self::PressureRatio => inputs.pressure_ratio = value,
            Self::TurbineInletTemp => inputs.turbine_inlet_temp_k = value,
        }
    }
}

impl FromStr for SweepParameter {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feed_rate" => Ok(Self::FeedRate),
            "moisture_fraction" => Ok(Self::MoistureFraction),
            "methane_yield" => Ok(Self::MethaneYield),
            "pressure_ratio" => Ok(Self::PressureRatio),
            "turbine_inlet_temp" => Ok(Self::TurbineInletTemp),
            _ => Err(InputError {
                field: "sweep".to_string(),
                message: format!(
                    "unknown parameter \"{s}\", available: {}",
                    Self::NAMES.join(", ")
                ),
            }),
        }
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Summary metrics of one sweep evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    /// Swept parameter value.
    pub value: f32,
    /// Gas-cycle power (kW).
    pub gas_power_kw: f32,
    /// Steam-cycle power (kW).
    pub steam_power_kw: f32,
    /// Net plant power (kW).
    pub net_power_kw: f32,
    /// Overall first-law efficiency.
    pub overall_efficiency: f32,
}

/// Evaluates `points` evenly spaced values of `parameter` in `[from, to]`.
///
/// Every point is a full independent pipeline evaluation; the base inputs
/// are never mutated.
///
/// # Errors
///
/// Returns an [`InputError`] if `points < 2`, if the range is inverted, or
/// if any swept record fails validation (out-of-range sweep bounds surface
/// exactly like any other invalid input).
pub fn run_sweep(
    engine: &BalanceEngine,
    base: &SimulationInputs,
    parameter: SweepParameter,
    from: f32,
    to: f32,
    points: usize,
) -> Result<Vec<SweepPoint>, InputError> {
    if points < 2 {
        return Err(InputError {
            field: "sweep.points".to_string(),
            message: format!("must be >= 2, got {points}"),
        });
    }
    if from > to {
        return Err(InputError {
            field: "sweep.from".to_string(),
            message: format!("must be <= sweep.to, got [{from}, {to}]"),
        });
    }

    let step = (to - from) / (points - 1) as f32;
    let mut rows = Vec::with_capacity(points);
    for i in 0..points {
        let value = from + step * i as f32;
        let mut inputs = base.clone();
        parameter.apply(&mut inputs, value);
        let out = engine.compute(&inputs)?;
        rows.push(SweepPoint {
            value,
            gas_power_kw: out.summary.gas_power_kw,
            steam_power_kw: out.summary.steam_power_kw,
            net_power_kw: out.summary.net_power_kw,
            overall_efficiency: out.summary.overall_efficiency,
        });
    }
    Ok(rows)
}
