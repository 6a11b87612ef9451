//! Air-standard Brayton (gas turbine) cycle.
//!
//! Closed-form compression/expansion relations with isentropic component
//! efficiencies. The working-fluid mass flow is sized from the net thermal
//! input and the combustor temperature rise, so zero heat means zero flow
//! and zero work with no special casing downstream.

use super::constants::EngineConstants;
use super::types::BraytonResult;

/// Evaluates the gas cycle for the given net thermal input.
///
/// State points: 1 = compressor inlet (ambient), 2 = compressor outlet,
/// 3 = turbine inlet, 4 = turbine outlet. Degenerate guard: when the
/// turbine inlet temperature does not exceed the compressor outlet
/// temperature, or no heat is available, the cycle produces no work and the
/// full thermal input passes through as exhaust.
///
/// # Arguments
///
/// * `constants` - Engine constants (cp, γ, ambient state)
/// * `net_heat_kw` - Net thermal input from combustion (kW)
/// * `pressure_ratio` - Compressor pressure ratio
/// * `compressor_efficiency` - Compressor isentropic efficiency
/// * `turbine_efficiency` - Turbine isentropic efficiency
/// * `turbine_inlet_temp_k` - Turbine inlet temperature T3 (K)
pub fn expand(
    constants: &EngineConstants,
    net_heat_kw: f32,
    pressure_ratio: f32,
    compressor_efficiency: f32,
    turbine_efficiency: f32,
    turbine_inlet_temp_k: f32,
) -> BraytonResult {
    let cp = constants.cp_air_kj_kg_k;
    let t1 = constants.ambient_temp_k;
    let t3 = turbine_inlet_temp_k;
    let rp_k = pressure_ratio.powf(constants.pressure_exponent());

    // Compression: isentropic outlet, then actual via compressor efficiency
    let t2s = t1 * rp_k;
    let compressor_outlet_k = t1 + (t2s - t1) / compressor_efficiency;

    // Expansion: isentropic outlet, then actual via turbine efficiency
    let t4s = t3 / rp_k;
    let turbine_outlet_k = t3 - turbine_efficiency * (t3 - t4s);

    let heat_in_kj_kg = cp * (t3 - compressor_outlet_k);
    if net_heat_kw <= 0.0 || heat_in_kj_kg <= 0.0 {
        return BraytonResult {
            compressor_outlet_k,
            turbine_outlet_k,
            gas_flow_kg_s: 0.0,
            compressor_work_kw: 0.0,
            turbine_work_kw: 0.0,
            net_work_kw: 0.0,
            exhaust_heat_kw: net_heat_kw.max(0.0),
            efficiency: 0.0,
        };
    }

    let gas_flow_kg_s = net_heat_kw / heat_in_kj_kg;
    let compressor_work_kw = gas_flow_kg_s * cp * (compressor_outlet_k - t1);
    let turbine_work_kw = gas_flow_kg_s * cp * (t3 - turbine_outlet_k);
    let net_work_kw = (turbine_work_kw - compressor_work_kw).max(0.0);
    let exhaust_heat_kw = (net_heat_kw - net_work_kw).max(0.0);
    let efficiency = net_work_kw / net_heat_kw;

    BraytonResult {
        compressor_outlet_k,
        turbine_outlet_k,
        gas_flow_kg_s,
        compressor_work_kw,
        turbine_work_kw,
        net_work_kw,
        exhaust_heat_kw,
        efficiency,
    }
}
