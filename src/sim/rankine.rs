//! Rankine (steam turbine) cycle fed by HRSG waste-heat recovery.
//!
//! Uses the simplified water model the plant relations were calibrated
//! against: a three-band condensate enthalpy lookup, linear superheat and
//! isentropic-drop fits around the 8 MPa / 500 °C reference point, and
//! incompressible pump work.

use super::constants::EngineConstants;
use super::types::RankineResult;

/// Live steam enthalpy at the reference boiler state (kJ/kg).
const REF_STEAM_ENTHALPY_KJ_KG: f32 = 2800.0;
/// Superheat slope around the reference temperature (kJ/kg per °C).
const STEAM_ENTHALPY_SLOPE: f32 = 2.0;
/// Reference boiler temperature (°C).
const REF_BOILER_TEMP_C: f32 = 500.0;
/// Isentropic enthalpy drop at the reference boiler pressure (kJ/kg).
const REF_ISENTROPIC_DROP_KJ_KG: f32 = 1200.0;
/// Relative drop change per MPa away from the reference pressure.
const ISENTROPIC_DROP_SLOPE: f32 = 0.03;
/// Reference boiler pressure (MPa).
const REF_BOILER_PRESSURE_MPA: f32 = 8.0;
/// Exhaust enthalpy floor above the condensate state (kJ/kg).
const MIN_EXHAUST_MARGIN_KJ_KG: f32 = 50.0;

/// Routes gas-cycle exhaust through the HRSG into the steam cycle.
///
/// Steam mass flow is sized from the recovered heat and the boiler enthalpy
/// rise; turbine and pump work scale with it, so zero recovered heat yields
/// an all-zero cycle while the state-point enthalpies stay defined.
///
/// # Arguments
///
/// * `constants` - Engine constants (water properties)
/// * `exhaust_heat_kw` - Gas-cycle exhaust heat (kW)
/// * `hrsg_effectiveness` - Heat-recovery effectiveness (0.0 to 1.0)
/// * `boiler_pressure_mpa` - Boiler pressure (MPa)
/// * `boiler_temperature_c` - Live steam temperature (°C)
/// * `condenser_pressure_mpa` - Condenser pressure (MPa)
/// * `turbine_efficiency` - Steam turbine isentropic efficiency
pub fn recover(
    constants: &EngineConstants,
    exhaust_heat_kw: f32,
    hrsg_effectiveness: f32,
    boiler_pressure_mpa: f32,
    boiler_temperature_c: f32,
    condenser_pressure_mpa: f32,
    turbine_efficiency: f32,
) -> RankineResult {
    let h1 = constants.condensate_enthalpy_kj_kg(condenser_pressure_mpa);

    // Incompressible pump work, MPa -> kPa gives kJ/kg directly
    let pump_work_kj_kg = constants.water_specific_volume_m3_kg
        * (boiler_pressure_mpa - condenser_pressure_mpa)
        * 1000.0;
    let h2 = h1 + pump_work_kj_kg;

    let h3 = REF_STEAM_ENTHALPY_KJ_KG + STEAM_ENTHALPY_SLOPE * (boiler_temperature_c - REF_BOILER_TEMP_C);
    let isentropic_drop_kj_kg = REF_ISENTROPIC_DROP_KJ_KG
        * (1.0 - ISENTROPIC_DROP_SLOPE * (boiler_pressure_mpa - REF_BOILER_PRESSURE_MPA));
    let mut h4 = h3 - isentropic_drop_kj_kg * turbine_efficiency;
    if h4 < h1 {
        h4 = h1 + MIN_EXHAUST_MARGIN_KJ_KG;
    }

    let heat_recovered_kw = (exhaust_heat_kw * hrsg_effectiveness).max(0.0);
    let boiler_rise_kj_kg = h3 - h2;
    let steam_flow_kg_s = if heat_recovered_kw > 0.0 && boiler_rise_kj_kg > 0.0 {
        heat_recovered_kw / boiler_rise_kj_kg
    } else {
        0.0
    };

    let turbine_work_kw = steam_flow_kg_s * (h3 - h4);
    let pump_work_kw = steam_flow_kg_s * pump_work_kj_kg;
    let net_work_kw = (turbine_work_kw - pump_work_kw).max(0.0);
    let efficiency = if heat_recovered_kw > 0.0 {
        net_work_kw / heat_recovered_kw
    } else {
        0.0
    };

    RankineResult {
        condensate_enthalpy_kj_kg: h1,
        feedwater_enthalpy_kj_kg: h2,
        steam_enthalpy_kj_kg: h3,
        exhaust_enthalpy_kj_kg: h4,
        steam_flow_kg_s,
        heat_recovered_kw,
        turbine_work_kw,
        pump_work_kw,
        net_work_kw,
        efficiency,
    }
}
