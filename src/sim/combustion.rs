//! Combustion heat release.

use super::types::CombustionResult;

/// Sums the chemical energy of both fuels and deducts parasitic demand.
///
/// Net heat is clamped at zero: when the HTC reactor consumes more heat
/// than the fuels release, the power cycle simply receives nothing and the
/// degenerate-plant zeros propagate downstream.
///
/// # Arguments
///
/// * `hydrochar_energy_kw` - Hydrochar combustion energy rate (kW)
/// * `biogas_energy_kw` - Biogas combustion energy rate (kW)
/// * `htc_heat_demand_kw` - Parasitic HTC reactor duty (kW)
pub fn heat_release(
    hydrochar_energy_kw: f32,
    biogas_energy_kw: f32,
    htc_heat_demand_kw: f32,
) -> CombustionResult {
    let gross_heat_kw = hydrochar_energy_kw + biogas_energy_kw;
    let net_heat_kw = (gross_heat_kw - htc_heat_demand_kw).max(0.0);

    CombustionResult {
        gross_heat_kw,
        parasitic_heat_kw: htc_heat_demand_kw,
        net_heat_kw,
    }
}
