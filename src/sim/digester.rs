//! Anaerobic digestion stage.
//!
//! Stoichiometric model: a destruction fraction of the volatile solids and
//! a methane yield per kg destroyed give the gas volumes; the biogas energy
//! rate follows from methane volume and its calorific value.

use super::constants::{EngineConstants, mj_per_h_to_kw};
use super::types::DigesterResult;

/// Digests the volatile-solids flow into biogas.
///
/// Biogas volume is the methane volume divided by the methane fraction. A
/// zero methane fraction is the degenerate out-of-service gas train: the
/// whole gas record is zeroed rather than dividing by zero, so the biogas
/// volume always bounds its methane content.
///
/// # Arguments
///
/// * `constants` - Engine constants (methane calorific value)
/// * `volatile_solids_kg_h` - VS flow from stage 1 (kg/h)
/// * `destruction_fraction` - VS destroyed in the digester (0.0 to 1.0)
/// * `methane_yield_m3_kg` - Methane per kg VS destroyed (m³/kg)
/// * `methane_fraction` - Methane volume fraction of the biogas
pub fn digest(
    constants: &EngineConstants,
    volatile_solids_kg_h: f32,
    destruction_fraction: f32,
    methane_yield_m3_kg: f32,
    methane_fraction: f32,
) -> DigesterResult {
    let vs_destroyed_kg_h = volatile_solids_kg_h * destruction_fraction;

    let (methane_m3_h, biogas_m3_h) = if methane_fraction > 0.0 {
        let methane_m3_h = vs_destroyed_kg_h * methane_yield_m3_kg;
        (methane_m3_h, methane_m3_h / methane_fraction)
    } else {
        (0.0, 0.0)
    };

    let biogas_energy_kw = mj_per_h_to_kw(methane_m3_h * constants.lhv_methane_mj_m3);

    DigesterResult {
        vs_destroyed_kg_h,
        methane_m3_h,
        biogas_m3_h,
        biogas_energy_kw,
    }
}
