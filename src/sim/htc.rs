//! Hydrothermal carbonization stage.
//!
//! Applies fixed yield and energy-recovery fractions to the dry-matter flow
//! and computes the reactor heat demand from slurry sensible heat plus the
//! carbonization reaction enthalpy.

use super::constants::{EngineConstants, mj_per_h_to_kw};
use super::types::{FeedBreakdown, HtcResult};

/// Carbonizes the dry-matter flow and sizes the reactor heat demand.
///
/// Hydrochar energy is the feed chemical energy scaled by the energy
/// recovery; the char HHV follows from mass and energy. Heat demand heats
/// the full wet stream from ambient to reactor temperature, credited with
/// the (exothermic) reaction heat, and is clamped at zero so an exothermic
/// surplus never shows up as negative duty.
///
/// # Arguments
///
/// * `constants` - Engine constants (slurry cp, reaction heat, ambient)
/// * `feed` - Feed characterization from stage 1
/// * `feed_rate_kg_h` - Wet feed rate entering the reactor (kg/h)
/// * `htc_temperature_c` - Reactor temperature (°C)
/// * `hydrochar_yield` - Char mass yield on dry matter (0.0 to 1.0)
/// * `energy_recovery` - Fraction of feed energy retained in the char
pub fn carbonize(
    constants: &EngineConstants,
    feed: &FeedBreakdown,
    feed_rate_kg_h: f32,
    htc_temperature_c: f32,
    hydrochar_yield: f32,
    energy_recovery: f32,
) -> HtcResult {
    let hydrochar_kg_h = feed.dry_matter_kg_h * hydrochar_yield;
    let hydrochar_energy_kw = feed.chemical_energy_kw * energy_recovery;

    // Back out the char heating value; zero mass means zero energy too.
    let hydrochar_hhv_mj_kg = if hydrochar_kg_h > 0.0 {
        hydrochar_energy_kw * 3.6 / hydrochar_kg_h
    } else {
        0.0
    };

    let delta_t = (htc_temperature_c - constants.ambient_temp_c).max(0.0);
    let sensible_kw = mj_per_h_to_kw(feed_rate_kg_h * constants.cp_slurry_kj_kg_k * delta_t / 1000.0);
    let reaction_kw = mj_per_h_to_kw(feed.dry_matter_kg_h * constants.htc_reaction_heat_mj_kg);
    let heat_demand_kw = (sensible_kw + reaction_kw).max(0.0);

    HtcResult {
        hydrochar_kg_h,
        hydrochar_hhv_mj_kg,
        hydrochar_energy_kw,
        heat_demand_kw,
    }
}
