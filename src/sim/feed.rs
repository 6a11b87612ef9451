//! Feed characterization: wet feed into dry-matter, moisture, and VS flows.

use super::constants::mj_per_h_to_kw;
use super::types::FeedBreakdown;

/// Splits the wet feed stream and derives its chemical energy rate.
///
/// Pure arithmetic on raw inputs only; this is the root of the pipeline
/// DAG. A zero feed rate yields an all-zero breakdown.
///
/// # Arguments
///
/// * `feed_rate_kg_h` - Wet biomass feed rate (kg/h)
/// * `moisture_fraction` - Moisture mass fraction (0.0 to 1.0)
/// * `vs_fraction` - Volatile-solids fraction of dry matter (0.0 to 1.0)
/// * `lhv_dry_mj_kg` - Lower heating value, dry basis (MJ/kg)
pub fn characterize(
    feed_rate_kg_h: f32,
    moisture_fraction: f32,
    vs_fraction: f32,
    lhv_dry_mj_kg: f32,
) -> FeedBreakdown {
    let dry_matter_kg_h = feed_rate_kg_h * (1.0 - moisture_fraction);
    let moisture_kg_h = feed_rate_kg_h * moisture_fraction;
    let volatile_solids_kg_h = dry_matter_kg_h * vs_fraction;
    let chemical_energy_kw = mj_per_h_to_kw(dry_matter_kg_h * lhv_dry_mj_kg);

    FeedBreakdown {
        dry_matter_kg_h,
        moisture_kg_h,
        volatile_solids_kg_h,
        chemical_energy_kw,
    }
}
