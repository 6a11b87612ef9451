//! Integration tests exercising every built-in preset end to end.

use nexus_sim::config::PlantConfig;
use nexus_sim::sim::engine::BalanceEngine;

#[test]
fn every_preset_computes_cleanly() {
    for name in PlantConfig::PRESETS {
        let config = PlantConfig::from_preset(name).unwrap();
        assert!(config.validate().is_empty(), "preset {name} invalid");

        let engine = BalanceEngine::new(config.engine_constants());
        let out = engine.compute(&config.inputs()).unwrap();

        for v in out.stage_values() {
            assert!(
                v.value.is_finite() && v.value >= 0.0,
                "preset {name}: {}.{} = {}",
                v.stage,
                v.name,
                v.value
            );
        }
        assert!((0.0..=1.0).contains(&out.summary.overall_efficiency));
    }
}

#[test]
fn high_firing_beats_baseline_gas_efficiency() {
    let baseline = PlantConfig::baseline();
    let high = PlantConfig::high_firing();
    let engine = BalanceEngine::default();

    let base_out = engine.compute(&baseline.inputs()).unwrap();
    let high_out = engine.compute(&high.inputs()).unwrap();

    assert!(high_out.brayton.efficiency > base_out.brayton.efficiency);
}

#[test]
fn fuel_split_is_scale_invariant() {
    // Both fuel streams scale with dry matter, so the biogas share of the
    // gross heat release is the same at any feed rate or moisture
    let engine = BalanceEngine::default();
    let dry = engine.compute(&PlantConfig::baseline().inputs()).unwrap();
    let wet = engine.compute(&PlantConfig::wet_feed().inputs()).unwrap();

    let dry_share = dry.digester.biogas_energy_kw / dry.combustion.gross_heat_kw;
    let wet_share = wet.digester.biogas_energy_kw / wet.combustion.gross_heat_kw;
    assert!((dry_share - wet_share).abs() < 1e-4);
}

#[test]
fn scenario_toml_round_trip_matches_preset() {
    let toml = r#"
[feedstock]
feed_rate_kg_h = 1000.0
moisture_fraction = 0.6
"#;
    let from_toml = PlantConfig::from_toml_str(toml).unwrap();
    let preset = PlantConfig::wet_feed();

    let engine = BalanceEngine::default();
    let a = engine.compute(&from_toml.inputs()).unwrap();
    let b = engine.compute(&preset.inputs()).unwrap();
    assert_eq!(
        a.summary.net_power_kw.to_bits(),
        b.summary.net_power_kw.to_bits()
    );
}
