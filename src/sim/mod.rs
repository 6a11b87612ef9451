/// Air-standard Brayton (gas turbine) cycle relations.
pub mod brayton;
pub mod combustion;
/// Engine-wide physical constants.
pub mod constants;
/// Anaerobic digestion stage.
pub mod digester;
pub mod engine;
pub mod feed;
/// Hydrothermal carbonization stage.
pub mod htc;
/// Rankine (steam turbine) cycle with HRSG heat recovery.
pub mod rankine;
pub mod sweep;
pub mod types;
