//! Steady-state balance simulator for an integrated AD–HTC biomass power plant.
//!
//! Wet biomass is characterized, carbonized (HTC) and digested (AD); the
//! hydrochar and biogas are burned and the heat is converted through a
//! combined Brayton/Rankine cycle. One call to the engine evaluates the
//! whole pipeline and returns every intermediate and summary value.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod io;
/// Process balance engine: input records, pipeline stages, and sweeps.
pub mod sim;
