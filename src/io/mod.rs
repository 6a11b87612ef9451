//! Input/output: CSV export of balance results and sweeps.

pub mod export;
