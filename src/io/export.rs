//! CSV export for balance results and parameter sweeps.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::sweep::SweepPoint;
use crate::sim::types::SimulationOutputs;

/// Column header for the stage-table export.
const STAGE_HEADER: &str = "stage,name,value,unit";

/// Column header for the sweep export; the first column is renamed to the
/// swept parameter.
const SWEEP_HEADER: &str = "value,gas_power_kw,steam_power_kw,net_power_kw,overall_efficiency";

/// Exports the flattened stage table to a CSV file at the given path.
///
/// Writes a header row followed by one row per named scalar, in pipeline
/// order. Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_stage_csv(outputs: &SimulationOutputs, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_stage_csv(outputs, buf)
}

/// Writes the flattened stage table as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_stage_csv(outputs: &SimulationOutputs, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(STAGE_HEADER.split(','))?;
    for row in outputs.stage_values() {
        wtr.write_record(&[
            row.stage.to_string(),
            row.name.to_string(),
            format!("{:.4}", row.value),
            row.unit.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports a parameter sweep to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_sweep_csv(parameter: &str, rows: &[SweepPoint], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_sweep_csv(parameter, rows, buf)
}

/// Writes a parameter sweep as CSV to any writer.
///
/// The first column header is the swept parameter name; the remaining
/// columns are the plant summary metrics.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_sweep_csv(parameter: &str, rows: &[SweepPoint], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    let mut header: Vec<&str> = SWEEP_HEADER.split(',').collect();
    header[0] = parameter;
    wtr.write_record(&header)?;

    for r in rows {
        wtr.write_record(&[
            format!("{:.4}", r.value),
            format!("{:.4}", r.gas_power_kw),
            format!("{:.4}", r.steam_power_kw),
            format!("{:.4}", r.net_power_kw),
            format!("{:.4}", r.overall_efficiency),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
