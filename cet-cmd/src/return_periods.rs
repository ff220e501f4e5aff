//! Return period estimation command.

use crate::load_table;
use anyhow::Context;
use cet_evt::{compute_return_periods, BlockSize, FitMethod};
use log::info;
use std::fs::File;

pub fn run_return_periods(
    input: &str,
    output: &str,
    variable: &str,
    method: &str,
) -> anyhow::Result<()> {
    let table = load_table(input)?;
    info!("Loaded {} rows from {}", table.len(), input);

    let method = FitMethod::parse(method)?;
    let rows = compute_return_periods(&table, variable, method, BlockSize::Annual)?;

    let file = File::create(output).with_context(|| format!("failed to create {}", output))?;
    let mut writer = csv::Writer::from_writer(file);
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let defined = rows.iter().filter(|r| r.return_value.is_some()).count();
    info!(
        "Return period table written to {} ({}/{} values defined)",
        output,
        defined,
        rows.len()
    );
    Ok(())
}
