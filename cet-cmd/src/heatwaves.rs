//! Heatwave flagging command.

use crate::{load_table, save_table};
use anyhow::Context;
use cet_heatwave::{compute_daily_max, expand_heatwave_flag_to_hourly, flag_heatwaves};
use log::info;
use std::fs::File;

pub fn run_heatwaves(
    input: &str,
    daily_output: &str,
    hourly_output: Option<&str>,
    variable: &str,
    threshold: f64,
    min_duration: usize,
) -> anyhow::Result<()> {
    let table = load_table(input)?;
    info!("Loaded {} hourly rows from {}", table.len(), input);

    let daily = compute_daily_max(&table, variable)?;
    let days = flag_heatwaves(&daily, threshold, min_duration);
    let heatwave_days = days.iter().filter(|d| d.is_heatwave_day).count();
    info!(
        "{} days aggregated, {} heatwave days at threshold {:.1}, min duration {}",
        days.len(),
        heatwave_days,
        threshold,
        min_duration
    );

    let file =
        File::create(daily_output).with_context(|| format!("failed to create {}", daily_output))?;
    let mut writer = csv::Writer::from_writer(file);
    for day in &days {
        writer.serialize(day)?;
    }
    writer.flush()?;
    info!("Daily flags written to {}", daily_output);

    if let Some(hourly_output) = hourly_output {
        let hourly_flags = expand_heatwave_flag_to_hourly(&table, &days);
        let annotated = table.with_bool_column("is_heatwave_day", &hourly_flags)?;
        save_table(&annotated, hourly_output)?;
        info!("Hourly flags written to {}", hourly_output);
    }
    Ok(())
}
