//! Command implementations for the CET CLI.
//!
//! Every command is synchronous and file-in/file-out: read a climate CSV,
//! run one analysis, write the result.

use anyhow::Context;
use cet_series::table::ClimateTable;
use clap::Subcommand;
use std::fs::File;

pub mod extremes;
pub mod heatwaves;
pub mod merge;
pub mod return_periods;
pub mod synth;

#[derive(Subcommand)]
pub enum Command {
    /// Generate a synthetic climate dataset CSV
    Synth {
        /// Output CSV path
        #[arg(short = 'o', long)]
        output: String,

        /// First date of the series (YYYY-MM-DD)
        #[arg(long, default_value = "2000-01-01")]
        start: String,

        /// Last date of the series (YYYY-MM-DD)
        #[arg(long, default_value = "2023-12-31")]
        end: String,

        /// Generate hourly steps instead of daily
        #[arg(long)]
        hourly: bool,

        /// RNG seed; identical seeds reproduce identical datasets
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Flag extreme events in a series and print summary statistics
    Extremes {
        /// Input climate CSV
        #[arg(short = 'i', long)]
        input: String,

        /// Output path for the annotated CSV
        #[arg(short = 'o', long)]
        output: String,

        /// Variable column to analyze
        #[arg(long, default_value = "temperature_c")]
        variable: String,

        /// Threshold method: percentile, absolute, or anomaly
        #[arg(long, default_value = "percentile")]
        method: String,

        /// Percentile (0-100), literal value, or std-dev multiple,
        /// depending on the method
        #[arg(long, default_value_t = 95.0)]
        threshold: f64,

        /// Minimum consecutive extreme steps to keep an event
        #[arg(long, default_value_t = 1)]
        min_duration: usize,

        /// Also cluster the extreme steps into this many groups
        #[arg(long)]
        n_clusters: Option<usize>,
    },

    /// Estimate return values for the canonical return periods
    ReturnPeriods {
        /// Input climate CSV
        #[arg(short = 'i', long)]
        input: String,

        /// Output path for the return period table CSV
        #[arg(short = 'o', long)]
        output: String,

        /// Variable column to analyze
        #[arg(long, default_value = "temperature_c")]
        variable: String,

        /// Fitting method: block_maxima or peaks_over_threshold
        #[arg(long, default_value = "block_maxima")]
        method: String,
    },

    /// Flag heatwave days from hourly weather data
    Heatwaves {
        /// Input hourly weather CSV
        #[arg(short = 'i', long)]
        input: String,

        /// Output path for the daily flag CSV
        #[arg(long)]
        daily_output: String,

        /// Optional output with the flag expanded onto the hourly rows
        #[arg(long)]
        hourly_output: Option<String>,

        /// Daily-max variable column
        #[arg(long, default_value = "t2m_mean_c")]
        variable: String,

        /// Daily max temperature at or above which a day is hot
        #[arg(long, default_value_t = 30.0)]
        threshold: f64,

        /// Minimum consecutive hot days for a heatwave
        #[arg(long, default_value_t = 3)]
        min_duration: usize,
    },

    /// Merge hourly prices and weather over their common period
    Merge {
        /// Hourly price CSV
        #[arg(long)]
        prices: String,

        /// Hourly weather CSV
        #[arg(long)]
        weather: String,

        /// Output path for the merged CSV
        #[arg(short = 'o', long)]
        output: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Synth {
            output,
            start,
            end,
            hourly,
            seed,
        } => synth::run_synth(&output, &start, &end, hourly, seed),
        Command::Extremes {
            input,
            output,
            variable,
            method,
            threshold,
            min_duration,
            n_clusters,
        } => extremes::run_extremes(
            &input,
            &output,
            &variable,
            &method,
            threshold,
            min_duration,
            n_clusters,
        ),
        Command::ReturnPeriods {
            input,
            output,
            variable,
            method,
        } => return_periods::run_return_periods(&input, &output, &variable, &method),
        Command::Heatwaves {
            input,
            daily_output,
            hourly_output,
            variable,
            threshold,
            min_duration,
        } => heatwaves::run_heatwaves(
            &input,
            &daily_output,
            hourly_output.as_deref(),
            &variable,
            threshold,
            min_duration,
        ),
        Command::Merge {
            prices,
            weather,
            output,
        } => merge::run_merge(&prices, &weather, &output),
    }
}

/// Load a climate table from a CSV file.
pub(crate) fn load_table(path: &str) -> anyhow::Result<ClimateTable> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
    let table = cet_series::csv_io::read_climate_csv(file)
        .with_context(|| format!("failed to parse {}", path))?;
    Ok(table)
}

/// Write a climate table to a CSV file.
pub(crate) fn save_table(table: &ClimateTable, path: &str) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path))?;
    cet_series::csv_io::write_climate_csv(table, file)
        .with_context(|| format!("failed to write {}", path))?;
    Ok(())
}
