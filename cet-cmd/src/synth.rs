//! Synthetic dataset generation command.

use crate::save_table;
use cet_series::synthetic::{generate_climate_data, Cadence};
use cet_utils::dates::parse_date;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn run_synth(
    output: &str,
    start: &str,
    end: &str,
    hourly: bool,
    seed: u64,
) -> anyhow::Result<()> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let cadence = if hourly { Cadence::Hourly } else { Cadence::Daily };

    let mut rng = StdRng::seed_from_u64(seed);
    let table = generate_climate_data(start, end, cadence, &mut rng);
    info!(
        "Generated {} rows from {} to {} (seed {})",
        table.len(),
        start,
        end,
        seed
    );

    save_table(&table, output)?;
    info!("Synthetic data written to {}", output);
    Ok(())
}
