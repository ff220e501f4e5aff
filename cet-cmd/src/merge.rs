//! Price/weather merge command.

use crate::{load_table, save_table};
use cet_heatwave::{merge_price_and_weather, restrict_common_period};
use log::info;

pub fn run_merge(prices: &str, weather: &str, output: &str) -> anyhow::Result<()> {
    let price_table = load_table(prices)?;
    let weather_table = load_table(weather)?;
    info!(
        "Loaded {} price rows and {} weather rows",
        price_table.len(),
        weather_table.len()
    );

    let (price_table, weather_table) = restrict_common_period(&price_table, &weather_table);
    let merged = merge_price_and_weather(&price_table, &weather_table)?;
    info!("Merged table has {} rows", merged.len());

    save_table(&merged, output)?;
    info!("Merged series written to {}", output);
    Ok(())
}
