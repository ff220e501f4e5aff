use cet_series::error::TableError;
use cet_series::table::ClimateTable;
use cet_utils::dates;
use log::debug;
use std::collections::HashMap;

/// Inner-join hourly prices and weather on exact timestamp equality and
/// add calendar feature columns `hour` (0-23), `dow` (0 = Monday), and
/// `month` (1-12). Rows present on only one side are dropped. Fails on a
/// column name shared by both inputs.
pub fn merge_price_and_weather(
    prices: &ClimateTable,
    weather: &ClimateTable,
) -> Result<ClimateTable, TableError> {
    let weather_index: HashMap<_, usize> = weather
        .timestamps()
        .iter()
        .enumerate()
        .map(|(i, ts)| (*ts, i))
        .collect();

    let mut price_rows = Vec::new();
    let mut weather_rows = Vec::new();
    for (i, ts) in prices.timestamps().iter().enumerate() {
        if let Some(&j) = weather_index.get(ts) {
            price_rows.push(i);
            weather_rows.push(j);
        }
    }
    debug!(
        "merge: {} price rows x {} weather rows -> {} joined",
        prices.len(),
        weather.len(),
        price_rows.len()
    );

    let timestamps: Vec<_> = price_rows.iter().map(|&i| prices.timestamps()[i]).collect();
    let mut merged = ClimateTable::new(timestamps)?;
    for name in prices.column_names() {
        let column = prices.column(name).unwrap_or(&[]);
        merged = merged.with_column(name, price_rows.iter().map(|&i| column[i]).collect())?;
    }
    for name in weather.column_names() {
        let column = weather.column(name).unwrap_or(&[]);
        merged = merged.with_column(name, weather_rows.iter().map(|&j| column[j]).collect())?;
    }

    let hours: Vec<f64> = merged
        .timestamps()
        .iter()
        .map(|ts| dates::hour_of_day(ts) as f64)
        .collect();
    let dows: Vec<f64> = merged
        .timestamps()
        .iter()
        .map(|ts| dates::day_of_week(ts) as f64)
        .collect();
    let months: Vec<f64> = merged
        .timestamps()
        .iter()
        .map(|ts| dates::month(ts) as f64)
        .collect();
    merged
        .with_column("hour", hours)?
        .with_column("dow", dows)?
        .with_column("month", months)
}

/// Clip both tables to the intersection of their time spans,
/// [max of minimums, min of maximums] inclusive. Disjoint spans (or an
/// empty input) yield two empty tables, not an error.
pub fn restrict_common_period(
    a: &ClimateTable,
    b: &ClimateTable,
) -> (ClimateTable, ClimateTable) {
    match (a.span(), b.span()) {
        (Some((a_start, a_end)), Some((b_start, b_end))) => {
            let start = a_start.max(b_start);
            let end = a_end.min(b_end);
            if start > end {
                debug!("restrict_common_period: spans do not overlap");
            }
            (a.slice_time(start, end), b.slice_time(start, end))
        }
        _ => {
            // at least one side is empty, nothing can overlap
            let never = chrono::DateTime::<chrono::Utc>::MAX_UTC;
            (a.slice_time(never, never), b.slice_time(never, never))
        }
    }
}
