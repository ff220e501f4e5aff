//! Synthetic climate data for demos and tests.
//!
//! Produces a daily or hourly table with a seasonal temperature cycle, a
//! slow warming trend, injected heat/cold spells, seasonal gamma-distributed
//! precipitation with occasional downpours, and pressure inversely
//! correlated with temperature. The random source is supplied by the
//! caller, so two calls with equally seeded RNGs produce identical tables.

use crate::table::ClimateTable;
use crate::{VAR_PRECIPITATION, VAR_PRESSURE, VAR_TEMPERATURE};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use rand::Rng;
use rand_distr::{Distribution, Gamma, Normal};

/// Sampling cadence of the generated series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Daily,
    Hourly,
}

impl Cadence {
    /// Step length in days (1 for daily, 1/24 for hourly).
    fn step_days(self) -> f64 {
        match self {
            Cadence::Daily => 1.0,
            Cadence::Hourly => 1.0 / 24.0,
        }
    }
}

const DAYS_PER_YEAR: f64 = 365.25;
const BASE_PRESSURE_HPA: f64 = 1013.25;
const WARMING_TREND_C_PER_YEAR: f64 = 0.02;

/// Generate a synthetic climate table from `start` through `end` inclusive
/// with columns `temperature_c`, `precipitation_mm`, `pressure_hpa`.
pub fn generate_climate_data<R: Rng>(
    start: NaiveDate,
    end: NaiveDate,
    cadence: Cadence,
    rng: &mut R,
) -> ClimateTable {
    let timestamps = build_timestamps(start, end, cadence);
    let n = timestamps.len();
    let step_days = cadence.step_days();

    let noise = Normal::new(0.0, 3.0).unwrap();
    let mut temperature: Vec<f64> = (0..n)
        .map(|i| {
            let d = i as f64 * step_days;
            let seasonal = 15.0 + 10.0 * (2.0 * std::f64::consts::PI * d / DAYS_PER_YEAR).sin();
            let trend = WARMING_TREND_C_PER_YEAR * d / DAYS_PER_YEAR;
            seasonal + trend + noise.sample(rng)
        })
        .collect();

    if n > 0 {
        // Injected heat spells: ~2% of steps seed a 3-7 step warm excursion.
        for _ in 0..(n / 50) {
            let idx = rng.gen_range(0..n);
            let len = rng.gen_range(3..8);
            let bump = rng.gen_range(8.0..15.0);
            for value in temperature.iter_mut().skip(idx).take(len) {
                *value += bump;
            }
        }
        // Cold snaps: ~1.5% of steps seed a 2-5 step cold excursion.
        for _ in 0..(n * 3 / 200) {
            let idx = rng.gen_range(0..n);
            let len = rng.gen_range(2..6);
            let drop = rng.gen_range(8.0..15.0);
            for value in temperature.iter_mut().skip(idx).take(len) {
                *value -= drop;
            }
        }
    }

    let gamma = Gamma::new(2.0, 2.0).unwrap();
    let mut precipitation: Vec<f64> = (0..n)
        .map(|i| {
            let d = i as f64 * step_days;
            let seasonal = 1.0
                + 0.5
                    * (2.0 * std::f64::consts::PI * d / DAYS_PER_YEAR + std::f64::consts::PI)
                        .sin();
            (gamma.sample(rng) * seasonal).max(0.0)
        })
        .collect();

    if n > 0 {
        // Occasional downpours: ~1% of steps scaled up 5-15x.
        for _ in 0..(n / 100) {
            let idx = rng.gen_range(0..n);
            precipitation[idx] *= rng.gen_range(5.0..15.0);
        }
    }

    let mean_temp = if n > 0 {
        temperature.iter().sum::<f64>() / n as f64
    } else {
        0.0
    };
    let pressure_noise = Normal::new(0.0, 5.0).unwrap();
    let pressure: Vec<f64> = temperature
        .iter()
        .map(|t| BASE_PRESSURE_HPA - 0.5 * (t - mean_temp) + pressure_noise.sample(rng))
        .collect();

    // Construction cannot fail: timestamps are built sorted and all
    // columns share n.
    ClimateTable::from_columns(
        timestamps,
        vec![
            (VAR_TEMPERATURE.to_string(), temperature),
            (VAR_PRECIPITATION.to_string(), precipitation),
            (VAR_PRESSURE.to_string(), pressure),
        ],
    )
    .unwrap_or_else(|_| unreachable!("generated columns are consistent"))
}

fn build_timestamps(start: NaiveDate, end: NaiveDate, cadence: Cadence) -> Vec<DateTime<Utc>> {
    let mut timestamps = Vec::new();
    if start > end {
        return timestamps;
    }
    let mut cursor = start.and_hms_opt(0, 0, 0).unwrap().and_utc();
    let last = end.and_hms_opt(23, 59, 59).unwrap().and_utc();
    let step = match cadence {
        Cadence::Daily => TimeDelta::try_days(1).unwrap(),
        Cadence::Hourly => TimeDelta::try_hours(1).unwrap(),
    };
    while cursor <= last {
        timestamps.push(cursor);
        cursor += step;
    }
    timestamps
}
