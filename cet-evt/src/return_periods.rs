use crate::error::EvtError;
use crate::{gpd, gumbel};
use cet_series::table::ClimateTable;
use cet_utils::stats;
use chrono::Datelike;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical return periods, in years.
pub const RETURN_PERIOD_YEARS: [u32; 8] = [2, 5, 10, 20, 50, 100, 200, 500];

/// Percentile setting the exceedance threshold for peaks-over-threshold.
pub const POT_THRESHOLD_PERCENTILE: f64 = 95.0;

/// Return period estimation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMethod {
    /// Fit a Gumbel distribution to per-block maxima.
    BlockMaxima,
    /// Fit a Generalized Pareto distribution to threshold exceedances.
    PeaksOverThreshold,
}

impl FitMethod {
    /// Bridge for string-valued configuration. Unknown names fail naming
    /// the bad value.
    pub fn parse(method: &str) -> Result<Self, EvtError> {
        match method {
            "block_maxima" => Ok(FitMethod::BlockMaxima),
            "peaks_over_threshold" => Ok(FitMethod::PeaksOverThreshold),
            other => Err(EvtError::InvalidMethod(other.to_string())),
        }
    }
}

/// Calendar block used by the block maxima method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockSize {
    #[default]
    Annual,
    Monthly,
}

/// One row of the return period table. `return_value` is None when the
/// estimate is undefined (no exceedances, too few blocks to fit, or a
/// non-positive probability argument for small T under POT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnPeriodRow {
    pub return_period_years: u32,
    pub return_value: Option<f64>,
    pub variable: String,
}

/// Maximum value per non-overlapping calendar block, in block order.
pub fn block_maxima(table: &ClimateTable, variable: &str, block: BlockSize) -> Vec<f64> {
    let values = match table.column(variable) {
        Some(values) => values,
        None => return Vec::new(),
    };
    let mut maxima: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for (ts, &value) in table.timestamps().iter().zip(values) {
        let key = match block {
            BlockSize::Annual => (ts.year(), 0),
            BlockSize::Monthly => (ts.year(), ts.month()),
        };
        maxima
            .entry(key)
            .and_modify(|m| *m = m.max(value))
            .or_insert(value);
    }
    maxima.into_values().collect()
}

/// Estimate return values for the canonical return periods.
///
/// Each call refits from scratch; nothing is persisted. Degenerate data
/// (zero exceedances, fewer than two block maxima) yields rows with
/// `return_value: None`, not an error.
pub fn compute_return_periods(
    table: &ClimateTable,
    variable: &str,
    method: FitMethod,
    block: BlockSize,
) -> Result<Vec<ReturnPeriodRow>, EvtError> {
    let values = table
        .column(variable)
        .ok_or_else(|| EvtError::UnknownColumn(variable.to_string()))?;

    let row = |period: u32, value: Option<f64>| ReturnPeriodRow {
        return_period_years: period,
        return_value: value,
        variable: variable.to_string(),
    };

    match method {
        FitMethod::BlockMaxima => {
            let maxima = block_maxima(table, variable, block);
            if maxima.len() < 2 {
                debug!(
                    "return periods: only {} block maxima for {}, no fit",
                    maxima.len(),
                    variable
                );
                return Ok(RETURN_PERIOD_YEARS.iter().map(|&t| row(t, None)).collect());
            }
            let params = gumbel::fit(&maxima);
            debug!(
                "return periods: gumbel fit over {} blocks, mu={:.4} beta={:.4}",
                maxima.len(),
                params.location,
                params.scale
            );
            Ok(RETURN_PERIOD_YEARS
                .iter()
                .map(|&t| row(t, Some(params.quantile(1.0 - 1.0 / t as f64))))
                .collect())
        }
        FitMethod::PeaksOverThreshold => {
            let threshold = stats::percentile(values, POT_THRESHOLD_PERCENTILE);
            let exceedances: Vec<f64> = values
                .iter()
                .filter(|&&v| v > threshold)
                .map(|&v| v - threshold)
                .collect();
            if exceedances.is_empty() {
                debug!("return periods: no exceedances above {:.4}", threshold);
                return Ok(RETURN_PERIOD_YEARS.iter().map(|&t| row(t, None)).collect());
            }

            let params = gpd::fit(&exceedances);
            let rate = exceedances.len() as f64 / values.len() as f64;
            debug!(
                "return periods: gpd fit over {} exceedances, sigma={:.4} xi={:.4} rate={:.4}",
                exceedances.len(),
                params.scale,
                params.shape,
                rate
            );
            Ok(RETURN_PERIOD_YEARS
                .iter()
                .map(|&t| {
                    let p = 1.0 - 1.0 / (t as f64 * rate);
                    if p <= 0.0 {
                        row(t, None)
                    } else {
                        row(t, Some(threshold + params.quantile(p)))
                    }
                })
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rand::prelude::*;

    fn daily_table(years: i32, values: Vec<f64>) -> ClimateTable {
        let start = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let timestamps: Vec<DateTime<Utc>> = (0..values.len())
            .map(|i| start + chrono::TimeDelta::try_days(i as i64).unwrap())
            .collect();
        assert!(timestamps.last().unwrap().year() < 2000 + years + 1);
        ClimateTable::from_columns(timestamps, vec![("t".to_string(), values)]).unwrap()
    }

    #[test]
    fn test_block_maxima_annual_grouping() {
        // two years, one reading per quarter-ish
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let timestamps: Vec<DateTime<Utc>> = (0..8)
            .map(|i| start + chrono::TimeDelta::try_days(i * 100).unwrap())
            .collect();
        let table = ClimateTable::from_columns(
            timestamps,
            vec![(
                "t".to_string(),
                vec![1.0, 5.0, 3.0, 2.0, 9.0, 4.0, 6.0, 7.0],
            )],
        )
        .unwrap();
        // days 0,100,200,300 fall in 2020; days 400..700 fall in 2021
        let maxima = block_maxima(&table, "t", BlockSize::Annual);
        assert_eq!(maxima.len(), 2);
        assert_eq!(maxima[0], 5.0); // 2020: 1,5,3,2
        assert_eq!(maxima[1], 9.0); // 2021: 9,4,6,7
    }

    #[test]
    fn test_block_maxima_table_shape_and_monotonicity() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 366 * 6; // a bit over 6 years of daily data
        let values: Vec<f64> = (0..n)
            .map(|i| {
                let seasonal =
                    15.0 + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / 365.25).sin();
                seasonal + rng.gen_range(-3.0..3.0)
            })
            .collect();
        let table = daily_table(7, values);
        let rows =
            compute_return_periods(&table, "t", FitMethod::BlockMaxima, BlockSize::Annual)
                .unwrap();

        assert_eq!(rows.len(), 8);
        let periods: Vec<u32> = rows.iter().map(|r| r.return_period_years).collect();
        assert_eq!(periods, RETURN_PERIOD_YEARS.to_vec());

        let mut prev = f64::NEG_INFINITY;
        for r in &rows {
            let value = r.return_value.expect("block maxima fit should be defined");
            assert!(value >= prev, "return values must be non-decreasing in T");
            prev = value;
        }
    }

    #[test]
    fn test_block_maxima_single_block_undefined() {
        let table = daily_table(1, vec![1.0, 2.0, 3.0]);
        let rows =
            compute_return_periods(&table, "t", FitMethod::BlockMaxima, BlockSize::Annual)
                .unwrap();
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|r| r.return_value.is_none()));
    }

    #[test]
    fn test_pot_on_exponential_tail() {
        let mut rng = StdRng::seed_from_u64(7);
        let dist = rand_distr::Exp::new(0.5).unwrap();
        let values: Vec<f64> = (0..3000).map(|_| rng.sample(dist)).collect();
        let table = daily_table(9, values);
        let rows = compute_return_periods(
            &table,
            "t",
            FitMethod::PeaksOverThreshold,
            BlockSize::Annual,
        )
        .unwrap();

        assert_eq!(rows.len(), 8);
        // exceedance rate is 0.05, so T=2, T=5, T=10 have T*rate <= 1
        // and are undefined; large T values are defined and monotone
        let defined: Vec<f64> = rows.iter().filter_map(|r| r.return_value).collect();
        assert!(!defined.is_empty());
        let threshold = stats::percentile(table.column("t").unwrap(), 95.0);
        let mut prev = f64::NEG_INFINITY;
        for value in &defined {
            assert!(*value >= threshold);
            assert!(*value >= prev);
            prev = *value;
        }
    }

    #[test]
    fn test_pot_zero_exceedances() {
        // constant series: nothing is strictly above the 95th percentile
        let table = daily_table(1, vec![5.0; 100]);
        let rows = compute_return_periods(
            &table,
            "t",
            FitMethod::PeaksOverThreshold,
            BlockSize::Annual,
        )
        .unwrap();
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|r| r.return_value.is_none()));
    }

    #[test]
    fn test_parse_methods() {
        assert_eq!(FitMethod::parse("block_maxima").unwrap(), FitMethod::BlockMaxima);
        assert_eq!(
            FitMethod::parse("peaks_over_threshold").unwrap(),
            FitMethod::PeaksOverThreshold
        );
        let err = FitMethod::parse("gev").unwrap_err();
        assert_eq!(err, EvtError::InvalidMethod("gev".to_string()));
    }

    #[test]
    fn test_unknown_column() {
        let table = daily_table(1, vec![1.0]);
        let err =
            compute_return_periods(&table, "x", FitMethod::BlockMaxima, BlockSize::Annual)
                .unwrap_err();
        assert_eq!(err, EvtError::UnknownColumn("x".to_string()));
    }
}
