use crate::daily::DailyValue;
use cet_extremes::runs::label_runs;
use cet_series::table::ClimateTable;
use cet_utils::dates::calendar_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One classified day. `run_id` numbers every run of consecutive hot
/// days (0 on non-hot days); `is_heatwave_day` is true only when the
/// run meets the minimum duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatwaveDay {
    pub date: NaiveDate,
    pub daily_max: f64,
    pub is_hot: bool,
    pub run_id: u32,
    pub is_heatwave_day: bool,
}

/// Flag heatwave days: hot iff daily max >= `threshold` (absolute rule,
/// >= comparison), heatwave iff part of a run of at least `min_duration`
/// consecutive hot days. Unlike extreme event detection there is no
/// intensity column.
pub fn flag_heatwaves(
    daily: &[DailyValue],
    threshold: f64,
    min_duration: usize,
) -> Vec<HeatwaveDay> {
    let hot: Vec<bool> = daily.iter().map(|d| d.value >= threshold).collect();
    let spans = label_runs(&hot);

    let mut run_id = vec![0u32; daily.len()];
    let mut is_heatwave = vec![false; daily.len()];
    for span in &spans {
        let qualifies = span.len >= min_duration;
        for i in span.start..span.end() {
            run_id[i] = span.id;
            is_heatwave[i] = qualifies;
        }
    }

    daily
        .iter()
        .enumerate()
        .map(|(i, d)| HeatwaveDay {
            date: d.date,
            daily_max: d.value,
            is_hot: hot[i],
            run_id: run_id[i],
            is_heatwave_day: is_heatwave[i],
        })
        .collect()
}

/// Expand the daily heatwave flag onto every hour of the matching
/// calendar date. Hours whose date is absent from `days` get false,
/// never an undefined value.
pub fn expand_heatwave_flag_to_hourly(table: &ClimateTable, days: &[HeatwaveDay]) -> Vec<bool> {
    let by_date: BTreeMap<NaiveDate, bool> = days
        .iter()
        .map(|d| (d.date, d.is_heatwave_day))
        .collect();
    table
        .timestamps()
        .iter()
        .map(|ts| *by_date.get(&calendar_date(ts)).unwrap_or(&false))
        .collect()
}
