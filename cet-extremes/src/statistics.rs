use crate::detect::FlaggedTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of the extreme events in a flagged series.
///
/// When the series has no extreme steps every field is zero — never NaN
/// and never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremeStatistics {
    /// Number of distinct extreme events.
    pub n_events: usize,
    /// Total number of extreme steps across all events.
    pub total_steps: usize,
    /// Mean per-step intensity (excess above threshold) over extreme steps.
    pub mean_intensity: f64,
    /// Largest per-step intensity.
    pub max_intensity: f64,
    /// Mean event duration in steps.
    pub mean_duration: f64,
    /// Largest raw value among extreme steps.
    pub max_value: f64,
    /// Mean raw value among extreme steps.
    pub mean_value: f64,
}

impl ExtremeStatistics {
    fn zero() -> Self {
        ExtremeStatistics {
            n_events: 0,
            total_steps: 0,
            mean_intensity: 0.0,
            max_intensity: 0.0,
            mean_duration: 0.0,
            max_value: 0.0,
            mean_value: 0.0,
        }
    }
}

/// Compute summary statistics over the extreme steps of a flagged series.
pub fn compute_extreme_statistics(flagged: &FlaggedTable) -> ExtremeStatistics {
    let values = flagged.values();
    let indices = flagged.extreme_indices();
    if indices.is_empty() {
        return ExtremeStatistics::zero();
    }

    let mut durations: BTreeMap<u32, usize> = BTreeMap::new();
    let mut sum_intensity = 0.0;
    let mut max_intensity = f64::MIN;
    let mut sum_value = 0.0;
    let mut max_value = f64::MIN;
    for &i in &indices {
        *durations.entry(flagged.flags.event_id[i]).or_insert(0) += 1;
        sum_intensity += flagged.flags.intensity[i];
        max_intensity = max_intensity.max(flagged.flags.intensity[i]);
        sum_value += values[i];
        max_value = max_value.max(values[i]);
    }

    let total_steps = indices.len();
    let n_events = durations.len();
    ExtremeStatistics {
        n_events,
        total_steps,
        mean_intensity: sum_intensity / total_steps as f64,
        max_intensity,
        mean_duration: total_steps as f64 / n_events as f64,
        max_value,
        mean_value: sum_value / total_steps as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::identify_extremes;
    use crate::threshold::ThresholdRule;
    use cet_series::table::ClimateTable;
    use chrono::{DateTime, TimeZone, Utc};

    fn flagged_from(values: &[f64], threshold: f64, min_duration: usize) -> FlaggedTable {
        let timestamps: Vec<DateTime<Utc>> = (0..values.len())
            .map(|i| {
                Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
                    + chrono::TimeDelta::try_days(i as i64).unwrap()
            })
            .collect();
        let table = ClimateTable::from_columns(
            timestamps,
            vec![("temperature_c".to_string(), values.to_vec())],
        )
        .unwrap();
        identify_extremes(
            &table,
            "temperature_c",
            &ThresholdRule::Absolute(threshold),
            min_duration,
        )
        .unwrap()
    }

    #[test]
    fn test_zero_state_contract() {
        let flagged = flagged_from(&[1.0, 2.0, 3.0], 100.0, 1);
        let stats = compute_extreme_statistics(&flagged);
        assert_eq!(stats, ExtremeStatistics::zero());
        assert!(!stats.mean_intensity.is_nan());
    }

    #[test]
    fn test_two_events() {
        // threshold 5: events [6,7] and [9], intensities [1,2] and [4]
        let flagged = flagged_from(&[6.0, 7.0, 1.0, 9.0], 5.0, 1);
        let stats = compute_extreme_statistics(&flagged);
        assert_eq!(stats.n_events, 2);
        assert_eq!(stats.total_steps, 3);
        assert!((stats.mean_intensity - 7.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.max_intensity, 4.0);
        assert!((stats.mean_duration - 1.5).abs() < 1e-12);
        assert_eq!(stats.max_value, 9.0);
        assert!((stats.mean_value - 22.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_duration_filter_feeds_through() {
        let flagged = flagged_from(&[6.0, 7.0, 1.0, 9.0], 5.0, 2);
        let stats = compute_extreme_statistics(&flagged);
        assert_eq!(stats.n_events, 1);
        assert_eq!(stats.total_steps, 2);
        assert_eq!(stats.mean_duration, 2.0);
    }
}
