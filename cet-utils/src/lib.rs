//! Shared utility functions for CET crates.

/// Date and calendar utility functions
pub mod dates {
    use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// The tz-naive calendar date of a UTC timestamp (UTC date component,
    /// zone dropped). Used for daily aggregation and daily/hourly joins.
    pub fn calendar_date(dt: &DateTime<Utc>) -> NaiveDate {
        dt.date_naive()
    }

    /// Hour of day (0-23) of a UTC timestamp.
    pub fn hour_of_day(dt: &DateTime<Utc>) -> u32 {
        dt.hour()
    }

    /// Day of week with Monday = 0 .. Sunday = 6.
    pub fn day_of_week(dt: &DateTime<Utc>) -> u32 {
        dt.weekday().num_days_from_monday()
    }

    /// Month of year (1-12).
    pub fn month(dt: &DateTime<Utc>) -> u32 {
        dt.month()
    }

}

/// Basic descriptive statistics over f64 slices.
pub mod stats {
    /// Arithmetic mean. Returns 0.0 for an empty slice.
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Sample standard deviation (ddof = 1). Returns 0.0 when fewer than
    /// two values are present.
    pub fn sample_std(values: &[f64]) -> f64 {
        let n = values.len();
        if n < 2 {
            return 0.0;
        }
        let m = mean(values);
        let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
        (ss / (n - 1) as f64).sqrt()
    }

    /// Population standard deviation (ddof = 0). Returns 0.0 for an empty
    /// slice.
    pub fn population_std(values: &[f64]) -> f64 {
        let n = values.len();
        if n == 0 {
            return 0.0;
        }
        let m = mean(values);
        let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
        (ss / n as f64).sqrt()
    }

    /// Percentile (0-100) via linear interpolation between order
    /// statistics. Returns 0.0 for an empty slice.
    pub fn percentile(values: &[f64], pct: f64) -> f64 {
        let n = values.len();
        if n == 0 {
            return 0.0;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let pos = (n as f64 - 1.0) * (pct / 100.0).clamp(0.0, 1.0);
        let lo = pos as usize;
        let hi = (lo + 1).min(n - 1);
        let frac = pos - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_mean_and_std() {
            let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
            assert!((mean(&values) - 5.0).abs() < 1e-12);
            // population variance of this set is exactly 4
            assert!((population_std(&values) - 2.0).abs() < 1e-12);
            assert!(sample_std(&values) > population_std(&values));
        }

        #[test]
        fn test_mean_empty() {
            assert_eq!(mean(&[]), 0.0);
            assert_eq!(sample_std(&[]), 0.0);
            assert_eq!(sample_std(&[1.0]), 0.0);
        }

        #[test]
        fn test_percentile_interpolation() {
            let values = [1.0, 2.0, 3.0, 4.0];
            assert_eq!(percentile(&values, 0.0), 1.0);
            assert_eq!(percentile(&values, 100.0), 4.0);
            // position (4-1) * 0.5 = 1.5 -> halfway between 2 and 3
            assert!((percentile(&values, 50.0) - 2.5).abs() < 1e-12);
        }

        #[test]
        fn test_percentile_unsorted_input() {
            let values = [9.0, 1.0, 5.0];
            assert_eq!(percentile(&values, 0.0), 1.0);
            assert_eq!(percentile(&values, 100.0), 9.0);
        }

        #[test]
        fn test_percentile_empty() {
            assert_eq!(percentile(&[], 50.0), 0.0);
        }
    }
}
