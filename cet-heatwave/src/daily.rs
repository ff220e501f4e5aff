use cet_series::error::TableError;
use cet_series::table::ClimateTable;
use cet_utils::dates::calendar_date;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One daily aggregate: tz-naive calendar date and the day's maximum.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DailyValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// Maximum of `variable` per tz-naive calendar date (the UTC date
/// component, zone dropped). One entry per distinct date present in the
/// input, in date order; missing dates are not filled.
pub fn compute_daily_max(
    table: &ClimateTable,
    variable: &str,
) -> Result<Vec<DailyValue>, TableError> {
    let values = table
        .column(variable)
        .ok_or_else(|| TableError::UnknownColumn(variable.to_string()))?;

    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (ts, &value) in table.timestamps().iter().zip(values) {
        daily
            .entry(calendar_date(ts))
            .and_modify(|m| *m = m.max(value))
            .or_insert(value);
    }

    Ok(daily
        .into_iter()
        .map(|(date, value)| DailyValue { date, value })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn hourly_table(values: &[f64]) -> ClimateTable {
        let start = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap();
        let timestamps: Vec<DateTime<Utc>> = (0..values.len())
            .map(|i| start + chrono::TimeDelta::try_hours(i as i64).unwrap())
            .collect();
        ClimateTable::from_columns(
            timestamps,
            vec![("t2m_mean_c".to_string(), values.to_vec())],
        )
        .unwrap()
    }

    #[test]
    fn test_daily_max_over_two_days() {
        // 30 hourly readings: 24 on June 1, 6 on June 2
        let mut values = vec![20.0; 30];
        values[13] = 31.5; // June 1 afternoon peak
        values[26] = 28.0; // June 2 peak
        let daily = compute_daily_max(&hourly_table(&values), "t2m_mean_c").unwrap();

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2021, 6, 1).unwrap());
        assert_eq!(daily[0].value, 31.5);
        assert_eq!(daily[1].date, NaiveDate::from_ymd_opt(2021, 6, 2).unwrap());
        assert_eq!(daily[1].value, 28.0);
    }

    #[test]
    fn test_no_gap_filling() {
        // readings on June 1 and June 3 only
        let timestamps = vec![
            Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2021, 6, 3, 12, 0, 0).unwrap(),
        ];
        let table = ClimateTable::from_columns(
            timestamps,
            vec![("t2m_mean_c".to_string(), vec![25.0, 27.0])],
        )
        .unwrap();
        let daily = compute_daily_max(&table, "t2m_mean_c").unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[1].date, NaiveDate::from_ymd_opt(2021, 6, 3).unwrap());
    }

    #[test]
    fn test_unknown_column() {
        let err = compute_daily_max(&hourly_table(&[1.0]), "nope").unwrap_err();
        assert_eq!(err, TableError::UnknownColumn("nope".to_string()));
    }
}
