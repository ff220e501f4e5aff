use crate::error::TableError;
use chrono::{DateTime, Utc};

/// An ordered time series table: UTC timestamps plus named f64 columns.
///
/// Invariants, enforced by the constructors:
/// - every column has exactly one value per timestamp;
/// - timestamps are in non-decreasing order;
/// - column names are unique.
///
/// Tables are value types: transforms take a table by reference and return
/// a new one, the input is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateTable {
    timestamps: Vec<DateTime<Utc>>,
    columns: Vec<(String, Vec<f64>)>,
}

impl ClimateTable {
    /// Create a table with timestamps only. Fails if timestamps are not
    /// in non-decreasing order.
    pub fn new(timestamps: Vec<DateTime<Utc>>) -> Result<Self, TableError> {
        for (i, pair) in timestamps.windows(2).enumerate() {
            if pair[0] > pair[1] {
                return Err(TableError::UnsortedTimestamps { index: i + 1 });
            }
        }
        Ok(ClimateTable {
            timestamps,
            columns: Vec::new(),
        })
    }

    /// Create a table with timestamps and named columns.
    pub fn from_columns(
        timestamps: Vec<DateTime<Utc>>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, TableError> {
        let mut table = ClimateTable::new(timestamps)?;
        for (name, values) in columns {
            table = table.with_column(&name, values)?;
        }
        Ok(table)
    }

    /// Number of rows (timestamps).
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Column values by name, if present.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Return a copy of this table with one more column. Fails on a
    /// duplicate name or a length mismatch.
    pub fn with_column(mut self, name: &str, values: Vec<f64>) -> Result<Self, TableError> {
        if self.has_column(name) {
            return Err(TableError::DuplicateColumn(name.to_string()));
        }
        if values.len() != self.timestamps.len() {
            return Err(TableError::LengthMismatch {
                column: name.to_string(),
                expected: self.timestamps.len(),
                actual: values.len(),
            });
        }
        self.columns.push((name.to_string(), values));
        Ok(self)
    }

    /// Convenience for boolean annotations: stored as 0.0 / 1.0.
    pub fn with_bool_column(self, name: &str, flags: &[bool]) -> Result<Self, TableError> {
        let values = flags.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect();
        self.with_column(name, values)
    }

    /// First and last timestamp, or None for an empty table.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(&first), Some(&last)) => Some((first, last)),
            _ => None,
        }
    }

    /// New table containing the rows whose timestamp lies in
    /// [start, end] inclusive. A reversed range yields an empty table.
    pub fn slice_time(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let mask: Vec<bool> = self
            .timestamps
            .iter()
            .map(|ts| *ts >= start && *ts <= end)
            .collect();
        self.filter_by_mask(&mask)
    }

    /// New table containing only the rows where `mask` is true.
    /// Positions beyond the mask's length are dropped.
    pub fn filter_by_mask(&self, mask: &[bool]) -> Self {
        let keep: Vec<usize> = (0..self.len().min(mask.len()))
            .filter(|&i| mask[i])
            .collect();
        self.take_rows(&keep)
    }

    /// New table with the given row indices, in the given order.
    pub fn take_rows(&self, indices: &[usize]) -> Self {
        ClimateTable {
            timestamps: indices.iter().map(|&i| self.timestamps[i]).collect(),
            columns: self
                .columns
                .iter()
                .map(|(n, v)| (n.clone(), indices.iter().map(|&i| v[i]).collect()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_from_columns_roundtrip() {
        let table = ClimateTable::from_columns(
            vec![ts(1, 0), ts(2, 0), ts(3, 0)],
            vec![("temperature_c".to_string(), vec![1.0, 2.0, 3.0])],
        )
        .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.column("temperature_c"), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(table.column("missing"), None);
        assert_eq!(table.column_names(), vec!["temperature_c"]);
    }

    #[test]
    fn test_unsorted_timestamps_rejected() {
        let err = ClimateTable::new(vec![ts(2, 0), ts(1, 0)]).unwrap_err();
        assert_eq!(err, TableError::UnsortedTimestamps { index: 1 });
    }

    #[test]
    fn test_equal_timestamps_allowed() {
        // non-decreasing is fine before aggregation
        assert!(ClimateTable::new(vec![ts(1, 0), ts(1, 0)]).is_ok());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = ClimateTable::new(vec![ts(1, 0), ts(2, 0)])
            .unwrap()
            .with_column("x", vec![1.0])
            .unwrap_err();
        assert_eq!(
            err,
            TableError::LengthMismatch {
                column: "x".to_string(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = ClimateTable::new(vec![ts(1, 0)])
            .unwrap()
            .with_column("x", vec![1.0])
            .unwrap()
            .with_column("x", vec![2.0])
            .unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn("x".to_string()));
    }

    #[test]
    fn test_slice_time_inclusive() {
        let table = ClimateTable::from_columns(
            vec![ts(1, 0), ts(2, 0), ts(3, 0), ts(4, 0)],
            vec![("x".to_string(), vec![1.0, 2.0, 3.0, 4.0])],
        )
        .unwrap();
        let sliced = table.slice_time(ts(2, 0), ts(3, 0));
        assert_eq!(sliced.len(), 2);
        assert_eq!(sliced.column("x"), Some(&[2.0, 3.0][..]));

        // reversed range -> empty
        assert!(table.slice_time(ts(3, 0), ts(2, 0)).is_empty());
    }

    #[test]
    fn test_filter_by_mask() {
        let table = ClimateTable::from_columns(
            vec![ts(1, 0), ts(2, 0), ts(3, 0)],
            vec![("x".to_string(), vec![1.0, 2.0, 3.0])],
        )
        .unwrap();
        let filtered = table.filter_by_mask(&[true, false, true]);
        assert_eq!(filtered.column("x"), Some(&[1.0, 3.0][..]));
    }
}
