use std::fmt;

/// Errors that can occur when building or parsing climate tables.
#[derive(Debug, PartialEq, Clone)]
pub enum TableError {
    /// A column's length does not match the timestamp count.
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
    /// A column with this name already exists in the table.
    DuplicateColumn(String),
    /// The requested column is not present in the table.
    UnknownColumn(String),
    /// Timestamps are not in non-decreasing order.
    UnsortedTimestamps { index: usize },
    /// A timestamp string could not be parsed as RFC 3339.
    Timestamp(String),
    /// A value cell could not be parsed as a number.
    Value { column: String, value: String },
    /// Underlying CSV reader/writer failure.
    Csv(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::LengthMismatch {
                column,
                expected,
                actual,
            } => write!(
                f,
                "column '{}' has {} values, expected {}",
                column, actual, expected
            ),
            TableError::DuplicateColumn(name) => write!(f, "duplicate column: {}", name),
            TableError::UnknownColumn(name) => write!(f, "unknown column: {}", name),
            TableError::UnsortedTimestamps { index } => {
                write!(f, "timestamps not sorted at row {}", index)
            }
            TableError::Timestamp(value) => write!(f, "invalid timestamp: {}", value),
            TableError::Value { column, value } => {
                write!(f, "invalid value '{}' in column '{}'", value, column)
            }
            TableError::Csv(msg) => write!(f, "CSV error: {}", msg),
        }
    }
}

impl std::error::Error for TableError {}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        TableError::Csv(err.to_string())
    }
}
