use std::fmt;

/// Errors from extreme event detection and clustering.
#[derive(Debug, PartialEq, Clone)]
pub enum ExtremesError {
    /// A method name was not one of the supported classification methods.
    InvalidMethod(String),
    /// The requested variable column is not present in the table.
    UnknownColumn(String),
    /// No usable variable columns were available for clustering.
    NoClusterVariables,
}

impl fmt::Display for ExtremesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtremesError::InvalidMethod(name) => write!(f, "unknown method: {}", name),
            ExtremesError::UnknownColumn(name) => write!(f, "unknown column: {}", name),
            ExtremesError::NoClusterVariables => {
                write!(f, "no variable columns available for clustering")
            }
        }
    }
}

impl std::error::Error for ExtremesError {}
