use std::fmt;

/// Errors from return period estimation.
#[derive(Debug, PartialEq, Clone)]
pub enum EvtError {
    /// A method name was not one of the supported fitting methods.
    InvalidMethod(String),
    /// The requested variable column is not present in the table.
    UnknownColumn(String),
}

impl fmt::Display for EvtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvtError::InvalidMethod(name) => write!(f, "unknown method: {}", name),
            EvtError::UnknownColumn(name) => write!(f, "unknown column: {}", name),
        }
    }
}

impl std::error::Error for EvtError {}
