//! Validation Error Types

use thiserror::Error;

/// Errors while coercing a raw car record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value could not be read as a float
    #[error("could not convert {field} to float: {value}")]
    InvalidFloat { field: &'static str, value: String },

    /// Value could not be read as an integer
    #[error("invalid literal for integer {field}: {value}")]
    InvalidInteger { field: &'static str, value: String },

    /// Integer does not fit the supported range
    #[error("{field} value {value} is out of range")]
    OutOfRange { field: &'static str, value: String },

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
