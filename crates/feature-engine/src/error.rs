//! Encoding Error Types

use data_validator::ValidationError;
use thiserror::Error;

/// Errors raised by a [`Scaler`](crate::Scaler)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScalingError {
    /// Row width does not match the fitted width
    #[error("X has {actual} features, but the scaler is expecting {expected} features as input")]
    DimensionMismatch { expected: usize, actual: usize },

    /// NaN or infinity in the input or the scaled output
    #[error("Input contains NaN or infinity in column {column}")]
    NonFinite { column: usize },

    /// Scaler returned a batch of the wrong shape
    #[error("scaler returned {rows} rows of width {width}, expected 1 row of width {expected}")]
    UnexpectedShape {
        rows: usize,
        width: usize,
        expected: usize,
    },

    /// Scaler-specific failure
    #[error("scaling failed: {0}")]
    Failed(String),
}

/// Errors while encoding a car listing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    /// A field could not be coerced
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Scaling the numeric features failed
    #[error(transparent)]
    Scaling(#[from] ScalingError),

    /// Car age does not fit an integer
    #[error("car age overflows for year {year} at current year {current_year}")]
    AgeOverflow { year: i64, current_year: i64 },
}
