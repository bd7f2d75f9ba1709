//! Numeric Feature Scaling

use crate::error::ScalingError;

/// Width of the numeric triplet (present price, kms driven, car age)
pub const NUMERIC_DIMENSION: usize = 3;

/// A scaler fitted at training time.
///
/// Takes a batch of rows and returns the scaled batch with the same shape and
/// column order. Implementations are immutable after load and shared across
/// requests.
pub trait Scaler: Send + Sync {
    /// Scale a batch of rows
    fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ScalingError>;
}
