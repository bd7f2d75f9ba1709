//! Feature Engineering Engine
//!
//! Turns a car listing into the fixed-order feature vector the price model
//! was trained on: three scaled numeric features, the owner count, and four
//! drop-first one-hot flags.

mod calendar;
mod error;
mod features;
mod scaler;

pub use calendar::current_year;
pub use error::{EncodingError, ScalingError};
pub use features::{FeatureEncoder, FeatureVector, FEATURE_DIMENSION, FEATURE_NAMES};
pub use scaler::{Scaler, NUMERIC_DIMENSION};
