//! Price Inference Engine
//!
//! Loads the fitted scaler and regression model from their artifacts and runs
//! price inference on encoded car listings.

mod artifacts;
mod engine;
mod model;
mod scaler;

pub use artifacts::{Artifacts, MODEL_FILE, SCALER_FILE};
pub use engine::PricePredictor;
pub use model::{ForestRegressor, LinearRegressor, ModelArtifact, RegressionTree, TreeNode};
pub use scaler::{MinMaxScaler, ScalerArtifact, StandardScaler};

use feature_engine::EncodingError;
use std::path::PathBuf;
use thiserror::Error;

/// A regression model fitted at training time
pub trait Regressor: Send + Sync {
    /// Number of features each row must have
    fn n_features(&self) -> usize;

    /// Predict one value per row
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, InferenceError>;
}

/// Errors during inference
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("X has {actual} features, but the model is expecting {expected} features as input")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Input contains NaN or infinity in column {column}")]
    NonFiniteInput { column: usize },
    #[error("Model returned no prediction")]
    EmptyPrediction,
    #[error("Model returned a non-finite prediction: {0}")]
    NonFinitePrediction(f64),
    #[error("Invalid model: {0}")]
    InvalidModel(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
}

/// Errors loading the model or scaler artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{artifact} artifact not found at {}", .path.display())]
    Missing { artifact: &'static str, path: PathBuf },
    #[error("failed to read {artifact} artifact at {}: {source}", .path.display())]
    Io {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {artifact} artifact at {}: {source}", .path.display())]
    Parse {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {artifact} artifact: {reason}")]
    Invalid { artifact: &'static str, reason: String },
}
