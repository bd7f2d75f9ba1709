//! Artifact Loading

use crate::model::ModelArtifact;
use crate::scaler::ScalerArtifact;
use crate::{ArtifactError, Regressor};
use feature_engine::{FEATURE_DIMENSION, NUMERIC_DIMENSION};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Default file name of the model artifact
pub const MODEL_FILE: &str = "model.json";
/// Default file name of the scaler artifact
pub const SCALER_FILE: &str = "scaler.json";

/// The fitted model and scaler, loaded once and shared read-only
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub model: Arc<ModelArtifact>,
    pub scaler: Arc<ScalerArtifact>,
}

impl Artifacts {
    /// Load both artifacts from `dir` using the default file names
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();
        Self::load(dir.join(MODEL_FILE), dir.join(SCALER_FILE))
    }

    /// Load both artifacts, model first
    pub fn load(model_path: impl AsRef<Path>, scaler_path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let model: ModelArtifact = read_json("model", model_path.as_ref())?;
        model
            .validate()
            .map_err(|reason| ArtifactError::Invalid { artifact: "model", reason })?;
        if model.n_features() != FEATURE_DIMENSION {
            return Err(ArtifactError::Invalid {
                artifact: "model",
                reason: format!(
                    "expects {} features, encoder produces {}",
                    model.n_features(),
                    FEATURE_DIMENSION
                ),
            });
        }

        let scaler: ScalerArtifact = read_json("scaler", scaler_path.as_ref())?;
        scaler
            .validate()
            .map_err(|reason| ArtifactError::Invalid { artifact: "scaler", reason })?;
        if scaler.width() != NUMERIC_DIMENSION {
            return Err(ArtifactError::Invalid {
                artifact: "scaler",
                reason: format!(
                    "fitted on {} columns, encoder scales {}",
                    scaler.width(),
                    NUMERIC_DIMENSION
                ),
            });
        }

        Ok(Self {
            model: Arc::new(model),
            scaler: Arc::new(scaler),
        })
    }
}

fn read_json<T: DeserializeOwned>(artifact: &'static str, path: &Path) -> Result<T, ArtifactError> {
    if !path.is_file() {
        return Err(ArtifactError::Missing {
            artifact,
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        artifact,
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
        artifact,
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loaded {} artifact from {}", artifact, path.display());
    Ok(value)
}
