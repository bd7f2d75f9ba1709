//! Fitted Numeric Scalers

use feature_engine::{Scaler, ScalingError};
use serde::{Deserialize, Serialize};

/// Z-score scaler with parameters fixed at training time.
///
/// `x' = (x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-column mean
    pub mean: Vec<f64>,
    /// Per-column standard deviation
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    fn validate(&self) -> Result<(), String> {
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "mean has {} columns but scale has {}",
                self.mean.len(),
                self.scale.len()
            ));
        }
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err("mean must be finite".to_string());
        }
        if self.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err("scale must be finite and non-zero".to_string());
        }
        Ok(())
    }

    fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect()
    }
}

/// Min-max scaler with parameters fixed at training time.
///
/// `x' = x * scale + min`, where `scale` and `min` already fold in the
/// target feature range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Per-column offset
    pub min: Vec<f64>,
    /// Per-column multiplier
    pub scale: Vec<f64>,
}

impl MinMaxScaler {
    pub fn new(min: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { min, scale }
    }

    /// Build from observed column bounds, mapping onto `[0, 1]`
    pub fn from_bounds(data_min: &[f64], data_max: &[f64]) -> Self {
        let scale: Vec<f64> = data_min
            .iter()
            .zip(data_max)
            .map(|(lo, hi)| {
                let range = hi - lo;
                if range == 0.0 {
                    1.0
                } else {
                    1.0 / range
                }
            })
            .collect();
        let min = data_min.iter().zip(&scale).map(|(lo, s)| -lo * s).collect();
        Self { min, scale }
    }

    fn validate(&self) -> Result<(), String> {
        if self.min.len() != self.scale.len() {
            return Err(format!(
                "min has {} columns but scale has {}",
                self.min.len(),
                self.scale.len()
            ));
        }
        if self.min.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err("min and scale must be finite".to_string());
        }
        Ok(())
    }

    fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.min.iter().zip(&self.scale))
            .map(|(x, (min, scale))| x * scale + min)
            .collect()
    }
}

/// Scaler artifact as stored on disk, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

impl ScalerArtifact {
    /// Number of columns the scaler was fitted on
    pub fn width(&self) -> usize {
        match self {
            ScalerArtifact::Standard(s) => s.mean.len(),
            ScalerArtifact::MinMax(s) => s.min.len(),
        }
    }

    /// Check internal consistency of the fitted parameters
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ScalerArtifact::Standard(s) => s.validate(),
            ScalerArtifact::MinMax(s) => s.validate(),
        }
    }
}

impl Scaler for ScalerArtifact {
    fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ScalingError> {
        let expected = self.width();

        rows.iter()
            .map(|row| {
                if row.len() != expected {
                    return Err(ScalingError::DimensionMismatch {
                        expected,
                        actual: row.len(),
                    });
                }
                if let Some(column) = row.iter().position(|x| !x.is_finite()) {
                    return Err(ScalingError::NonFinite { column });
                }
                let scaled = match self {
                    ScalerArtifact::Standard(s) => s.transform_row(row),
                    ScalerArtifact::MinMax(s) => s.transform_row(row),
                };
                // Finite inputs can still overflow
                if let Some(column) = scaled.iter().position(|x| !x.is_finite()) {
                    return Err(ScalingError::NonFinite { column });
                }
                Ok(scaled)
            })
            .collect()
    }
}
