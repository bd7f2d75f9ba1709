//! Fitted Regression Models

use crate::{InferenceError, Regressor};
use serde::{Deserialize, Serialize};

/// Ordinary least squares model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// Node of a flattened regression tree.
///
/// A node without a `feature` is a leaf. Split nodes send a row to `left`
/// when `row[feature] <= threshold`, otherwise to `right`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default)]
    pub feature: Option<usize>,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub left: usize,
    #[serde(default)]
    pub right: usize,
    #[serde(default)]
    pub value: f64,
}

impl TreeNode {
    pub fn leaf(value: f64) -> Self {
        Self {
            feature: None,
            threshold: 0.0,
            left: 0,
            right: 0,
            value,
        }
    }

    pub fn split(feature: usize, threshold: f64, left: usize, right: usize) -> Self {
        Self {
            feature: Some(feature),
            threshold,
            left,
            right,
            value: 0.0,
        }
    }
}

/// Regression tree stored as a node array rooted at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            let Some(feature) = node.feature else {
                continue;
            };
            if feature >= n_features {
                return Err(format!("node {idx} splits on feature {feature} of {n_features}"));
            }
            // Children must come after their parent, which rules out cycles
            for child in [node.left, node.right] {
                if child <= idx || child >= self.nodes.len() {
                    return Err(format!("node {idx} has invalid child {child}"));
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf.
    ///
    /// Every step must move to a later node, so a malformed tree ends in an
    /// error instead of a panic or an endless walk.
    fn predict_row(&self, row: &[f64]) -> Result<f64, InferenceError> {
        let mut idx = 0;
        loop {
            let node = self.nodes.get(idx).ok_or_else(|| {
                InferenceError::InvalidModel(format!("tree has no node {idx}"))
            })?;
            let Some(feature) = node.feature else {
                return Ok(node.value);
            };
            let x = row.get(feature).ok_or_else(|| {
                InferenceError::InvalidModel(format!("node {idx} splits on missing feature {feature}"))
            })?;
            let next = if *x <= node.threshold { node.left } else { node.right };
            if next <= idx {
                return Err(InferenceError::InvalidModel(format!(
                    "node {idx} has invalid child {next}"
                )));
            }
            idx = next;
        }
    }
}

/// Averaging ensemble of regression trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestRegressor {
    pub n_features: usize,
    pub trees: Vec<RegressionTree>,
}

impl ForestRegressor {
    pub fn new(n_features: usize, trees: Vec<RegressionTree>) -> Self {
        Self { n_features, trees }
    }

    fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        self.trees
            .iter()
            .enumerate()
            .try_for_each(|(i, tree)| tree.validate(self.n_features).map_err(|e| format!("tree {i}: {e}")))
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64, InferenceError> {
        if self.trees.is_empty() {
            return Err(InferenceError::InvalidModel("forest has no trees".to_string()));
        }

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.predict_row(row)?;
        }
        Ok(total / self.trees.len() as f64)
    }
}

/// Model artifact as stored on disk, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearRegressor),
    RandomForest(ForestRegressor),
}

impl ModelArtifact {
    /// Check internal consistency of the fitted parameters
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ModelArtifact::Linear(m) => {
                if m.coefficients.iter().chain([&m.intercept]).any(|v| !v.is_finite()) {
                    return Err("coefficients and intercept must be finite".to_string());
                }
                Ok(())
            }
            ModelArtifact::RandomForest(m) => m.validate(),
        }
    }
}

impl Regressor for ModelArtifact {
    fn n_features(&self) -> usize {
        match self {
            ModelArtifact::Linear(m) => m.coefficients.len(),
            ModelArtifact::RandomForest(m) => m.n_features,
        }
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, InferenceError> {
        let expected = self.n_features();

        rows.iter()
            .map(|row| {
                if row.len() != expected {
                    return Err(InferenceError::DimensionMismatch {
                        expected,
                        actual: row.len(),
                    });
                }
                if let Some(column) = row.iter().position(|x| !x.is_finite()) {
                    return Err(InferenceError::NonFiniteInput { column });
                }
                match self {
                    ModelArtifact::Linear(m) => Ok(m.predict_row(row)),
                    ModelArtifact::RandomForest(m) => m.predict_row(row),
                }
            })
            .collect()
    }
}
