//! Price Inference

use crate::artifacts::Artifacts;
use crate::{InferenceError, Regressor};
use data_validator::RawCarRecord;
use feature_engine::{current_year, FeatureEncoder, FeatureVector, Scaler};
use std::sync::Arc;
use tracing::debug;

/// Predicts resale prices from raw car listings.
///
/// Holds the encoder and the model behind shared immutable references, so a
/// single instance serves every request.
#[derive(Clone)]
pub struct PricePredictor {
    encoder: FeatureEncoder,
    model: Arc<dyn Regressor>,
}

impl PricePredictor {
    /// Create a predictor from a fitted scaler and model
    pub fn new(scaler: Arc<dyn Scaler>, model: Arc<dyn Regressor>) -> Self {
        Self {
            encoder: FeatureEncoder::new(scaler),
            model,
        }
    }

    /// Create a predictor from loaded artifacts
    pub fn from_artifacts(artifacts: Artifacts) -> Self {
        Self::new(artifacts.scaler, artifacts.model)
    }

    /// Predict the price of a listing as of today
    pub fn predict(&self, raw: &RawCarRecord) -> Result<f64, InferenceError> {
        self.predict_at(raw, current_year())
    }

    /// Predict the price of a listing as of `current_year`
    pub fn predict_at(&self, raw: &RawCarRecord, current_year: i64) -> Result<f64, InferenceError> {
        let features = self.encoder.encode_at(raw, current_year)?;
        self.predict_features(&features)
    }

    /// Run the model on an encoded listing
    pub fn predict_features(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let start = std::time::Instant::now();

        let prediction = self
            .model
            .predict(&features.to_batch())?
            .first()
            .copied()
            .ok_or(InferenceError::EmptyPrediction)?;
        if !prediction.is_finite() {
            return Err(InferenceError::NonFinitePrediction(prediction));
        }

        debug!(
            prediction,
            latency_us = start.elapsed().as_micros() as u64,
            "Inference completed"
        );
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinearRegressor, ModelArtifact};
    use crate::scaler::{ScalerArtifact, StandardScaler};
    use data_validator::ValidationError;
    use feature_engine::{EncodingError, ScalingError};
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every batch it is asked to predict
    #[derive(Default)]
    struct RecordingModel {
        batches: Mutex<Vec<Vec<Vec<f64>>>>,
    }

    impl Regressor for RecordingModel {
        fn n_features(&self) -> usize {
            8
        }

        fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, InferenceError> {
            self.batches.lock().unwrap().push(rows.to_vec());
            Ok(vec![4.25])
        }
    }

    struct SilentModel;

    impl Regressor for SilentModel {
        fn n_features(&self) -> usize {
            8
        }

        fn predict(&self, _rows: &[Vec<f64>]) -> Result<Vec<f64>, InferenceError> {
            Ok(Vec::new())
        }
    }

    /// Returns a fixed value for every row
    struct ConstantModel(f64);

    impl Regressor for ConstantModel {
        fn n_features(&self) -> usize {
            8
        }

        fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, InferenceError> {
            Ok(vec![self.0; rows.len()])
        }
    }

    struct IdentityScaler;

    impl Scaler for IdentityScaler {
        fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ScalingError> {
            Ok(rows.to_vec())
        }
    }

    fn listing() -> RawCarRecord {
        serde_json::from_value(json!({
            "present_price": 5.5,
            "kms_driven": 30000,
            "owner": 0,
            "year": 2015,
            "fuel_type": "Petrol",
            "seller_type": "Dealer",
            "transmission": "Manual",
        }))
        .unwrap()
    }

    #[test]
    fn test_single_row_reaches_model() {
        let model = Arc::new(RecordingModel::default());
        let predictor = PricePredictor::new(Arc::new(IdentityScaler), model.clone());

        let prediction = predictor.predict_at(&listing(), 2024).unwrap();

        assert_eq!(prediction, 4.25);
        let batches = model.batches.lock().unwrap();
        assert_eq!(*batches, vec![vec![vec![5.5, 30000.0, 0.0, 9.0, 0.0, 1.0, 0.0, 1.0]]]);
    }

    #[test]
    fn test_artifact_pipeline() {
        let artifacts = Artifacts {
            model: Arc::new(ModelArtifact::Linear(LinearRegressor::new(
                vec![1.0, 1.0, 0.0, 1.0, 0.0, 2.0, 0.0, 0.5],
                1.0,
            ))),
            scaler: Arc::new(ScalerArtifact::Standard(StandardScaler::new(
                vec![5.5, 20000.0, 7.0],
                vec![1.0, 10000.0, 2.0],
            ))),
        };
        let predictor = PricePredictor::from_artifacts(artifacts);

        // scaled triplet (0, 1, 1); petrol and manual flags set
        let prediction = predictor.predict_at(&listing(), 2024).unwrap();
        assert!((prediction - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_listing_never_reaches_model() {
        let model = Arc::new(RecordingModel::default());
        let predictor = PricePredictor::new(Arc::new(IdentityScaler), model.clone());
        let mut raw = listing();
        raw.present_price = json!("five");

        let err = predictor.predict_at(&raw, 2024).unwrap_err();

        assert!(matches!(
            err,
            InferenceError::Encoding(EncodingError::Validation(ValidationError::InvalidFloat { .. }))
        ));
        assert!(model.batches.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_model_output() {
        let predictor = PricePredictor::new(Arc::new(IdentityScaler), Arc::new(SilentModel));
        assert_eq!(
            predictor.predict_at(&listing(), 2024),
            Err(InferenceError::EmptyPrediction)
        );
    }

    #[test]
    fn test_non_finite_prediction_is_an_error() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let predictor = PricePredictor::new(Arc::new(IdentityScaler), Arc::new(ConstantModel(value)));
            assert!(matches!(
                predictor.predict_at(&listing(), 2024),
                Err(InferenceError::NonFinitePrediction(_))
            ));
        }
    }

    #[test]
    fn test_non_finite_price_stops_at_scaler() {
        let predictor = PricePredictor::from_artifacts(Artifacts {
            model: Arc::new(ModelArtifact::Linear(LinearRegressor::new(vec![1.0; 8], 0.0))),
            scaler: Arc::new(ScalerArtifact::Standard(StandardScaler::new(vec![0.0; 3], vec![1.0; 3]))),
        });

        for price in ["nan", "inf", "1e400"] {
            let mut raw = listing();
            raw.present_price = json!(price);
            assert_eq!(
                predictor.predict_at(&raw, 2024),
                Err(InferenceError::Encoding(EncodingError::Scaling(ScalingError::NonFinite { column: 0 })))
            );
        }
    }
}
