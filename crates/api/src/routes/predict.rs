//! Prediction Route

use axum::{body::Bytes, extract::State, Json};
use data_validator::RawCarRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

/// Response for the predict endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: f64,
}

/// Predict the resale price of a posted car listing.
///
/// The body is parsed by hand so malformed JSON gets the same `400` error
/// shape as every other failure, whatever the content type.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictionResponse>, ApiError> {
    let raw = RawCarRecord::from_json(&body)?;
    let prediction = state.predictor.predict(&raw)?;

    Ok(Json(PredictionResponse { prediction }))
}
