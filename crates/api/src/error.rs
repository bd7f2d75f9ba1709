//! Error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationError;
use inference_engine::InferenceError;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Errors surfaced by the request handlers.
///
/// Every variant is reported to the caller as `400` with `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body could not be read as a car listing
    #[error(transparent)]
    InvalidRequest(#[from] ValidationError),

    /// Encoding or model inference failed
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        warn!(error = %message, "Prediction request rejected");

        (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
    }
}
