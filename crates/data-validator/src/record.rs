//! Car Listing Records

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Car listing exactly as posted by a client.
///
/// Every key is required, but values are kept loosely typed: browser forms
/// post numbers as strings, so coercion happens later in
/// [`Validator`](crate::Validator). Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCarRecord {
    /// Current ex-showroom price
    pub present_price: Value,
    /// Odometer reading (km)
    pub kms_driven: Value,
    /// Number of previous owners
    pub owner: Value,
    /// Manufacture year
    pub year: Value,
    /// Diesel, Petrol or CNG
    pub fuel_type: Value,
    /// Individual or Dealer
    pub seller_type: Value,
    /// Manual or Automatic
    pub transmission: Value,
}

impl RawCarRecord {
    /// Parse a request body
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ValidationError::InvalidFormat(e.to_string()))?;

        // serde would also accept a positional array for a struct
        if !value.is_object() {
            return Err(ValidationError::InvalidFormat(
                "expected a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value).map_err(|e| ValidationError::InvalidFormat(e.to_string()))
    }
}

/// Car listing after coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRecord {
    pub present_price: f64,
    pub kms_driven: i64,
    pub owner: i64,
    pub year: i64,
    pub fuel_type: String,
    pub seller_type: String,
    pub transmission: String,
}
