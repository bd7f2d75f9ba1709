//! Feature Vector Assembly

use crate::calendar::current_year;
use crate::error::{EncodingError, ScalingError};
use crate::scaler::{Scaler, NUMERIC_DIMENSION};
use data_validator::{CarRecord, RawCarRecord, Validator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Number of features the model consumes
pub const FEATURE_DIMENSION: usize = 8;

/// Column names in model order
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "Present_Price",
    "Kms_Driven",
    "Owner",
    "Car_Age",
    "Fuel_Type_Diesel",
    "Fuel_Type_Petrol",
    "Seller_Type_Individual",
    "Transmission_Manual",
];

/// Feature vector for price inference.
///
/// The position of every value is a contract with the trained model:
/// `[present_price, kms_driven, owner, car_age, is_diesel, is_petrol,
/// is_individual_seller, is_manual]`, where the first, second and fourth are
/// scaled and the flags are `0.0` or `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: [f64; FEATURE_DIMENSION],
}

impl FeatureVector {
    pub fn scaled_present_price(&self) -> f64 {
        self.values[0]
    }

    pub fn scaled_kms_driven(&self) -> f64 {
        self.values[1]
    }

    pub fn owner(&self) -> f64 {
        self.values[2]
    }

    pub fn scaled_car_age(&self) -> f64 {
        self.values[3]
    }

    pub fn is_diesel(&self) -> f64 {
        self.values[4]
    }

    pub fn is_petrol(&self) -> f64 {
        self.values[5]
    }

    pub fn is_individual_seller(&self) -> f64 {
        self.values[6]
    }

    pub fn is_manual(&self) -> f64 {
        self.values[7]
    }

    /// Wrap as a single-row batch
    pub fn to_batch(&self) -> Vec<Vec<f64>> {
        vec![self.values.to_vec()]
    }
}

/// Encodes car listings into [`FeatureVector`]s
#[derive(Clone)]
pub struct FeatureEncoder {
    scaler: Arc<dyn Scaler>,
    validator: Validator,
}

impl FeatureEncoder {
    /// Create an encoder around a fitted scaler
    pub fn new(scaler: Arc<dyn Scaler>) -> Self {
        Self {
            scaler,
            validator: Validator::new(),
        }
    }

    /// Encode a raw listing using today's calendar year
    pub fn encode(&self, raw: &RawCarRecord) -> Result<FeatureVector, EncodingError> {
        self.encode_at(raw, current_year())
    }

    /// Encode a raw listing as of `current_year`
    pub fn encode_at(&self, raw: &RawCarRecord, current_year: i64) -> Result<FeatureVector, EncodingError> {
        let record = self.validator.validate(raw)?;
        self.encode_record(&record, current_year)
    }

    /// Encode an already coerced listing as of `current_year`
    pub fn encode_record(&self, record: &CarRecord, current_year: i64) -> Result<FeatureVector, EncodingError> {
        let car_age = current_year
            .checked_sub(record.year)
            .ok_or(EncodingError::AgeOverflow {
                year: record.year,
                current_year,
            })?;

        let triplet = vec![record.present_price, record.kms_driven as f64, car_age as f64];
        let scaled = self.scale(triplet)?;

        // Drop-first one-hot: CNG, Dealer and Automatic are the all-zero
        // reference categories. Anything unrecognised lands there too.
        let is_diesel = flag(record.fuel_type == "Diesel");
        let is_petrol = flag(record.fuel_type == "Petrol");
        let is_individual_seller = flag(record.seller_type == "Individual");
        let is_manual = flag(record.transmission == "Manual");

        let features = FeatureVector {
            values: [
                scaled[0],
                scaled[1],
                record.owner as f64,
                scaled[2],
                is_diesel,
                is_petrol,
                is_individual_seller,
                is_manual,
            ],
        };

        debug!(car_age, values = ?features.values, "Encoded features");
        Ok(features)
    }

    fn scale(&self, triplet: Vec<f64>) -> Result<[f64; NUMERIC_DIMENSION], ScalingError> {
        let batch = self.scaler.transform(&[triplet])?;

        match batch.as_slice() {
            [row] if row.len() == NUMERIC_DIMENSION => Ok([row[0], row[1], row[2]]),
            _ => Err(ScalingError::UnexpectedShape {
                rows: batch.len(),
                width: batch.first().map_or(0, Vec::len),
                expected: NUMERIC_DIMENSION,
            }),
        }
    }
}

fn flag(set: bool) -> f64 {
    if set {
        1.0
    } else {
        0.0
    }
}
