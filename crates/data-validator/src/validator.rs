//! Field Coercion for Car Listings

use crate::error::ValidationError;
use crate::record::{CarRecord, RawCarRecord};
use serde_json::{Number, Value};
use tracing::debug;

/// Coerces the loosely-typed fields of a [`RawCarRecord`].
///
/// Numbers may arrive as JSON numbers or as numeric strings. Categorical
/// fields are never rejected: non-string values are kept in their JSON
/// rendering so they simply never match a known category.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Coerce every field of a raw record
    pub fn validate(&self, raw: &RawCarRecord) -> Result<CarRecord, ValidationError> {
        let record = CarRecord {
            present_price: self.coerce_float("present_price", &raw.present_price)?,
            kms_driven: self.coerce_integer("kms_driven", &raw.kms_driven)?,
            owner: self.coerce_integer("owner", &raw.owner)?,
            year: self.coerce_integer("year", &raw.year)?,
            fuel_type: category(&raw.fuel_type),
            seller_type: category(&raw.seller_type),
            transmission: category(&raw.transmission),
        };

        debug!(?record, "Coerced car record");
        Ok(record)
    }

    /// Read a value as a float
    pub fn coerce_float(&self, field: &'static str, value: &Value) -> Result<f64, ValidationError> {
        let invalid = || ValidationError::InvalidFloat {
            field,
            value: value.to_string(),
        };

        match value {
            Value::Number(n) => n.as_f64().ok_or_else(invalid),
            Value::String(s) => s.trim().parse::<f64>().map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    /// Read a value as an integer
    ///
    /// Floats are truncated toward zero; numeric strings must be plain
    /// base-10 integers.
    pub fn coerce_integer(&self, field: &'static str, value: &Value) -> Result<i64, ValidationError> {
        match value {
            Value::Number(n) => truncate(field, n),
            Value::String(s) => s.trim().parse::<i64>().map_err(|_| ValidationError::InvalidInteger {
                field,
                value: value.to_string(),
            }),
            _ => Err(ValidationError::InvalidInteger {
                field,
                value: value.to_string(),
            }),
        }
    }
}

fn truncate(field: &'static str, n: &Number) -> Result<i64, ValidationError> {
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }

    let out_of_range = || ValidationError::OutOfRange {
        field,
        value: n.to_string(),
    };

    // u64 beyond i64::MAX, or a float
    if n.is_u64() {
        return Err(out_of_range());
    }
    let f = n.as_f64().ok_or_else(out_of_range)?.trunc();
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Ok(f as i64)
    } else {
        Err(out_of_range())
    }
}

fn category(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn raw(value: Value) -> RawCarRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numbers_and_strings() {
        let validator = Validator::new();
        let record = validator
            .validate(&raw(json!({
                "present_price": "5.5",
                "kms_driven": 30000,
                "owner": " 1 ",
                "year": "2015",
                "fuel_type": "Petrol",
                "seller_type": "Dealer",
                "transmission": "Manual",
            })))
            .unwrap();

        assert_eq!(record.present_price, 5.5);
        assert_eq!(record.kms_driven, 30000);
        assert_eq!(record.owner, 1);
        assert_eq!(record.year, 2015);
        assert_eq!(record.fuel_type, "Petrol");
    }

    #[test]
    fn test_float_truncates_to_integer() {
        let validator = Validator::new();
        assert_eq!(validator.coerce_integer("owner", &json!(2.9)).unwrap(), 2);
        assert_eq!(validator.coerce_integer("year", &json!(-1.5)).unwrap(), -1);
        assert_eq!(validator.coerce_float("present_price", &json!(7)).unwrap(), 7.0);
    }

    #[test]
    fn test_decimal_string_is_not_an_integer() {
        let validator = Validator::new();
        let err = validator.coerce_integer("owner", &json!("3.0")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidInteger { field: "owner", .. }));
    }

    #[test]
    fn test_rejects_non_numeric() {
        let validator = Validator::new();
        assert!(validator.coerce_float("present_price", &json!("cheap")).is_err());
        assert!(validator.coerce_float("present_price", &Value::Null).is_err());
        assert!(validator.coerce_integer("kms_driven", &json!(true)).is_err());
        assert!(validator.coerce_integer("kms_driven", &json!([1])).is_err());
        assert!(matches!(
            validator.coerce_integer("kms_driven", &json!(u64::MAX)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_negative_and_zero_pass_through() {
        let validator = Validator::new();
        assert_eq!(validator.coerce_float("present_price", &json!(-3.25)).unwrap(), -3.25);
        assert_eq!(validator.coerce_float("present_price", &json!("0")).unwrap(), 0.0);
        assert_eq!(validator.coerce_integer("year", &json!(3000)).unwrap(), 3000);
    }

    #[test]
    fn test_categories_are_never_rejected() {
        let validator = Validator::new();
        let record = validator
            .validate(&raw(json!({
                "present_price": 1, "kms_driven": 1, "owner": 0, "year": 2010,
                "fuel_type": 5, "seller_type": null, "transmission": "manual",
            })))
            .unwrap();

        assert_eq!(record.fuel_type, "5");
        assert_eq!(record.seller_type, "null");
        assert_eq!(record.transmission, "manual");
    }

    proptest! {
        #[test]
        fn prop_integer_strings_round_trip(n in any::<i64>()) {
            let validator = Validator::new();
            prop_assert_eq!(validator.coerce_integer("kms_driven", &json!(n.to_string())).unwrap(), n);
            prop_assert_eq!(validator.coerce_integer("kms_driven", &json!(n)).unwrap(), n);
        }
    }
}
