//! Data Validation and Coercion
//!
//! Provides the raw request schema for a car listing and the coercion rules
//! that turn its loosely-typed fields into a typed [`CarRecord`].

mod error;
mod record;
mod validator;

pub use error::ValidationError;
pub use record::{CarRecord, RawCarRecord};
pub use validator::Validator;
