//! Domain models for the camp registration service

pub mod camper;
pub mod payment;

pub use camper::{Camper, CamperCreate, CamperWithPayments, Country, Gender, ShirtSize};
pub use payment::{Payment, PaymentCreate, PaymentMethod, outstanding_balance};

use thiserror::Error;

/// Error returned when a stored enum value does not match any known variant.
///
/// Enum columns are stored as TEXT; rows are only ever written through the
/// typed enums, so this error indicates a corrupted or hand-edited row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value}")]
pub struct InvalidEnumValue {
    pub kind: &'static str,
    pub value: String,
}

impl InvalidEnumValue {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
