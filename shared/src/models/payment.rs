//! Payment model and balance computation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::InvalidEnumValue;

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "CASH")]
    Cash,
    #[serde(rename = "TRANSFER")]
    Transfer,
}

impl PaymentMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Transfer => "TRANSFER",
        }
    }

    /// Confirmation flag at creation time: cash is confirmed on the spot,
    /// transfers stay unconfirmed until manually checked against a bank
    /// statement (out-of-band, no endpoint for it).
    pub const fn initial_confirmation(&self) -> bool {
        match self {
            PaymentMethod::Cash => true,
            PaymentMethod::Transfer => false,
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CASH" => Ok(PaymentMethod::Cash),
            "TRANSFER" => Ok(PaymentMethod::Transfer),
            other => Err(InvalidEnumValue::new("payment_method", other)),
        }
    }
}

/// One recorded contribution toward a camper's fee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub camper_id: i64,
    pub payment_method: PaymentMethod,
    /// Number written on the physical receipt booklet; kept as a string
    /// to tolerate leading zeros
    pub receipt_number: String,
    /// Amount paid, integer currency units
    pub quantity: i32,
    pub confirm_payment: bool,
    pub registered_by: String,
    /// Blob-store file name, e.g. "42_proofOfPayment.png"; None until an
    /// uploaded file has been durably stored
    pub proof_of_payment: Option<String>,
}

/// Payment form fields (the optional proof file travels as a separate
/// multipart part)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub payment_method: PaymentMethod,
    pub receipt_number: String,
    pub quantity: i32,
    pub registered_by: String,
}

/// Outstanding balance for a camper: amount owed minus everything paid so
/// far, regardless of the confirmation flag. No floor at zero; overpaying
/// yields a negative value, which callers render as "no balance pending".
pub fn outstanding_balance(total_to_pay: i32, payments: &[Payment]) -> i64 {
    let paid: i64 = payments.iter().map(|p| i64::from(p.quantity)).sum();
    i64::from(total_to_pay) - paid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(quantity: i32) -> Payment {
        Payment {
            id: 1,
            created_at: Utc::now(),
            updated_at: None,
            camper_id: 1,
            payment_method: PaymentMethod::Cash,
            receipt_number: "001".to_string(),
            quantity,
            confirm_payment: true,
            registered_by: "Staff1".to_string(),
            proof_of_payment: None,
        }
    }

    #[test]
    fn test_initial_confirmation() {
        assert!(PaymentMethod::Cash.initial_confirmation());
        assert!(!PaymentMethod::Transfer.initial_confirmation());
    }

    #[test]
    fn test_method_roundtrip() {
        assert_eq!(
            PaymentMethod::from_str("CASH").unwrap(),
            PaymentMethod::Cash
        );
        assert_eq!(
            PaymentMethod::from_str("TRANSFER").unwrap(),
            PaymentMethod::Transfer
        );
        assert!(PaymentMethod::from_str("CHECK").is_err());
    }

    #[test]
    fn test_balance_no_payments() {
        assert_eq!(outstanding_balance(3000, &[]), 3000);
    }

    #[test]
    fn test_balance_partial() {
        let payments = vec![payment(500), payment(500)];
        assert_eq!(outstanding_balance(3000, &payments), 2000);
    }

    #[test]
    fn test_balance_overpaid_goes_negative() {
        let payments = vec![payment(500), payment(500), payment(2500)];
        assert_eq!(outstanding_balance(3000, &payments), -500);
    }

    #[test]
    fn test_balance_ignores_confirmation_flag() {
        let mut unconfirmed = payment(1000);
        unconfirmed.payment_method = PaymentMethod::Transfer;
        unconfirmed.confirm_payment = false;
        assert_eq!(outstanding_balance(3000, &[unconfirmed]), 2000);
    }
}
