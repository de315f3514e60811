//! Camper model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::InvalidEnumValue;
use super::payment::Payment;

/// Camper gender (closed set, exhaustive matching at the boundary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "MALE")]
    Male,
    #[serde(rename = "FEMALE")]
    Female,
}

impl Gender {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl FromStr for Gender {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            other => Err(InvalidEnumValue::new("gender", other)),
        }
    }
}

/// Shirt size ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShirtSize {
    #[serde(rename = "XS")]
    Xs,
    #[serde(rename = "S")]
    S,
    #[serde(rename = "M")]
    M,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "XL")]
    Xl,
    #[serde(rename = "XXL")]
    Xxl,
    #[serde(rename = "XXXL")]
    Xxxl,
    #[serde(rename = "XXXXL")]
    Xxxxl,
}

impl ShirtSize {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ShirtSize::Xs => "XS",
            ShirtSize::S => "S",
            ShirtSize::M => "M",
            ShirtSize::L => "L",
            ShirtSize::Xl => "XL",
            ShirtSize::Xxl => "XXL",
            ShirtSize::Xxxl => "XXXL",
            ShirtSize::Xxxxl => "XXXXL",
        }
    }
}

impl FromStr for ShirtSize {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XS" => Ok(ShirtSize::Xs),
            "S" => Ok(ShirtSize::S),
            "M" => Ok(ShirtSize::M),
            "L" => Ok(ShirtSize::L),
            "XL" => Ok(ShirtSize::Xl),
            "XXL" => Ok(ShirtSize::Xxl),
            "XXXL" => Ok(ShirtSize::Xxxl),
            "XXXXL" => Ok(ShirtSize::Xxxxl),
            other => Err(InvalidEnumValue::new("shirt_size", other)),
        }
    }
}

/// Countries the registration form accepts phone numbers for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "HN")]
    Hn,
    #[serde(rename = "US")]
    Us,
}

impl Country {
    /// International calling code prefixed to the stored number
    pub const fn calling_code(&self) -> &'static str {
        match self {
            Country::Hn => "+504",
            Country::Us => "+1",
        }
    }

    /// Expected local number shape, where `D` is an ASCII digit
    const fn local_template(&self) -> &'static str {
        match self {
            Country::Hn => "DDDD-DDDD",
            Country::Us => "(DDD) DDD-DDDD",
        }
    }

    /// Check a local phone number against the country format
    pub fn local_number_matches(&self, value: &str) -> bool {
        let template = self.local_template();
        if template.len() != value.len() {
            return false;
        }
        template.bytes().zip(value.bytes()).all(|(t, v)| match t {
            b'D' => v.is_ascii_digit(),
            literal => v == literal,
        })
    }

    /// Stored representation: `{calling_code} {local_number}`
    pub fn format_whatsapp(&self, local: &str) -> String {
        format!("{} {}", self.calling_code(), local)
    }
}

/// A registered camp participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camper {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub age: i32,
    pub shirt_size: ShirtSize,
    /// Allergies / free-text notes
    pub notes: String,
    /// Stored with the country calling code applied, e.g. "+504 9999-8888"
    pub whatsapp: String,
    /// Program fee fixed at creation; never recomputed from payments
    pub total_to_pay: i32,
    pub registered_by: String,
    pub is_here: bool,
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CamperCreate {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub age: i32,
    pub shirt_size: ShirtSize,
    #[serde(default)]
    pub notes: String,
    pub country: Country,
    /// Local phone number, formatted per country (no calling code)
    pub whatsapp: String,
    pub registered_by: String,
}

/// Camper together with its payments and the derived balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CamperWithPayments {
    #[serde(flatten)]
    pub camper: Camper,
    pub payments: Vec<Payment>,
    /// `total_to_pay - sum(quantity)`; negative when overpaid
    pub outstanding_balance: i64,
}

impl CamperWithPayments {
    pub fn new(camper: Camper, payments: Vec<Payment>) -> Self {
        let outstanding_balance =
            super::payment::outstanding_balance(camper.total_to_pay, &payments);
        Self {
            camper,
            payments,
            outstanding_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_roundtrip() {
        assert_eq!(Gender::from_str("MALE").unwrap(), Gender::Male);
        assert_eq!(Gender::from_str("FEMALE").unwrap(), Gender::Female);
        assert_eq!(Gender::Male.as_str(), "MALE");
        assert!(Gender::from_str("OTHER").is_err());
    }

    #[test]
    fn test_shirt_size_roundtrip() {
        for s in ["XS", "S", "M", "L", "XL", "XXL", "XXXL", "XXXXL"] {
            assert_eq!(ShirtSize::from_str(s).unwrap().as_str(), s);
        }
        assert!(ShirtSize::from_str("XXXXXL").is_err());
    }

    #[test]
    fn test_hn_phone_format() {
        assert!(Country::Hn.local_number_matches("9999-8888"));
        assert!(!Country::Hn.local_number_matches("99998888"));
        assert!(!Country::Hn.local_number_matches("9999-888"));
        assert!(!Country::Hn.local_number_matches("abcd-8888"));
    }

    #[test]
    fn test_us_phone_format() {
        assert!(Country::Us.local_number_matches("(123) 456-7890"));
        assert!(!Country::Us.local_number_matches("123-456-7890"));
        assert!(!Country::Us.local_number_matches("(123)456-7890"));
    }

    #[test]
    fn test_format_whatsapp() {
        assert_eq!(Country::Hn.format_whatsapp("9999-8888"), "+504 9999-8888");
        assert_eq!(
            Country::Us.format_whatsapp("(123) 456-7890"),
            "+1 (123) 456-7890"
        );
    }

    #[test]
    fn test_enum_serde_names() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"FEMALE\"");
        assert_eq!(serde_json::to_string(&ShirtSize::Xxxxl).unwrap(), "\"XXXXL\"");
        assert_eq!(serde_json::to_string(&Country::Hn).unwrap(), "\"HN\"");
    }
}
