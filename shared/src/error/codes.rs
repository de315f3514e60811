//! Unified error codes for the camp registration service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Camper errors
//! - 2xxx: Payment errors
//! - 3xxx: Receipt / file upload errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Camper ====================
    /// Camper not found
    CamperNotFound = 1001,
    /// Phone number does not match the country format
    InvalidPhoneNumber = 1002,

    // ==================== 2xxx: Payment ====================
    /// Payment not found
    PaymentNotFound = 2001,
    /// Invalid payment method
    PaymentInvalidMethod = 2002,
    /// Invalid payment amount
    PaymentInvalidAmount = 2003,

    // ==================== 3xxx: Receipt / File Upload ====================
    /// Payment has no stored proof-of-payment reference
    ReceiptNotFound = 3001,
    /// File content type not recognized
    UnsupportedFileFormat = 3002,
    /// Empty file provided
    EmptyFile = 3003,
    /// File too large
    FileTooLarge = 3004,
    /// Receipt download from the blob store failed
    ReceiptDownloadFailed = 3005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Blob storage error
    StorageError = 9401,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Camper
            ErrorCode::CamperNotFound => "Camper not found",
            ErrorCode::InvalidPhoneNumber => "Phone number does not match the country format",

            // Payment
            ErrorCode::PaymentNotFound => "Payment not found",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",
            ErrorCode::PaymentInvalidAmount => "Invalid payment amount",

            // Receipt / File Upload
            ErrorCode::ReceiptNotFound => "No proof of payment stored",
            ErrorCode::UnsupportedFileFormat => "File type not recognized",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::ReceiptDownloadFailed => "Error downloading file",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::StorageError => "Blob storage error",
        }
    }

    /// Get the category for this error code
    pub fn category(&self) -> super::ErrorCategory {
        super::ErrorCategory::from_code(self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Camper
            1001 => Ok(ErrorCode::CamperNotFound),
            1002 => Ok(ErrorCode::InvalidPhoneNumber),

            // Payment
            2001 => Ok(ErrorCode::PaymentNotFound),
            2002 => Ok(ErrorCode::PaymentInvalidMethod),
            2003 => Ok(ErrorCode::PaymentInvalidAmount),

            // Receipt / File Upload
            3001 => Ok(ErrorCode::ReceiptNotFound),
            3002 => Ok(ErrorCode::UnsupportedFileFormat),
            3003 => Ok(ErrorCode::EmptyFile),
            3004 => Ok(ErrorCode::FileTooLarge),
            3005 => Ok(ErrorCode::ReceiptDownloadFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9401 => Ok(ErrorCode::StorageError),

            other => Err(InvalidErrorCode(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::CamperNotFound,
            ErrorCode::PaymentNotFound,
            ErrorCode::ReceiptNotFound,
            ErrorCode::StorageError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serde_as_u16() {
        let json = serde_json::to_string(&ErrorCode::CamperNotFound).unwrap();
        assert_eq!(json, "1001");
        let back: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ErrorCode::CamperNotFound);
    }
}
