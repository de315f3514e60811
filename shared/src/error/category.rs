//! Error category classification

use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Camper errors
/// - 2xxx: Payment errors
/// - 3xxx: Receipt / file upload errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Camper errors (1xxx)
    Camper,
    /// Payment errors (2xxx)
    Payment,
    /// Receipt / file upload errors (3xxx)
    Receipt,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Camper,
            2000..3000 => Self::Payment,
            3000..4000 => Self::Receipt,
            _ => Self::System,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_category_ranges() {
        assert_eq!(ErrorCategory::from_code(2), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Camper);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Payment);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Receipt);
        assert_eq!(ErrorCategory::from_code(9002), ErrorCategory::System);
    }

    #[test]
    fn test_code_category() {
        assert_eq!(
            ErrorCode::DatabaseError.category(),
            ErrorCategory::System
        );
        assert_eq!(
            ErrorCode::CamperNotFound.category(),
            ErrorCategory::Camper
        );
    }
}
