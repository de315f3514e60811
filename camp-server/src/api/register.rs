//! Registration API handler
//!
//! POST /api/campers: validate fields, then a single atomic insert.
//!
//! A write failure is not an HTTP error: it comes back as `success: false`
//! and the form re-renders with a generic failure message.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use shared::error::{AppError, ErrorCode};
use shared::models::camper::{Camper, CamperCreate};

use crate::db;
use crate::db::campers::NewCamper;
use crate::state::AppState;

/// Minimum length for name fields after trimming
const MIN_NAME_LEN: usize = 3;
const MIN_AGE: i32 = 1;
const MAX_AGE: i32 = 120;

#[derive(Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camper: Option<Camper>,
}

pub async fn register_camper(
    State(state): State<AppState>,
    Json(req): Json<CamperCreate>,
) -> Result<Json<RegisterResponse>, AppError> {
    let data = validate_registration(req)?;

    match db::campers::insert_camper(&state.pool, &data, state.camp_fee).await {
        Ok(camper) => {
            tracing::info!(camper_id = camper.id, "Camper registered");
            Ok(Json(RegisterResponse {
                success: true,
                camper: Some(camper),
            }))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to register camper");
            Ok(Json(RegisterResponse {
                success: false,
                camper: None,
            }))
        }
    }
}

/// Trim, bound-check and format the registration payload. Aborts before any
/// write; the offending field name travels in the error details.
fn validate_registration(req: CamperCreate) -> Result<NewCamper, AppError> {
    let first_name = req.first_name.trim().to_string();
    if first_name.chars().count() < MIN_NAME_LEN {
        return Err(
            AppError::validation("First name must be at least 3 characters")
                .with_detail("field", "first_name"),
        );
    }

    let last_name = req.last_name.trim().to_string();
    if last_name.chars().count() < MIN_NAME_LEN {
        return Err(
            AppError::validation("Last name must be at least 3 characters")
                .with_detail("field", "last_name"),
        );
    }

    if !(MIN_AGE..=MAX_AGE).contains(&req.age) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("Age must be between {MIN_AGE} and {MAX_AGE}"),
        )
        .with_detail("field", "age"));
    }

    let whatsapp = req.whatsapp.trim();
    if !req.country.local_number_matches(whatsapp) {
        return Err(AppError::new(ErrorCode::InvalidPhoneNumber)
            .with_detail("field", "whatsapp")
            .with_detail("country", req.country.calling_code()));
    }

    let registered_by = req.registered_by.trim().to_string();
    if registered_by.chars().count() < MIN_NAME_LEN {
        return Err(
            AppError::validation("Registered-by name must be at least 3 characters")
                .with_detail("field", "registered_by"),
        );
    }

    Ok(NewCamper {
        first_name,
        last_name,
        gender: req.gender,
        age: req.age,
        shirt_size: req.shirt_size,
        notes: req.notes.trim().to_string(),
        whatsapp: req.country.format_whatsapp(whatsapp),
        registered_by,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::camper::{Country, Gender, ShirtSize};

    fn ana_lopez() -> CamperCreate {
        CamperCreate {
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
            gender: Gender::Female,
            age: 24,
            shirt_size: ShirtSize::M,
            notes: String::new(),
            country: Country::Hn,
            whatsapp: "9999-8888".to_string(),
            registered_by: "Staff1".to_string(),
        }
    }

    #[test]
    fn test_valid_registration_formats_phone() {
        let data = validate_registration(ana_lopez()).unwrap();
        assert_eq!(data.whatsapp, "+504 9999-8888");
        assert_eq!(data.first_name, "Ana");
    }

    #[test]
    fn test_us_phone_gets_us_prefix() {
        let mut req = ana_lopez();
        req.country = Country::Us;
        req.whatsapp = "(123) 456-7890".to_string();
        let data = validate_registration(req).unwrap();
        assert_eq!(data.whatsapp, "+1 (123) 456-7890");
    }

    #[test]
    fn test_names_are_trimmed() {
        let mut req = ana_lopez();
        req.first_name = "  Ana  ".to_string();
        req.registered_by = " Staff1 ".to_string();
        let data = validate_registration(req).unwrap();
        assert_eq!(data.first_name, "Ana");
        assert_eq!(data.registered_by, "Staff1");
    }

    #[test]
    fn test_short_first_name_rejected() {
        let mut req = ana_lopez();
        req.first_name = "Al".to_string();
        let err = validate_registration(req).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(
            err.details.unwrap().get("field").unwrap(),
            "first_name"
        );
    }

    #[test]
    fn test_age_bounds() {
        for age in [0, 121, -5] {
            let mut req = ana_lopez();
            req.age = age;
            let err = validate_registration(req).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        }
        for age in [1, 120] {
            let mut req = ana_lopez();
            req.age = age;
            assert!(validate_registration(req).is_ok());
        }
    }

    #[test]
    fn test_bad_phone_rejected() {
        let mut req = ana_lopez();
        req.whatsapp = "99998888".to_string();
        let err = validate_registration(req).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPhoneNumber);
    }

    #[test]
    fn test_phone_checked_against_selected_country() {
        // HN-shaped number with the US country selected must fail
        let mut req = ana_lopez();
        req.country = Country::Us;
        let err = validate_registration(req).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPhoneNumber);
    }
}
