//! Receipt retrieval
//!
//! GET /api/campers/{camper_id}/payments/{payment_id}/receipt
//!
//! Returns the stored proof-of-payment bytes with a content type sniffed
//! from the data itself. The ids arrive as strings and are validated here
//! before anything touches the database or the blob store.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::Response;

use shared::error::{AppError, ErrorCode};

use super::payment::proof_object_key;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;
use crate::storage::sniff;

pub async fn download_receipt(
    State(state): State<AppState>,
    Path((camper_id, payment_id)): Path<(String, String)>,
) -> ServiceResult<Response> {
    let camper_id = parse_id(&camper_id, "camper_id")?;
    let payment_id = parse_id(&payment_id, "payment_id")?;

    let payment = db::payments::find_payment(&state.pool, payment_id)
        .await?
        // A payment under a different camper is indistinguishable from a
        // missing one to the caller
        .filter(|p| p.camper_id == camper_id)
        .ok_or_else(|| AppError::new(ErrorCode::PaymentNotFound))?;

    let file_name = payment
        .proof_of_payment
        .ok_or_else(|| AppError::new(ErrorCode::ReceiptNotFound))?;

    let key = proof_object_key(camper_id, &file_name);
    let bytes = state.blob.get(&key).await.map_err(|e| {
        tracing::error!(payment_id, key = %key, error = %e, "Receipt download failed");
        AppError::new(ErrorCode::ReceiptDownloadFailed).with_detail("file", file_name.clone())
    })?;

    // Trust the bytes, not the stored name, for the content type
    let content_type = sniff::detect(&bytes)
        .map(|kind| kind.mime)
        .ok_or_else(|| AppError::new(ErrorCode::UnsupportedFileFormat))?;

    Ok(Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{file_name}\""),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::internal(format!("Response build error: {e}")))?)
}

fn parse_id(raw: &str, field: &'static str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| {
        AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid {field}"))
            .with_detail("field", field)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_parse_id_accepts_numeric() {
        assert_eq!(parse_id("42", "camper_id").unwrap(), 42);
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        for bad in ["", "abc", "1.5", "12abc"] {
            let err = parse_id(bad, "payment_id").unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidFormat);
            assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        }
    }
}
