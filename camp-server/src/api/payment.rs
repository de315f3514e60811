//! Payment API handlers
//!
//! GET  /api/campers/{camper_id}           serves camper + payments + balance.
//! POST /api/campers/{camper_id}/payments  records a payment with an
//! optional best-effort proof upload.
//!
//! The payment flow is deliberately two-step and non-transactional: the
//! insert is the durable fact, the proof upload and the reference update
//! that follows it are best-effort. An upload failure leaves a valid
//! payment with no proof reference and still reports success.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use serde::Serialize;

use shared::error::{AppError, ErrorCode};
use shared::models::camper::CamperWithPayments;
use shared::models::payment::{Payment, PaymentCreate, PaymentMethod};

use sqlx::PgPool;

use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;
use crate::storage::{ProofStorage, sniff};

/// Minimum length for the registered-by field after trimming
const MIN_NAME_LEN: usize = 3;

/// Maximum proof-of-payment size (20MB)
const MAX_FILE_SIZE: usize = 20 * 1024 * 1024;

#[derive(Serialize)]
pub struct PaymentListResponse {
    pub success: bool,
    pub payments: Vec<Payment>,
}

/// GET /api/campers/{camper_id}: the payments page payload
pub async fn camper_payments(
    State(state): State<AppState>,
    Path(camper_id): Path<i64>,
) -> ServiceResult<Json<CamperWithPayments>> {
    let camper = db::campers::find_camper(&state.pool, camper_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CamperNotFound))?;
    let payments = db::payments::list_for_camper(&state.pool, camper_id).await?;
    Ok(Json(CamperWithPayments::new(camper, payments)))
}

/// POST /api/campers/{camper_id}/payments: multipart form with the payment
/// fields and an optional `proof_of_payment` file part
pub async fn record_payment(
    State(state): State<AppState>,
    Path(camper_id): Path<i64>,
    multipart: Multipart,
) -> ServiceResult<Json<PaymentListResponse>> {
    let form = read_payment_form(multipart).await?;

    db::campers::find_camper(&state.pool, camper_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CamperNotFound))?;

    // Snapshot of existing payments, returned as-is if the insert fails
    let payments = db::payments::list_for_camper(&state.pool, camper_id).await?;

    let mut payment = match db::payments::insert_payment(&state.pool, camper_id, &form.data).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(camper_id, error = %e, "Failed to record payment");
            return Ok(Json(PaymentListResponse {
                success: false,
                payments,
            }));
        }
    };

    // The payment above is already the durable fact; everything from here
    // on is best-effort
    if let Some(file) = form.file {
        if let Some(file_name) =
            store_proof(&state.blob, &state.pool, camper_id, payment.id, file).await
        {
            payment.proof_of_payment = Some(file_name);
        }
    }

    let mut payments = payments;
    payments.push(payment);
    Ok(Json(PaymentListResponse {
        success: true,
        payments,
    }))
}

struct UploadedFile {
    bytes: Vec<u8>,
    /// Declared content type from the multipart part, kept as metadata only
    content_type: Option<String>,
}

struct PaymentForm {
    data: PaymentCreate,
    file: Option<UploadedFile>,
}

async fn read_payment_form(mut multipart: Multipart) -> Result<PaymentForm, AppError> {
    let mut payment_method = None;
    let mut receipt_number = None;
    let mut quantity = None;
    let mut registered_by = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::with_message(ErrorCode::InvalidRequest, format!("Multipart error: {e}"))
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "payment_method" => payment_method = Some(read_text(field).await?),
            "receipt_number" => receipt_number = Some(read_text(field).await?),
            "quantity" => quantity = Some(read_text(field).await?),
            "registered_by" => registered_by = Some(read_text(field).await?),
            "proof_of_payment" => {
                let content_type = field.content_type().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::with_message(ErrorCode::InvalidRequest, format!("Read error: {e}"))
                    })?
                    .to_vec();
                if bytes.len() > MAX_FILE_SIZE {
                    return Err(AppError::new(ErrorCode::FileTooLarge)
                        .with_detail("max_bytes", MAX_FILE_SIZE as u64));
                }
                // An empty part just means no file was attached
                if !bytes.is_empty() {
                    file = Some(UploadedFile {
                        bytes,
                        content_type,
                    });
                }
            }
            _ => {}
        }
    }

    let data = validate_payment_fields(payment_method, receipt_number, quantity, registered_by)?;
    Ok(PaymentForm { data, file })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(|e| {
        AppError::with_message(ErrorCode::InvalidRequest, format!("Read error: {e}"))
    })
}

fn validate_payment_fields(
    payment_method: Option<String>,
    receipt_number: Option<String>,
    quantity: Option<String>,
    registered_by: Option<String>,
) -> Result<PaymentCreate, AppError> {
    let payment_method = payment_method
        .ok_or_else(|| {
            AppError::new(ErrorCode::RequiredField).with_detail("field", "payment_method")
        })?
        .parse::<PaymentMethod>()
        .map_err(|e| {
            AppError::with_message(ErrorCode::PaymentInvalidMethod, e.to_string())
                .with_detail("field", "payment_method")
        })?;

    let receipt_number = receipt_number.map(|s| s.trim().to_string()).unwrap_or_default();
    if receipt_number.is_empty() {
        return Err(
            AppError::new(ErrorCode::RequiredField).with_detail("field", "receipt_number")
        );
    }

    let quantity = quantity
        .as_deref()
        .unwrap_or_default()
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|q| *q >= 1)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::PaymentInvalidAmount, "Amount must be at least 1")
                .with_detail("field", "quantity")
        })?;

    let registered_by = registered_by.map(|s| s.trim().to_string()).unwrap_or_default();
    if registered_by.chars().count() < MIN_NAME_LEN {
        return Err(
            AppError::validation("Registered-by name must be at least 3 characters")
                .with_detail("field", "registered_by"),
        );
    }

    Ok(PaymentCreate {
        payment_method,
        receipt_number,
        quantity,
        registered_by,
    })
}

/// Upload the proof and persist its file name in a second write. Returns
/// None on any failure or when the content is not a recognized receipt
/// format; errors are logged and swallowed, they never fail the payment.
async fn store_proof(
    blob: &impl ProofStorage,
    pool: &PgPool,
    camper_id: i64,
    payment_id: i64,
    file: UploadedFile,
) -> Option<String> {
    let Some(kind) = sniff::detect(&file.bytes) else {
        tracing::warn!(payment_id, "Proof content not recognized, skipping upload");
        return None;
    };

    let file_name = proof_file_name(payment_id, kind.extension);
    let key = proof_object_key(camper_id, &file_name);
    let content_type = file.content_type.unwrap_or_else(|| kind.mime.to_string());

    if let Err(e) = blob.put(&key, file.bytes, &content_type).await {
        tracing::warn!(payment_id, key = %key, error = %e, "Proof upload failed");
        return None;
    }

    if let Err(e) = db::payments::set_proof_of_payment(pool, payment_id, &file_name).await {
        tracing::warn!(payment_id, error = %e, "Failed to store proof reference");
        return None;
    }

    tracing::info!(payment_id, key = %key, "Proof of payment stored");
    Some(file_name)
}

/// File name stored on the payment row, e.g. "42_proofOfPayment.png"
pub(crate) fn proof_file_name(payment_id: i64, extension: &str) -> String {
    format!("{payment_id}_proofOfPayment.{extension}")
}

/// Blob-store key, namespaced under the camper id
pub(crate) fn proof_object_key(camper_id: i64, file_name: &str) -> String {
    format!("{camper_id}/{file_name}")
}
