//! Payment database operations

use chrono::{DateTime, Utc};
use shared::models::payment::{Payment, PaymentCreate, PaymentMethod};
use sqlx::PgPool;

use super::BoxError;

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    camper_id: i64,
    payment_method: String,
    receipt_number: String,
    quantity: i32,
    confirm_payment: bool,
    registered_by: String,
    proof_of_payment: Option<String>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = BoxError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            camper_id: row.camper_id,
            payment_method: row.payment_method.parse::<PaymentMethod>()?,
            receipt_number: row.receipt_number,
            quantity: row.quantity,
            confirm_payment: row.confirm_payment,
            registered_by: row.registered_by,
            proof_of_payment: row.proof_of_payment,
        })
    }
}

/// Insert a payment. The confirmation flag is derived from the method here
/// and nowhere else: cash is confirmed immediately, transfers are not.
pub async fn insert_payment(
    pool: &PgPool,
    camper_id: i64,
    data: &PaymentCreate,
) -> Result<Payment, BoxError> {
    let row: PaymentRow = sqlx::query_as(
        r#"
        INSERT INTO payments (
            camper_id, payment_method, receipt_number,
            quantity, confirm_payment, registered_by
        )
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(camper_id)
    .bind(data.payment_method.as_str())
    .bind(&data.receipt_number)
    .bind(data.quantity)
    .bind(data.payment_method.initial_confirmation())
    .bind(&data.registered_by)
    .fetch_one(pool)
    .await?;
    row.try_into()
}

pub async fn find_payment(pool: &PgPool, id: i64) -> Result<Option<Payment>, BoxError> {
    let row: Option<PaymentRow> = sqlx::query_as("SELECT * FROM payments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(Payment::try_from).transpose()
}

pub async fn list_for_camper(pool: &PgPool, camper_id: i64) -> Result<Vec<Payment>, BoxError> {
    let rows: Vec<PaymentRow> =
        sqlx::query_as("SELECT * FROM payments WHERE camper_id = $1 ORDER BY id")
            .bind(camper_id)
            .fetch_all(pool)
            .await?;
    rows.into_iter().map(Payment::try_from).collect()
}

/// Every payment in the system, used to assemble the admin roster
pub async fn list_all(pool: &PgPool) -> Result<Vec<Payment>, BoxError> {
    let rows: Vec<PaymentRow> = sqlx::query_as("SELECT * FROM payments ORDER BY id")
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(Payment::try_from).collect()
}

/// Second write of the payment flow: store the receipt file name after the
/// blob upload succeeded. Deliberately not in a transaction with the insert;
/// a payment with no proof reference is a valid terminal state.
pub async fn set_proof_of_payment(
    pool: &PgPool,
    payment_id: i64,
    file_name: &str,
) -> Result<(), BoxError> {
    sqlx::query(
        r#"
        UPDATE payments SET proof_of_payment = $1, updated_at = now()
        WHERE id = $2
        "#,
    )
    .bind(file_name)
    .bind(payment_id)
    .execute(pool)
    .await?;
    Ok(())
}
