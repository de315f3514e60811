//! Camper database operations

use chrono::{DateTime, Utc};
use shared::models::camper::{Camper, Gender, ShirtSize};
use sqlx::PgPool;

use super::BoxError;

/// Raw campers row; enum columns come back as TEXT and are parsed into the
/// shared enums on the way out.
#[derive(sqlx::FromRow)]
struct CamperRow {
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    first_name: String,
    last_name: String,
    gender: String,
    age: i32,
    shirt_size: String,
    notes: String,
    whatsapp: String,
    total_to_pay: i32,
    registered_by: String,
    is_here: bool,
}

impl TryFrom<CamperRow> for Camper {
    type Error = BoxError;

    fn try_from(row: CamperRow) -> Result<Self, Self::Error> {
        Ok(Camper {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            gender: row.gender.parse::<Gender>()?,
            shirt_size: row.shirt_size.parse::<ShirtSize>()?,
            first_name: row.first_name,
            last_name: row.last_name,
            age: row.age,
            notes: row.notes,
            whatsapp: row.whatsapp,
            total_to_pay: row.total_to_pay,
            registered_by: row.registered_by,
            is_here: row.is_here,
        })
    }
}

/// Validated registration data; whatsapp already carries the calling code
#[derive(Debug)]
pub struct NewCamper {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub age: i32,
    pub shirt_size: ShirtSize,
    pub notes: String,
    pub whatsapp: String,
    pub registered_by: String,
}

/// Single atomic insert; attendance defaults to false, fee is fixed here
/// and never recomputed from payments.
pub async fn insert_camper(
    pool: &PgPool,
    data: &NewCamper,
    total_to_pay: i32,
) -> Result<Camper, BoxError> {
    let row: CamperRow = sqlx::query_as(
        r#"
        INSERT INTO campers (
            first_name, last_name, gender, age, shirt_size,
            notes, whatsapp, total_to_pay, registered_by
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(data.gender.as_str())
    .bind(data.age)
    .bind(data.shirt_size.as_str())
    .bind(&data.notes)
    .bind(&data.whatsapp)
    .bind(total_to_pay)
    .bind(&data.registered_by)
    .fetch_one(pool)
    .await?;
    row.try_into()
}

pub async fn find_camper(pool: &PgPool, id: i64) -> Result<Option<Camper>, BoxError> {
    let row: Option<CamperRow> = sqlx::query_as("SELECT * FROM campers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(Camper::try_from).transpose()
}

/// Full roster, last name ascending (collation as provided by Postgres)
pub async fn list_campers(pool: &PgPool) -> Result<Vec<Camper>, BoxError> {
    let rows: Vec<CamperRow> = sqlx::query_as("SELECT * FROM campers ORDER BY last_name ASC")
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(Camper::try_from).collect()
}

/// Unconditionally overwrite the attendance flag. Returns None when the id
/// matches no row.
pub async fn set_attendance(
    pool: &PgPool,
    id: i64,
    is_here: bool,
) -> Result<Option<Camper>, BoxError> {
    let row: Option<CamperRow> = sqlx::query_as(
        r#"
        UPDATE campers SET is_here = $1, updated_at = now()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(is_here)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(Camper::try_from).transpose()
}
