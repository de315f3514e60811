//! Attendance and roster handlers
//!
//! PUT /api/campers/{camper_id}/attendance  overwrites the is_here flag.
//! GET /api/campers                         serves the full roster with stats.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use shared::error::{AppError, ErrorCode};
use shared::models::camper::CamperWithPayments;
use shared::models::payment::Payment;

use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AttendanceUpdate {
    pub is_here: bool,
}

#[derive(Serialize)]
pub struct AttendanceResponse {
    pub success: bool,
    #[serde(flatten)]
    pub camper: CamperWithPayments,
}

/// PUT /api/campers/{camper_id}/attendance
///
/// Unconditional overwrite, so repeating the same value is a no-op aside
/// from the updated_at bump.
pub async fn set_attendance(
    State(state): State<AppState>,
    Path(camper_id): Path<i64>,
    Json(update): Json<AttendanceUpdate>,
) -> ServiceResult<Json<AttendanceResponse>> {
    let camper = db::campers::set_attendance(&state.pool, camper_id, update.is_here)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CamperNotFound))?;

    tracing::info!(camper_id, is_here = update.is_here, "Attendance updated");

    let payments = db::payments::list_for_camper(&state.pool, camper_id).await?;
    Ok(Json(AttendanceResponse {
        success: true,
        camper: CamperWithPayments::new(camper, payments),
    }))
}

/// Attendance counters shown on the admin list
#[derive(Debug, Serialize)]
pub struct AttendanceStats {
    pub total: usize,
    pub present: usize,
    pub remaining: usize,
}

#[derive(Serialize)]
pub struct RosterResponse {
    pub campers: Vec<CamperWithPayments>,
    pub stats: AttendanceStats,
}

/// GET /api/campers: every camper with payments and balance, last name
/// ascending, plus the attendance counters
pub async fn list_campers(State(state): State<AppState>) -> ServiceResult<Json<RosterResponse>> {
    let campers = db::campers::list_campers(&state.pool).await?;
    let payments = db::payments::list_all(&state.pool).await?;

    // Group once instead of a query per camper
    let mut by_camper: HashMap<i64, Vec<Payment>> = HashMap::new();
    for payment in payments {
        by_camper.entry(payment.camper_id).or_default().push(payment);
    }

    let campers: Vec<CamperWithPayments> = campers
        .into_iter()
        .map(|camper| {
            let payments = by_camper.remove(&camper.id).unwrap_or_default();
            CamperWithPayments::new(camper, payments)
        })
        .collect();

    let stats = attendance_stats(&campers);
    Ok(Json(RosterResponse { campers, stats }))
}

fn attendance_stats(campers: &[CamperWithPayments]) -> AttendanceStats {
    let total = campers.len();
    let present = campers.iter().filter(|c| c.camper.is_here).count();
    AttendanceStats {
        total,
        present,
        remaining: total - present,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::camper::{Camper, Gender, ShirtSize};

    fn camper(id: i64, is_here: bool) -> CamperWithPayments {
        CamperWithPayments::new(
            Camper {
                id,
                created_at: Utc::now(),
                updated_at: None,
                first_name: "Ana".to_string(),
                last_name: "Lopez".to_string(),
                gender: Gender::Female,
                age: 17,
                shirt_size: ShirtSize::M,
                notes: String::new(),
                whatsapp: "+504 9999-8888".to_string(),
                total_to_pay: 3000,
                registered_by: "Staff1".to_string(),
                is_here,
            },
            Vec::new(),
        )
    }

    #[test]
    fn test_stats_empty() {
        let stats = attendance_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.present, 0);
        assert_eq!(stats.remaining, 0);
    }

    #[test]
    fn test_stats_counts_present() {
        let campers = vec![camper(1, true), camper(2, false), camper(3, true)];
        let stats = attendance_stats(&campers);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.present, 2);
        assert_eq!(stats.remaining, 1);
    }
}
