//! API routes for camp-server

pub mod attendance;
pub mod health;
pub mod payment;
pub mod receipt;
pub mod register;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/campers",
            post(register::register_camper).get(attendance::list_campers),
        )
        .route("/campers/{camper_id}", get(payment::camper_payments))
        .route(
            "/campers/{camper_id}/payments",
            post(payment::record_payment),
        )
        .route(
            "/campers/{camper_id}/attendance",
            put(attendance::set_attendance),
        )
        .route(
            "/campers/{camper_id}/payments/{payment_id}/receipt",
            get(receipt::download_receipt),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
