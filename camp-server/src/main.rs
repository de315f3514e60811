//! camp-server: camp registration service
//!
//! Long-running service that:
//! - Registers campers (form validation + phone formatting)
//! - Records payments (cash/transfer) with optional proof-of-payment upload
//! - Tracks attendance and serves the administrative roster
//! - Streams proof-of-payment receipts back from the blob store

mod api;
mod config;
mod db;
mod error;
mod state;
mod storage;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "camp_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting camp-server (env: {})", config.environment);

    // Initialize application state
    let state = AppState::new(&config).await?;

    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("camp-server HTTP listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
