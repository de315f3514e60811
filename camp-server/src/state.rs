//! Application state for camp-server

use sqlx::PgPool;

use crate::config::Config;
use crate::storage::BlobStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Blob store holding proof-of-payment receipts
    pub blob: BlobStore,
    /// Program fee assigned to every new camper
    pub camp_fee: i32,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let blob = BlobStore::connect(config).await?;
        tracing::info!(bucket = %config.bucket_name, "Blob store ready");

        Ok(Self {
            pool,
            blob,
            camp_fee: config.camp_fee,
        })
    }
}
