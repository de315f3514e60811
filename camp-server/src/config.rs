//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Default program fee, integer currency units (HNL)
const DEFAULT_CAMP_FEE: i32 = 3000;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Blob-store bucket for proof-of-payment receipts
    pub bucket_name: String,
    /// Service credential JSON (env: SERVICE_KEY), base64- or raw-JSON
    /// encoded; materialized once at startup into `service_key_path`
    pub service_key: Option<String>,
    /// Where the materialized credential file lives
    pub service_key_path: String,
    /// Program fee assigned to every new camper
    pub camp_fee: i32,
    /// Environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            bucket_name: std::env::var("BUCKET_NAME").map_err(|_| "BUCKET_NAME must be set")?,
            service_key: std::env::var("SERVICE_KEY").ok().filter(|s| !s.is_empty()),
            service_key_path: std::env::var("SERVICE_KEY_PATH")
                .unwrap_or_else(|_| "./service-key.json".into()),
            camp_fee: std::env::var("CAMP_FEE")
                .ok()
                .and_then(|f| f.parse().ok())
                .unwrap_or(DEFAULT_CAMP_FEE),
            environment,
        })
    }
}
