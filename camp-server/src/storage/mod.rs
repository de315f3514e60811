//! Blob-store client for proof-of-payment receipts
//!
//! Receipts live at `{camper_id}/{payment_id}_proofOfPayment.{ext}` inside
//! a single bucket. The client is constructed once at startup and carried
//! in [`AppState`](crate::state::AppState); handlers never build their own.

pub mod sniff;

use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::config::Credentials;

use crate::config::Config;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Write seam for proof-of-payment uploads; [`BlobStore`] is the
/// production implementation.
pub(crate) trait ProofStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), BoxError>;
}

impl ProofStorage for BlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), BoxError> {
        BlobStore::put(self, key, bytes, content_type).await
    }
}

/// Static service credential, materialized from the SERVICE_KEY env var
/// into a local JSON file at startup (see [`materialize_service_key`]).
#[derive(serde::Serialize, serde::Deserialize)]
struct ServiceKey {
    access_key_id: String,
    secret_access_key: String,
    #[serde(default)]
    region: Option<String>,
}

/// Thin wrapper over the S3 client, scoped to the receipt bucket
#[derive(Clone)]
pub struct BlobStore {
    client: S3Client,
    bucket: String,
}

impl BlobStore {
    /// Build the client. Prefers the materialized service-key file when one
    /// exists; otherwise falls back to the SDK's default credential chain.
    pub async fn connect(config: &Config) -> Result<Self, BoxError> {
        materialize_service_key(config)?;

        let behavior = aws_config::BehaviorVersion::latest();
        let aws_config = match load_service_key(&config.service_key_path)? {
            Some(key) => {
                let credentials = Credentials::new(
                    key.access_key_id,
                    key.secret_access_key,
                    None,
                    None,
                    "service-key",
                );
                let mut loader =
                    aws_config::defaults(behavior).credentials_provider(credentials);
                if let Some(region) = key.region {
                    loader = loader.region(aws_config::Region::new(region));
                }
                loader.load().await
            }
            None => aws_config::load_defaults(behavior).await,
        };

        Ok(Self {
            client: S3Client::new(&aws_config),
            bucket: config.bucket_name.clone(),
        })
    }

    /// Upload an object with its declared content type as metadata
    pub async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), BoxError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(bytes.into())
            .content_type(content_type)
            .send()
            .await?;
        Ok(())
    }

    /// Download an object fully into memory
    pub async fn get(&self, key: &str) -> Result<Vec<u8>, BoxError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await?;
        let data = output.body.collect().await?.into_bytes();
        Ok(data.to_vec())
    }
}

/// Write the SERVICE_KEY env value to the credential file, once, if the
/// file does not already exist. The value may be raw JSON or base64-encoded
/// JSON; both are normalized to pretty-printed JSON on disk.
fn materialize_service_key(config: &Config) -> Result<(), BoxError> {
    let Some(ref service_key) = config.service_key else {
        return Ok(());
    };
    let path = std::path::Path::new(&config.service_key_path);
    if path.exists() {
        return Ok(());
    }

    tracing::info!("Creating {} from SERVICE_KEY", config.service_key_path);
    let raw = decode_service_key(service_key);
    let value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| format!("SERVICE_KEY is not valid JSON: {e}"))?;
    std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    Ok(())
}

/// Accept either raw JSON or base64-encoded JSON
fn decode_service_key(value: &str) -> String {
    use base64::Engine;
    if value.trim_start().starts_with('{') {
        return value.to_string();
    }
    match base64::engine::general_purpose::STANDARD.decode(value.trim()) {
        Ok(bytes) => String::from_utf8(bytes).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

fn load_service_key(path: &str) -> Result<Option<ServiceKey>, BoxError> {
    let path = std::path::Path::new(path);
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let key: ServiceKey = serde_json::from_str(&contents)
        .map_err(|e| format!("Invalid service-key file: {e}"))?;
    Ok(Some(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_raw_json() {
        let raw = r#"{"access_key_id":"a","secret_access_key":"b"}"#;
        assert_eq!(decode_service_key(raw), raw);
    }

    #[test]
    fn test_decode_base64_json() {
        use base64::Engine;
        let raw = r#"{"access_key_id":"a","secret_access_key":"b"}"#;
        let encoded = base64::engine::general_purpose::STANDARD.encode(raw);
        assert_eq!(decode_service_key(&encoded), raw);
    }

    #[test]
    fn test_materialize_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service-key.json");
        let config = Config {
            database_url: "postgres://unused".into(),
            http_port: 8080,
            bucket_name: "receipts".into(),
            service_key: Some(
                r#"{"access_key_id":"AKIA","secret_access_key":"shh","region":"us-east-1"}"#
                    .into(),
            ),
            service_key_path: path.to_string_lossy().into_owned(),
            camp_fee: 3000,
            environment: "development".into(),
        };

        materialize_service_key(&config).unwrap();
        let key = load_service_key(&config.service_key_path).unwrap().unwrap();
        assert_eq!(key.access_key_id, "AKIA");
        assert_eq!(key.region.as_deref(), Some("us-east-1"));

        // Second call is a no-op, the file already exists
        materialize_service_key(&config).unwrap();
    }

    #[test]
    fn test_load_missing_file_is_none() {
        assert!(load_service_key("/nonexistent/service-key.json")
            .unwrap()
            .is_none());
    }
}
