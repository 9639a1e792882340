use async_trait::async_trait;
use chrono::{DateTime, Utc};
use http::HeaderMap;
use http::header::CONTENT_TYPE;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::debug;

use super::error::{GatewayError, GatewayResult};
use super::traits::{BlobGateway, ObjectEntry};

/// Connection settings for an S3 or S3-compatible store.
///
/// `endpoint` is empty for AWS proper; set it (with `path_style`) for
/// MinIO, R2 and friends.
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub region: String,
    pub endpoint: String,
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub path_style: bool,
}

/// Production gateway wrapping a `rust-s3` bucket handle.
///
/// The handle is built once at startup and shared for the life of the
/// process. Failures map onto the flat [`GatewayError`] taxonomy; there is
/// no retry here.
pub struct S3Gateway {
    bucket: Box<Bucket>,
}

impl S3Gateway {
    pub fn new(settings: &S3Settings) -> GatewayResult<Self> {
        let region: Region = if settings.endpoint.is_empty() {
            settings
                .region
                .parse()
                .map_err(|e| GatewayError::Config(format!("bad region: {e}")))?
        } else {
            Region::Custom {
                region: settings.region.clone(),
                endpoint: settings.endpoint.clone(),
            }
        };

        let credentials = Credentials::new(
            Some(&settings.access_key_id),
            Some(&settings.secret_access_key),
            None,
            None,
            None,
        )
        .map_err(|e| GatewayError::Config(format!("bad credentials: {e}")))?;

        let mut bucket = Bucket::new(&settings.bucket, region, credentials)
            .map_err(|e| GatewayError::Config(format!("bad bucket: {e}")))?;
        if settings.path_style {
            bucket = bucket.with_path_style();
        }

        Ok(Self { bucket })
    }
}

#[async_trait]
impl BlobGateway for S3Gateway {
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        expiry_secs: u32,
    ) -> GatewayResult<String> {
        let mut headers = HeaderMap::new();
        if let Ok(value) = content_type.parse() {
            headers.insert(CONTENT_TYPE, value);
        }

        let url = self
            .bucket
            .presign_put(key, expiry_secs, Some(headers), None)
            .await?;
        debug!(key, expiry_secs, "issued presigned PUT");
        Ok(url)
    }

    async fn presign_download(&self, key: &str, expiry_secs: u32) -> GatewayResult<String> {
        Ok(self.bucket.presign_get(key, expiry_secs, None).await?)
    }

    async fn put_object(&self, key: &str, bytes: &[u8], content_type: &str) -> GatewayResult<()> {
        self.bucket
            .put_object_with_content_type(key, bytes, content_type)
            .await?;
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> GatewayResult<()> {
        // S3 DELETE succeeds for missing keys, which gives us idempotency
        // for free.
        self.bucket.delete_object(key).await?;
        Ok(())
    }

    async fn list_objects(&self, prefix: &str) -> GatewayResult<Vec<ObjectEntry>> {
        let pages = self.bucket.list(prefix.to_string(), None).await?;

        let mut entries = Vec::new();
        for page in pages {
            for object in page.contents {
                entries.push(ObjectEntry {
                    key: object.key,
                    size: object.size,
                    last_modified: parse_last_modified(&object.last_modified),
                });
            }
        }
        Ok(entries)
    }
}

impl From<s3::error::S3Error> for GatewayError {
    fn from(err: s3::error::S3Error) -> Self {
        GatewayError::Upstream(err.to_string())
    }
}

fn parse_last_modified(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
