//! In-memory gateway implementations.
//!
//! [`MemoryGateway`] backs unit and integration tests without external
//! dependencies. [`UnconfiguredGateway`] stands in when storage settings
//! are absent so the process can still boot and answer requests with a
//! descriptive failure.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::error::{GatewayError, GatewayResult};
use super::traits::{BlobGateway, ObjectEntry};

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub last_modified: DateTime<Utc>,
}

/// Test-only gateway keeping objects in a `HashMap` behind an `RwLock`.
///
/// Presigned URLs use a `memory://` scheme; they carry the expiry as a
/// query parameter so tests can assert on the documented windows.
#[derive(Default)]
pub struct MemoryGateway {
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object directly, bypassing the presign flow.
    pub async fn insert(&self, key: &str, bytes: Vec<u8>, content_type: &str) {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
                last_modified: Utc::now(),
            },
        );
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }

    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }
}

#[async_trait]
impl BlobGateway for MemoryGateway {
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        expiry_secs: u32,
    ) -> GatewayResult<String> {
        Ok(format!(
            "memory://upload/{key}?content-type={content_type}&expires={expiry_secs}"
        ))
    }

    async fn presign_download(&self, key: &str, expiry_secs: u32) -> GatewayResult<String> {
        Ok(format!("memory://download/{key}?expires={expiry_secs}"))
    }

    async fn put_object(&self, key: &str, bytes: &[u8], content_type: &str) -> GatewayResult<()> {
        self.insert(key, bytes.to_vec(), content_type).await;
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> GatewayResult<()> {
        // No existence check: deleting a missing key is a success.
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn list_objects(&self, prefix: &str) -> GatewayResult<Vec<ObjectEntry>> {
        let objects = self.objects.read().await;
        let mut entries: Vec<ObjectEntry> = objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, obj)| ObjectEntry {
                key: key.clone(),
                size: obj.bytes.len() as u64,
                last_modified: obj.last_modified,
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }
}

/// Gateway used when object storage was never configured.
///
/// Every call fails with the list of missing settings, so a process with
/// incomplete environment still starts and reports the problem on the
/// requests that actually need storage.
pub struct UnconfiguredGateway {
    missing: String,
}

impl UnconfiguredGateway {
    pub fn new(missing_settings: &[&str]) -> Self {
        Self {
            missing: format!("missing settings: {}", missing_settings.join(", ")),
        }
    }

    fn err(&self) -> GatewayError {
        GatewayError::NotConfigured(self.missing.clone())
    }
}

#[async_trait]
impl BlobGateway for UnconfiguredGateway {
    async fn presign_upload(&self, _: &str, _: &str, _: u32) -> GatewayResult<String> {
        Err(self.err())
    }

    async fn presign_download(&self, _: &str, _: u32) -> GatewayResult<String> {
        Err(self.err())
    }

    async fn put_object(&self, _: &str, _: &[u8], _: &str) -> GatewayResult<()> {
        Err(self.err())
    }

    async fn delete_object(&self, _: &str) -> GatewayResult<()> {
        Err(self.err())
    }

    async fn list_objects(&self, _: &str) -> GatewayResult<Vec<ObjectEntry>> {
        Err(self.err())
    }
}
