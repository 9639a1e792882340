use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::GatewayResult;

/// Descriptor for one stored object, as returned by a LIST operation.
///
/// Listings return everything under a prefix; callers separate playable
/// videos from sidecar objects by the suffix conventions in [`super::key`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub key: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

/// Gateway to the object store holding swing videos and their sidecars.
///
/// Clients never stream video bytes through this process: uploads and
/// playback go directly to storage via the presigned URLs issued here. The
/// only server-side write is the thumbnail sidecar. Implementations are
/// constructed once at startup and injected as `Arc<dyn BlobGateway>`.
#[async_trait]
pub trait BlobGateway: Send + Sync {
    /// Issue a time-limited URL authorizing a single PUT of `key`.
    ///
    /// The content type is pinned into the signature so the upload cannot
    /// smuggle a different media type.
    async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        expiry_secs: u32,
    ) -> GatewayResult<String>;

    /// Issue a short-lived read URL for playback or sidecar retrieval.
    async fn presign_download(&self, key: &str, expiry_secs: u32) -> GatewayResult<String>;

    /// Write an object server-side. Overwrites without versioning.
    async fn put_object(&self, key: &str, bytes: &[u8], content_type: &str) -> GatewayResult<()>;

    /// Delete an object. Idempotent: deleting a missing key succeeds.
    async fn delete_object(&self, key: &str) -> GatewayResult<()>;

    /// List every object under `prefix`.
    async fn list_objects(&self, prefix: &str) -> GatewayResult<Vec<ObjectEntry>>;
}
