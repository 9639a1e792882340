use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for deleting a stored object by key.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct DeleteObjectRequest {
    #[schema(example = "users/0193.../1730000000000-a1b2c3d4.mp4")]
    pub key: String,
}

/// Request body for uploading a client-captured thumbnail.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ThumbnailRequest {
    /// Key of the video the thumbnail belongs to.
    pub key: String,
    /// `data:image/...;base64,` URL captured from the first decoded frame.
    pub data_url: String,
}

pub fn validate_thumbnail_request(payload: &ThumbnailRequest) -> Result<(), AppError> {
    if payload.key.trim().is_empty() || payload.data_url.trim().is_empty() {
        return Err(AppError::Validation("Missing key or data URL".into()));
    }
    Ok(())
}

pub fn validate_object_key(key: &str) -> Result<(), AppError> {
    if key.trim().is_empty() {
        return Err(AppError::Validation("Missing key".into()));
    }
    Ok(())
}

/// Acknowledgement body for object mutations.
#[derive(Serialize, utoipa::ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}
