use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for issuing a presigned upload credential.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UploadCredentialRequest {
    /// Original client-side filename; only its extension survives into the
    /// derived storage key.
    #[schema(example = "driver-swing.mp4")]
    pub filename: String,
    /// MIME type the client will send. Pinned into the signature.
    #[schema(example = "video/mp4")]
    pub content_type: String,
}

pub fn validate_upload_credential_request(
    payload: &UploadCredentialRequest,
) -> Result<(), AppError> {
    if payload.filename.trim().is_empty() || payload.content_type.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing filename or content type".into(),
        ));
    }
    if !payload.content_type.contains('/') {
        return Err(AppError::Validation(
            "Content type must be a MIME type".into(),
        ));
    }
    Ok(())
}

/// Presigned upload credential.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadCredentialResponse {
    /// URL authorizing a single direct PUT of the object.
    pub upload_url: String,
    /// Storage key derived for this upload; unique per call.
    #[schema(example = "users/0193.../1730000000000-a1b2c3d4.mp4")]
    pub key: String,
    /// Public address of the object once uploaded, when a public base URL
    /// is configured.
    pub public_url: Option<String>,
    /// Credential lifetime in seconds.
    #[schema(example = 600)]
    pub expires_in: u32,
}
