use axum::{Json, extract::State};
use common::storage::key;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::upload::{
    UploadCredentialRequest, UploadCredentialResponse, validate_upload_credential_request,
};
use crate::state::AppState;

/// Issue a presigned upload credential.
///
/// The client PUTs the file straight to object storage with the returned
/// URL; this process never sees the video bytes. The derived key is unique
/// per call, so retrying a failed upload issues a fresh object rather than
/// overwriting.
#[utoipa::path(
    post,
    path = "/api/v1/uploads",
    tag = "Uploads",
    operation_id = "requestUploadCredential",
    summary = "Request a presigned upload credential",
    request_body = UploadCredentialRequest,
    responses(
        (status = 200, description = "Credential issued", body = UploadCredentialResponse),
        (status = 400, description = "Missing filename or content type (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthenticated (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Storage unavailable or unconfigured (UPSTREAM_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id))]
pub async fn request_upload_credential(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UploadCredentialRequest>,
) -> Result<Json<UploadCredentialResponse>, AppError> {
    validate_upload_credential_request(&payload)?;

    let storage = &state.config.storage;
    let content_type = payload.content_type.trim();
    let object_key = key::derive_upload_key(auth_user.user_id, payload.filename.trim());

    let upload_url = state
        .gateway
        .presign_upload(&object_key, content_type, storage.upload_expiry_secs)
        .await?;

    let public_url = if storage.public_base_url.is_empty() {
        None
    } else {
        Some(format!(
            "{}/{}",
            storage.public_base_url.trim_end_matches('/'),
            object_key
        ))
    };

    Ok(Json(UploadCredentialResponse {
        upload_url,
        key: object_key,
        public_url,
        expires_in: storage.upload_expiry_secs,
    }))
}
