use axum::{Json, extract::State};
use common::storage::key;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::object::{
    DeleteObjectRequest, OkResponse, ThumbnailRequest, validate_object_key,
    validate_thumbnail_request,
};
use crate::state::AppState;

/// Delete a stored object by key.
///
/// Idempotent, and strictly scoped to the object named: the metadata row
/// and any sidecars survive. Cleaning those up is the caller's problem;
/// the dangling-object tradeoff is documented, not reconciled.
#[utoipa::path(
    delete,
    path = "/api/v1/objects",
    tag = "Objects",
    operation_id = "deleteObject",
    summary = "Delete a stored object",
    request_body = DeleteObjectRequest,
    responses(
        (status = 200, description = "Deleted (or already absent)", body = OkResponse),
        (status = 400, description = "Missing key (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthenticated (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Key outside caller's namespace (PERMISSION_DENIED)", body = ErrorBody),
        (status = 500, description = "Storage unavailable (UPSTREAM_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id))]
pub async fn delete_object(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<DeleteObjectRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let object_key = payload.key.trim();
    validate_object_key(object_key)?;

    if !key::is_owned_by(object_key, auth_user.user_id) {
        return Err(AppError::PermissionDenied);
    }

    state.gateway.delete_object(object_key).await?;
    Ok(Json(OkResponse { ok: true }))
}

/// Store a client-captured thumbnail next to its video.
///
/// The browser grabs the first decoded frame onto a canvas and sends it as
/// a base64 data URL; it lands at `<video-key>.thumb.jpg`.
#[utoipa::path(
    post,
    path = "/api/v1/objects/thumbnail",
    tag = "Objects",
    operation_id = "uploadThumbnail",
    summary = "Upload a thumbnail sidecar",
    request_body = ThumbnailRequest,
    responses(
        (status = 200, description = "Thumbnail stored", body = OkResponse),
        (status = 400, description = "Missing or undecodable payload (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthenticated (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Key outside caller's namespace (PERMISSION_DENIED)", body = ErrorBody),
        (status = 500, description = "Storage unavailable (UPSTREAM_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id))]
pub async fn upload_thumbnail(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ThumbnailRequest>,
) -> Result<Json<OkResponse>, AppError> {
    validate_thumbnail_request(&payload)?;

    let object_key = payload.key.trim();
    if !key::is_owned_by(object_key, auth_user.user_id) {
        return Err(AppError::PermissionDenied);
    }

    let bytes =
        crate::utils::data_url::decode_image_data_url(&payload.data_url).map_err(AppError::Validation)?;

    state
        .gateway
        .put_object(&key::thumb_key(object_key), &bytes, "image/jpeg")
        .await?;

    Ok(Json(OkResponse { ok: true }))
}
