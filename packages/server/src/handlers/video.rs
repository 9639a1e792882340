use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use common::storage::key;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{coach_access, video};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::video::{
    CreateVideoRequest, ListVideosQuery, SetRatingRequest, UpdateVideoRequest, VideoItem,
    VideoListResponse, VideoResponse, validate_create_video_request, validate_rating_value,
    validate_update_video_request,
};
use crate::state::AppState;
use crate::utils::gallery;

/// Register an uploaded object as a video row.
///
/// Called once the direct upload has finished. An upload whose registration
/// never arrives leaves an orphaned object in storage; nothing here
/// reconciles that.
#[utoipa::path(
    post,
    path = "/api/v1/videos",
    tag = "Videos",
    operation_id = "createVideo",
    summary = "Register an uploaded video",
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Video registered", body = VideoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthenticated (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Key already registered (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id))]
pub async fn create_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateVideoRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_video_request(&payload)?;

    let object_key = payload.key.trim().to_string();
    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| {
            object_key
                .rsplit('/')
                .next()
                .unwrap_or(object_key.as_str())
                .to_string()
        });
    let content_type = payload
        .content_type
        .or_else(|| mime_guess::from_path(&name).first().map(|m| m.to_string()));

    let now = Utc::now();
    let new_video = video::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(auth_user.user_id),
        s3_key: Set(object_key),
        name: Set(name),
        content_type: Set(content_type),
        size: Set(payload.size),
        rating: Set(payload.rating),
        club: Set(None),
        shot_type: Set(None),
        notes: Set(None),
        favorite: Set(false),
        tags: Set(serde_json::json!([])),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = new_video.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("A video is already registered for this key".into())
        }
        _ => AppError::from(e),
    })?;

    Ok((StatusCode::CREATED, Json(VideoResponse::from(model))))
}

/// List the caller's library: their own videos plus those of every player
/// who granted their email coach access.
///
/// The grant resolution is recomputed on every request; there is no cache
/// to invalidate. Filtering and ordering happen in memory over the fetched
/// list, matching the gallery's behavior.
#[utoipa::path(
    get,
    path = "/api/v1/videos",
    tag = "Videos",
    operation_id = "listVideos",
    summary = "List visible videos",
    params(ListVideosQuery),
    responses(
        (status = 200, description = "Video list", body = VideoListResponse),
        (status = 401, description = "Unauthenticated (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Storage unavailable (UPSTREAM_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn list_videos(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListVideosQuery>,
) -> Result<Json<VideoListResponse>, AppError> {
    let owners = visible_owner_ids(&state, &auth_user).await?;

    let rows = video::Entity::find()
        .filter(video::Column::UserId.is_in(owners.clone()))
        .order_by_desc(video::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let thumbs = discover_thumbnails(&state, &owners).await;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(build_item(&state, row, &thumbs).await?);
    }

    gallery::apply(&mut items, query.min_rating, query.sort.unwrap_or_default());

    let total = items.len() as u64;
    Ok(Json(VideoListResponse {
        videos: items,
        total,
    }))
}

/// Fetch a single visible video with fresh access URLs.
#[utoipa::path(
    get,
    path = "/api/v1/videos/{id}",
    tag = "Videos",
    operation_id = "getVideo",
    summary = "Fetch one video",
    params(("id" = String, Path, description = "Video ID (UUID)")),
    responses(
        (status = 200, description = "Video", body = VideoItem),
        (status = 401, description = "Unauthenticated (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not visible (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VideoItem>, AppError> {
    let model = find_video(&state, &id).await?;

    let owners = visible_owner_ids(&state, &auth_user).await?;
    if !owners.contains(&model.user_id) {
        return Err(AppError::NotFound("Video not found".into()));
    }

    let thumbs = discover_thumbnails(&state, std::slice::from_ref(&model.user_id)).await;
    let item = build_item(&state, model, &thumbs).await?;
    Ok(Json(item))
}

/// Column-level metadata update.
///
/// Only the columns named in the request are written; concurrent edits to
/// different fields do not clobber each other, while same-field races keep
/// plain last-write-wins semantics. Deliberately not wrapped in a
/// transaction.
#[utoipa::path(
    patch,
    path = "/api/v1/videos/{id}",
    tag = "Videos",
    operation_id = "updateVideo",
    summary = "Update video metadata",
    params(("id" = String, Path, description = "Video ID (UUID)")),
    request_body = UpdateVideoRequest,
    responses(
        (status = 200, description = "Updated video", body = VideoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthenticated (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id))]
pub async fn update_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateVideoRequest>,
) -> Result<Json<VideoResponse>, AppError> {
    validate_update_video_request(&payload)?;

    let existing = find_owned_video(&state, &id, &auth_user).await?;

    if payload == UpdateVideoRequest::default() {
        return Ok(Json(existing.into()));
    }

    let mut active: video::ActiveModel = existing.into();
    if let Some(rating) = payload.rating {
        active.rating = Set(rating);
    }
    if let Some(club) = payload.club {
        active.club = Set(club);
    }
    if let Some(shot_type) = payload.shot_type {
        active.shot_type = Set(shot_type);
    }
    if let Some(notes) = payload.notes {
        active.notes = Set(notes);
    }
    if let Some(favorite) = payload.favorite {
        active.favorite = Set(favorite);
    }
    if let Some(tags) = payload.tags {
        active.tags = Set(serde_json::json!(tags));
    }
    active.updated_at = Set(Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

/// Set the rating for a swing.
#[utoipa::path(
    put,
    path = "/api/v1/videos/{id}/rating",
    tag = "Videos",
    operation_id = "setRating",
    summary = "Rate a swing",
    params(("id" = String, Path, description = "Video ID (UUID)")),
    request_body = SetRatingRequest,
    responses(
        (status = 200, description = "Updated video", body = VideoResponse),
        (status = 400, description = "Rating out of range (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthenticated (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id))]
pub async fn set_rating(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<SetRatingRequest>,
) -> Result<Json<VideoResponse>, AppError> {
    validate_rating_value(payload.rating)?;

    let existing = find_owned_video(&state, &id, &auth_user).await?;

    let mut active: video::ActiveModel = existing.into();
    active.rating = Set(Some(payload.rating));
    active.updated_at = Set(Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

/// Delete a video row.
///
/// The storage object and its thumbnail sidecar are left in place; removing
/// them is a separate, explicit object deletion.
#[utoipa::path(
    delete,
    path = "/api/v1/videos/{id}",
    tag = "Videos",
    operation_id = "deleteVideo",
    summary = "Delete a video row",
    params(("id" = String, Path, description = "Video ID (UUID)")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthenticated (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found or not owned (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn delete_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let existing = find_owned_video(&state, &id, &auth_user).await?;

    video::Entity::delete_by_id(existing.id)
        .exec(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Owner ids whose videos the caller may read: themselves plus every player
/// who granted this email.
async fn visible_owner_ids(state: &AppState, auth_user: &AuthUser) -> Result<Vec<Uuid>, AppError> {
    let grants = coach_access::Entity::find()
        .filter(coach_access::Column::CoachEmail.eq(&auth_user.email))
        .all(&state.db)
        .await?;

    let mut owners = vec![auth_user.user_id];
    for grant in grants {
        if !owners.contains(&grant.player_id) {
            owners.push(grant.player_id);
        }
    }
    Ok(owners)
}

/// One listing pass per owner prefix, keeping only thumbnail sidecar keys.
///
/// A failed listing degrades to "no thumbnails" for that owner instead of
/// failing the whole library, mirroring how sidecar fetch errors have
/// always been swallowed per item.
async fn discover_thumbnails(state: &AppState, owners: &[Uuid]) -> HashSet<String> {
    let mut thumbs = HashSet::new();
    for owner in owners {
        match state.gateway.list_objects(&key::owner_prefix(*owner)).await {
            Ok(entries) => thumbs.extend(
                entries
                    .into_iter()
                    .map(|entry| entry.key)
                    .filter(|k| k.ends_with(key::THUMB_SUFFIX)),
            ),
            Err(err) => {
                tracing::warn!(owner = %owner, "thumbnail discovery failed: {err}");
            }
        }
    }
    thumbs
}

/// Attach presigned playback (and, when present, thumbnail) URLs to a row.
async fn build_item(
    state: &AppState,
    model: video::Model,
    thumbs: &HashSet<String>,
) -> Result<VideoItem, AppError> {
    let storage = &state.config.storage;

    let url = state
        .gateway
        .presign_download(&model.s3_key, storage.video_url_expiry_secs)
        .await?;

    let thumb = key::thumb_key(&model.s3_key);
    let thumbnail_url = if thumbs.contains(&thumb) {
        Some(
            state
                .gateway
                .presign_download(&thumb, storage.sidecar_url_expiry_secs)
                .await?,
        )
    } else {
        None
    };

    Ok(VideoItem::from_model(model, Some(url), thumbnail_url))
}

async fn find_video(state: &AppState, id: &str) -> Result<video::Model, AppError> {
    let video_id =
        Uuid::parse_str(id).map_err(|_| AppError::Validation("Invalid video ID".into()))?;

    video::Entity::find_by_id(video_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".into()))
}

/// Fetch a video the caller owns. Someone else's video reads as missing.
async fn find_owned_video(
    state: &AppState,
    id: &str,
    auth_user: &AuthUser,
) -> Result<video::Model, AppError> {
    let model = find_video(state, id).await?;
    if model.user_id != auth_user.user_id {
        return Err(AppError::NotFound("Video not found".into()));
    }
    Ok(model)
}
