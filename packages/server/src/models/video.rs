use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::video;
use crate::error::AppError;
use crate::models::shared::double_option;
use crate::utils::gallery::SortKey;

/// Request body for registering an uploaded object as a video.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateVideoRequest {
    /// Storage key returned by the upload-credential endpoint.
    #[schema(example = "users/0193.../1730000000000-a1b2c3d4.mp4")]
    pub key: String,
    /// Display name; defaults to the key's filename segment.
    pub name: Option<String>,
    pub content_type: Option<String>,
    /// Object size in bytes, as observed by the uploading client.
    pub size: Option<i64>,
    /// Optional initial rating (1-10).
    pub rating: Option<i16>,
}

pub fn validate_create_video_request(payload: &CreateVideoRequest) -> Result<(), AppError> {
    if payload.key.trim().is_empty() {
        return Err(AppError::Validation("Missing key".into()));
    }
    if let Some(rating) = payload.rating {
        validate_rating_value(rating)?;
    }
    Ok(())
}

/// Request body for the column-level metadata update.
///
/// Absent fields are left untouched; explicit `null` clears a nullable
/// column. Each request writes only the columns it names.
#[derive(Default, PartialEq, Deserialize, utoipa::ToSchema)]
pub struct UpdateVideoRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i16>)]
    pub rating: Option<Option<i16>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub club: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub shot_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
    pub favorite: Option<bool>,
    pub tags: Option<Vec<String>>,
}

pub fn validate_update_video_request(payload: &UpdateVideoRequest) -> Result<(), AppError> {
    if let Some(Some(rating)) = payload.rating {
        validate_rating_value(rating)?;
    }
    Ok(())
}

/// Request body for the dedicated rating endpoint.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SetRatingRequest {
    /// Swing rating, 1-10.
    #[schema(example = 7)]
    pub rating: i16,
}

pub fn validate_rating_value(rating: i16) -> Result<(), AppError> {
    if !(1..=10).contains(&rating) {
        return Err(AppError::Validation("Rating must be 1-10".into()));
    }
    Ok(())
}

/// Query parameters for the library listing.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ListVideosQuery {
    /// Keep only items whose rating (unrated counts as 0) meets this.
    pub min_rating: Option<i16>,
    /// One of `newest`, `highest`, `lowest`. Defaults to `newest`.
    pub sort: Option<SortKey>,
}

/// A video row as stored, without presigned URLs.
#[derive(Serialize, utoipa::ToSchema)]
pub struct VideoResponse {
    pub id: String,
    /// Storage key of the video object.
    pub key: String,
    pub name: String,
    pub content_type: Option<String>,
    pub size: Option<i64>,
    pub rating: Option<i16>,
    pub club: Option<String>,
    pub shot_type: Option<String>,
    pub notes: Option<String>,
    pub favorite: bool,
    pub tags: Vec<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<video::Model> for VideoResponse {
    fn from(model: video::Model) -> Self {
        let tags = serde_json::from_value(model.tags).unwrap_or_default();
        Self {
            id: model.id.to_string(),
            key: model.s3_key,
            name: model.name,
            content_type: model.content_type,
            size: model.size,
            rating: model.rating,
            club: model.club,
            shot_type: model.shot_type,
            notes: model.notes,
            favorite: model.favorite,
            tags,
            user_id: model.user_id.to_string(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// A library item: the stored row plus short-lived access URLs.
#[derive(Serialize, utoipa::ToSchema)]
pub struct VideoItem {
    pub id: String,
    pub key: String,
    pub name: String,
    /// Presigned playback URL.
    pub url: Option<String>,
    /// Presigned thumbnail URL, when a thumbnail sidecar exists.
    pub thumbnail_url: Option<String>,
    pub rating: Option<i16>,
    pub club: Option<String>,
    pub shot_type: Option<String>,
    pub notes: Option<String>,
    pub favorite: bool,
    pub tags: Vec<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VideoItem {
    pub fn from_model(
        model: video::Model,
        url: Option<String>,
        thumbnail_url: Option<String>,
    ) -> Self {
        let row = VideoResponse::from(model);
        Self {
            id: row.id,
            key: row.key,
            name: row.name,
            url,
            thumbnail_url,
            rating: row.rating,
            club: row.club,
            shot_type: row.shot_type,
            notes: row.notes,
            favorite: row.favorite,
            tags: row.tags,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Response for the library listing.
#[derive(Serialize, utoipa::ToSchema)]
pub struct VideoListResponse {
    pub videos: Vec<VideoItem>,
    pub total: u64,
}
