use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video")]
pub struct Model {
    /// UUIDv7 primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owner identity as issued by the auth provider.
    pub user_id: Uuid,

    /// Storage key of the uploaded object. At most one metadata row exists
    /// per key.
    #[sea_orm(unique)]
    pub s3_key: String,

    /// Display name, defaulting to the uploaded filename.
    pub name: String,

    pub content_type: Option<String>,

    /// Purposefully denormalized to avoid a storage HEAD per list item.
    pub size: Option<i64>,

    /// Swing rating, 1-10, or NULL when unrated.
    pub rating: Option<i16>,

    pub club: Option<String>,
    pub shot_type: Option<String>,
    pub notes: Option<String>,
    pub favorite: bool,

    /// JSON array of tag strings.
    pub tags: Json,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
