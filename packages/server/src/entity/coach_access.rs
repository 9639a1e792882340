use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Grant allowing a coach (identified by email) to read a player's videos.
/// The composite key makes the (player, coach) pair unique by construction.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coach_access")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub player_id: Uuid,

    /// Lower-cased coach email.
    #[sea_orm(primary_key, auto_increment = false)]
    pub coach_email: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
