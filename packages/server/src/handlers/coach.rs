use axum::{Json, extract::State};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::instrument;

use crate::entity::coach_access;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::coach::{
    CoachEmailRequest, CoachGrantListResponse, CoachGrantResponse, normalize_coach_email,
};
use crate::models::object::OkResponse;
use crate::state::AppState;

/// Grant a coach read access to the caller's videos.
///
/// Granting the same coach twice is a successful no-op: the duplicate
/// insert is swallowed and exactly one row remains.
#[utoipa::path(
    post,
    path = "/api/v1/coach/grants",
    tag = "Coach access",
    operation_id = "grantCoachAccess",
    summary = "Share the library with a coach",
    request_body = CoachEmailRequest,
    responses(
        (status = 200, description = "Granted (idempotent)", body = OkResponse),
        (status = 400, description = "Invalid email (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthenticated (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id))]
pub async fn grant_access(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CoachEmailRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let email = normalize_coach_email(&payload.coach_email)?;

    let grant = coach_access::ActiveModel {
        player_id: Set(auth_user.user_id),
        coach_email: Set(email),
        created_at: Set(Utc::now()),
    };

    let result = coach_access::Entity::insert(grant)
        .on_conflict(
            OnConflict::columns([
                coach_access::Column::PlayerId,
                coach_access::Column::CoachEmail,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&state.db)
        .await;

    match result {
        Ok(_) | Err(DbErr::RecordNotInserted) => Ok(Json(OkResponse { ok: true })),
        Err(e) => Err(e.into()),
    }
}

/// List the caller's grants, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/coach/grants",
    tag = "Coach access",
    operation_id = "listCoachGrants",
    summary = "List shared coaches",
    responses(
        (status = 200, description = "Grant list", body = CoachGrantListResponse),
        (status = 401, description = "Unauthenticated (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn list_grants(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<CoachGrantListResponse>, AppError> {
    let grants = coach_access::Entity::find()
        .filter(coach_access::Column::PlayerId.eq(auth_user.user_id))
        .order_by_desc(coach_access::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let total = grants.len() as u64;
    let coaches = grants.into_iter().map(CoachGrantResponse::from).collect();

    Ok(Json(CoachGrantListResponse { coaches, total }))
}

/// Revoke a coach's access by exact (player, email) pair.
///
/// Revoking a grant that does not exist is a silent no-op, so no email
/// shape validation here: an address that was never grantable matches
/// nothing and succeeds the same way.
#[utoipa::path(
    delete,
    path = "/api/v1/coach/grants",
    tag = "Coach access",
    operation_id = "revokeCoachAccess",
    summary = "Revoke a coach's access",
    request_body = CoachEmailRequest,
    responses(
        (status = 200, description = "Revoked (or never existed)", body = OkResponse),
        (status = 401, description = "Unauthenticated (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = %auth_user.user_id))]
pub async fn revoke_access(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CoachEmailRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let email = payload.coach_email.trim().to_lowercase();

    coach_access::Entity::delete_many()
        .filter(coach_access::Column::PlayerId.eq(auth_user.user_id))
        .filter(coach_access::Column::CoachEmail.eq(email))
        .exec(&state.db)
        .await?;

    Ok(Json(OkResponse { ok: true }))
}
