use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::session;

/// Authenticated user read from the auth provider's session cookie.
///
/// The provider sets cookies whose names start with the configured prefix;
/// the first such cookie's value is verified as a session token. Add this
/// as a handler parameter to require authentication.
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let prefix = state.config.auth.cookie_prefix.as_str();

        let token = jar
            .iter()
            .find(|cookie| cookie.name().starts_with(prefix))
            .map(|cookie| cookie.value().to_string())
            .ok_or(AppError::TokenMissing)?;

        let claims = session::verify(&token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::TokenInvalid)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::TokenInvalid)?;

        Ok(AuthUser {
            user_id,
            email: claims.email.to_lowercase(),
        })
    }
}
