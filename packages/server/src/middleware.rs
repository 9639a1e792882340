use axum::{
    extract::{OriginalUri, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::state::AppState;

/// Session gate for the signed-in browser area.
///
/// This is a presence check only: any cookie whose name starts with the
/// provider prefix lets the request through. It does not verify the cookie,
/// so a forged or stale cookie passes the gate, but the API extractor behind
/// it still rejects invalid sessions. Unauthenticated visitors are
/// redirected to the sign-in page with the original path preserved for the
/// post-login hop.
pub async fn session_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let prefix = state.config.auth.cookie_prefix.as_str();

    let has_session_cookie = jar.iter().any(|cookie| cookie.name().starts_with(prefix));
    if has_session_cookie {
        return next.run(request).await;
    }

    // The gate sits behind a nest, so the visible URI has the prefix
    // stripped; the original path lives in the request extensions.
    let original_path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let target = format!(
        "{}?redirected_from={}",
        state.config.auth.sign_in_path, original_path
    );
    Redirect::temporary(&target).into_response()
}
