pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::Modify;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Golf Cloud API",
        version = "1.0.0",
        description = "Swing-video library: presigned uploads, metadata, coach sharing"
    ),
    paths(
        handlers::health::health,
        handlers::upload::request_upload_credential,
        handlers::video::create_video,
        handlers::video::list_videos,
        handlers::video::get_video,
        handlers::video::update_video,
        handlers::video::set_rating,
        handlers::video::delete_video,
        handlers::object::delete_object,
        handlers::object::upload_thumbnail,
        handlers::coach::grant_access,
        handlers::coach::list_grants,
        handlers::coach::revoke_access,
    ),
    components(schemas(
        error::ErrorBody,
        models::upload::UploadCredentialRequest,
        models::upload::UploadCredentialResponse,
        models::video::CreateVideoRequest,
        models::video::UpdateVideoRequest,
        models::video::SetRatingRequest,
        models::video::VideoResponse,
        models::video::VideoItem,
        models::video::VideoListResponse,
        models::object::DeleteObjectRequest,
        models::object::ThumbnailRequest,
        models::object::OkResponse,
        models::coach::CoachEmailRequest,
        models::coach::CoachGrantResponse,
        models::coach::CoachGrantListResponse,
        handlers::health::HealthResponse,
        utils::gallery::SortKey,
    )),
    tags(
        (name = "Uploads", description = "Presigned upload credentials"),
        (name = "Videos", description = "Video metadata rows and the library listing"),
        (name = "Objects", description = "Raw object deletion and thumbnail sidecars"),
        (name = "Coach access", description = "Sharing a library with a coach"),
        (name = "Health", description = "Liveness"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "session",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("gc-auth-token"))),
        );
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);

    // Signed-in app shell: static files behind the session gate.
    let gated_app: axum::Router<AppState> = axum::Router::new()
        .fallback_service(ServeDir::new(&state.config.server.app_dir))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_gate,
        ));

    let router = axum::Router::new()
        .nest("/api", routes::api_routes())
        .nest("/uploads-app", gated_app)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()));

    match cors {
        Some(layer) => router.layer(layer),
        None => router,
    }
}

fn cors_layer(cfg: &CorsConfig) -> Option<CorsLayer> {
    if cfg.allow_origins.is_empty() {
        return None;
    }

    let origins: Vec<HeaderValue> = cfg
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::PUT,
                Method::DELETE,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(Duration::from_secs(cfg.max_age)),
    )
}
