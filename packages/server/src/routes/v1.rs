use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/uploads", post(handlers::upload::request_upload_credential))
        .nest("/videos", video_routes())
        .nest("/objects", object_routes())
        .nest("/coach", coach_routes())
}

fn video_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::video::list_videos).post(handlers::video::create_video),
        )
        .route(
            "/{id}",
            get(handlers::video::get_video)
                .patch(handlers::video::update_video)
                .delete(handlers::video::delete_video),
        )
        .route("/{id}/rating", put(handlers::video::set_rating))
}

fn object_routes() -> Router<AppState> {
    Router::new()
        .route("/", delete(handlers::object::delete_object))
        .route("/thumbnail", post(handlers::object::upload_thumbnail))
}

fn coach_routes() -> Router<AppState> {
    Router::new().route(
        "/grants",
        post(handlers::coach::grant_access)
            .get(handlers::coach::list_grants)
            .delete(handlers::coach::revoke_access),
    )
}
