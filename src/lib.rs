pub mod api;
pub mod config;
pub mod db;
pub mod infrastructure;
pub mod services;
pub mod utils;

use crate::config::ApiConfig;
use crate::services::media::probe::AspectClassifier;
use crate::services::media::transcode::Transcoder;
use crate::services::storage::ObjectStore;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use sqlx::SqlitePool;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Headroom on top of the video size ceiling for multipart framing.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::health::healthz,
        api::handlers::videos::create_video,
        api::handlers::videos::list_videos,
        api::handlers::videos::get_video,
        api::handlers::videos::upload_video,
        api::handlers::thumbnails::upload_thumbnail,
    ),
    components(
        schemas(
            api::handlers::auth::AuthRequest,
            api::handlers::auth::AuthResponse,
            api::handlers::videos::CreateVideoRequest,
            db::videos::Video,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "videos", description = "Video metadata and upload endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub store: Arc<dyn ObjectStore>,
    pub transcoder: Arc<dyn Transcoder>,
    pub classifier: Arc<dyn AspectClassifier>,
    pub config: ApiConfig,
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.max_video_size + MULTIPART_OVERHEAD;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/healthz", get(api::handlers::health::healthz))
        .route("/api/register", post(api::handlers::auth::register))
        .route("/api/login", post(api::handlers::auth::login))
        .route(
            "/api/videos",
            post(api::handlers::videos::create_video).get(api::handlers::videos::list_videos),
        )
        .route("/api/videos/:video_id", get(api::handlers::videos::get_video))
        .route(
            "/api/videos/:video_id/video",
            post(api::handlers::videos::upload_video),
        )
        .route(
            "/api/videos/:video_id/thumbnail",
            post(api::handlers::thumbnails::upload_thumbnail),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
