use super::{authenticated_user, file_field};
use crate::api::error::AppError;
use crate::db::videos::{self, Video};
use crate::services::media::transcode::processed_output_path;
use crate::services::staging::{StagedFile, random_token};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

/// The only accepted video container type.
const VIDEO_CONTENT_TYPE: &str = "video/mp4";

#[derive(Deserialize, ToSchema)]
pub struct CreateVideoRequest {
    pub title: String,
    pub description: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/videos",
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Video record created", body = Video),
        (status = 401, description = "Unauthorized")
    ),
    security(("jwt" = [])),
    tag = "videos"
)]
pub async fn create_video(
    State(state): State<crate::AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<Video>), AppError> {
    let user_id = authenticated_user(&headers, &state.config.jwt_secret)?;

    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("title is required".to_string()));
    }

    let now = Utc::now();
    let video = Video {
        id: Uuid::new_v4().to_string(),
        user_id,
        title: payload.title,
        description: payload.description,
        video_url: None,
        thumbnail_url: None,
        created_at: Some(now),
        updated_at: Some(now),
    };

    videos::create(&state.db, &video).await?;

    Ok((StatusCode::CREATED, Json(video)))
}

#[utoipa::path(
    get,
    path = "/api/videos",
    responses(
        (status = 200, description = "Videos owned by the caller", body = [Video]),
        (status = 401, description = "Unauthorized")
    ),
    security(("jwt" = [])),
    tag = "videos"
)]
pub async fn list_videos(
    State(state): State<crate::AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Video>>, AppError> {
    let user_id = authenticated_user(&headers, &state.config.jwt_secret)?;
    let videos = videos::list_for_user(&state.db, &user_id).await?;
    Ok(Json(videos))
}

#[utoipa::path(
    get,
    path = "/api/videos/{video_id}",
    params(("video_id" = String, Path, description = "Video record ID")),
    responses(
        (status = 200, description = "Video record", body = Video),
        (status = 404, description = "Video not found")
    ),
    tag = "videos"
)]
pub async fn get_video(
    State(state): State<crate::AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<Video>, AppError> {
    let video = videos::get(&state.db, &video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("video metadata not found".to_string()))?;
    Ok(Json(video))
}

/// Accepts a video file for an owned record and drives it through the full
/// pipeline: stage to disk, remux for fast-start playback, classify the
/// aspect ratio, push to the object store under a ratio-prefixed key, then
/// record the public URL. The record is only mutated after the upload has
/// landed; both staged files are removed whichever way the request ends.
#[utoipa::path(
    post,
    path = "/api/videos/{video_id}/video",
    params(("video_id" = String, Path, description = "Video record ID")),
    responses(
        (status = 200, description = "Video uploaded and record updated", body = Video),
        (status = 400, description = "Missing or malformed video file"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller does not own this video"),
        (status = 404, description = "Video not found"),
        (status = 413, description = "File exceeds the upload limit"),
        (status = 415, description = "Not an mp4 file"),
        (status = 500, description = "Processing or storage failure")
    ),
    security(("jwt" = [])),
    tag = "videos"
)]
pub async fn upload_video(
    State(state): State<crate::AppState>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Video>, AppError> {
    if video_id.trim().is_empty() {
        return Err(AppError::BadRequest("invalid video ID".to_string()));
    }

    let user_id = authenticated_user(&headers, &state.config.jwt_secret)?;

    info!("uploading video {} by user {}", video_id, user_id);

    let mut video = videos::get(&state.db, &video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("video metadata not found".to_string()))?;

    if video.user_id != user_id {
        return Err(AppError::Forbidden(
            "you are not allowed to edit this video".to_string(),
        ));
    }

    let (content_type, data) = file_field(&mut multipart, "video").await?;

    if data.len() > state.config.max_video_size {
        return Err(AppError::PayloadTooLarge(
            "file size exceeds the upload limit".to_string(),
        ));
    }

    let content_type = content_type.unwrap_or_default();
    if content_type != VIDEO_CONTENT_TYPE {
        return Err(AppError::UnsupportedMediaType(
            "only mp4 files are allowed".to_string(),
        ));
    }

    let ext = content_type.split('/').nth(1).unwrap_or("bin");
    let filename = format!("{}.{}", random_token(), ext);
    let staging_path = state.config.staging_dir.join(&filename);

    // Guards for both staged files. The transcoder output is adopted up
    // front so a half-written file is cleaned up even when the remux fails.
    let raw = StagedFile::write(staging_path, &data).await?;
    let _processed_guard = StagedFile::adopt(processed_output_path(raw.path()));

    let processed_path = state.transcoder.fast_start(raw.path()).await?;

    let category = state.classifier.classify(&processed_path).await?;

    let key = format!("{}/{}", category.as_str(), filename);
    state
        .store
        .put_file(&key, &processed_path, VIDEO_CONTENT_TYPE)
        .await?;

    video.video_url = Some(state.store.public_url(&key));
    video.updated_at = Some(Utc::now());
    videos::update(&state.db, &video).await?;

    Ok(Json(video))
}
