use super::{authenticated_user, file_field};
use crate::api::error::AppError;
use crate::db::videos::{self, Video};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::HeaderMap,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use tracing::info;

/// Stores a thumbnail inline on the record as a base64 data URL. Unlike the
/// video flow there is no staging and no external tooling involved.
#[utoipa::path(
    post,
    path = "/api/videos/{video_id}/thumbnail",
    params(("video_id" = String, Path, description = "Video record ID")),
    responses(
        (status = 200, description = "Thumbnail stored and record updated", body = Video),
        (status = 400, description = "Missing or malformed thumbnail file"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller does not own this video"),
        (status = 404, description = "Video not found"),
        (status = 413, description = "Thumbnail exceeds the upload limit"),
        (status = 415, description = "Not an image file")
    ),
    security(("jwt" = [])),
    tag = "videos"
)]
pub async fn upload_thumbnail(
    State(state): State<crate::AppState>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Video>, AppError> {
    if video_id.trim().is_empty() {
        return Err(AppError::BadRequest("invalid video ID".to_string()));
    }

    let user_id = authenticated_user(&headers, &state.config.jwt_secret)?;

    info!("uploading thumbnail for video {} by user {}", video_id, user_id);

    let mut video = videos::get(&state.db, &video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("video metadata not found".to_string()))?;

    if video.user_id != user_id {
        return Err(AppError::Forbidden(
            "you are not allowed to edit this video".to_string(),
        ));
    }

    let (content_type, data) = file_field(&mut multipart, "thumbnail").await?;

    if data.len() > state.config.max_thumbnail_size {
        return Err(AppError::PayloadTooLarge(
            "thumbnail size is too big".to_string(),
        ));
    }

    let content_type = content_type.unwrap_or_default();
    if !content_type.starts_with("image/") {
        return Err(AppError::UnsupportedMediaType(
            "only image thumbnails are allowed".to_string(),
        ));
    }

    video.thumbnail_url = Some(format!(
        "data:{};base64,{}",
        content_type,
        STANDARD.encode(&data)
    ));
    video.updated_at = Some(Utc::now());
    videos::update(&state.db, &video).await?;

    Ok(Json(video))
}
