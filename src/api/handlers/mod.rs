pub mod auth;
pub mod health;
pub mod thumbnails;
pub mod videos;

use crate::api::error::AppError;
use crate::utils::auth::{bearer_token, validate_jwt};
use axum::extract::Multipart;
use axum::http::HeaderMap;
use bytes::Bytes;

/// Resolves the bearer credential to a user id, or fails with 401.
pub(crate) fn authenticated_user(headers: &HeaderMap, jwt_secret: &str) -> Result<String, AppError> {
    let token = bearer_token(headers)
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;
    let claims = validate_jwt(token, jwt_secret)
        .map_err(|_| AppError::Unauthorized("invalid bearer token".to_string()))?;
    Ok(claims.sub)
}

/// Pulls the file part named `name` out of a multipart body, returning its
/// declared content type and bytes.
pub(crate) async fn file_field(
    multipart: &mut Multipart,
    name: &str,
) -> Result<(Option<String>, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some(name) {
            let content_type = field.content_type().map(|s| s.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            return Ok((content_type, data));
        }
    }

    Err(AppError::BadRequest(format!("{} file is missing", name)))
}
