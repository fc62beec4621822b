use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use utoipa::ToSchema;

/// A video record. `video_url` and `thumbnail_url` stay empty until the
/// corresponding upload completes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Video {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub async fn create(pool: &SqlitePool, video: &Video) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO videos (id, user_id, title, description, video_url, thumbnail_url, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&video.id)
    .bind(&video.user_id)
    .bind(&video.title)
    .bind(&video.description)
    .bind(&video.video_url)
    .bind(&video.thumbnail_url)
    .bind(video.created_at)
    .bind(video.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get(pool: &SqlitePool, id: &str) -> sqlx::Result<Option<Video>> {
    sqlx::query_as::<_, Video>(
        "SELECT id, user_id, title, description, video_url, thumbnail_url, created_at, updated_at \
         FROM videos WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_for_user(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Vec<Video>> {
    sqlx::query_as::<_, Video>(
        "SELECT id, user_id, title, description, video_url, thumbnail_url, created_at, updated_at \
         FROM videos WHERE user_id = ? ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Persists the mutable fields of an existing record. `id` and `user_id`
/// are immutable once the record is created.
pub async fn update(pool: &SqlitePool, video: &Video) -> sqlx::Result<()> {
    sqlx::query(
        "UPDATE videos SET title = ?, description = ?, video_url = ?, thumbnail_url = ?, updated_at = ? \
         WHERE id = ?",
    )
    .bind(&video.title)
    .bind(&video.description)
    .bind(&video.video_url)
    .bind(&video.thumbnail_url)
    .bind(video.updated_at)
    .bind(&video.id)
    .execute(pool)
    .await?;
    Ok(())
}
