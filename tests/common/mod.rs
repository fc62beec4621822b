#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use chrono::Utc;
use http_body_util::BodyExt;
use rust_video_backend::config::ApiConfig;
use rust_video_backend::db::users::{self, User};
use rust_video_backend::db::videos::{self, Video};
use rust_video_backend::services::media::MediaError;
use rust_video_backend::services::media::probe::{AspectCategory, AspectClassifier};
use rust_video_backend::services::media::transcode::{Transcoder, processed_output_path};
use rust_video_backend::services::storage::{ObjectStore, StorageError};
use rust_video_backend::utils::auth::create_jwt;
use rust_video_backend::{AppState, create_app};
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret";

pub const BOUNDARY: &str = "---------------------------123456789012345678901234567";

/// Object store double that records every put and serves deterministic URLs.
#[derive(Default)]
pub struct RecordingStore {
    pub puts: Mutex<Vec<(String, String)>>, // (key, content_type)
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn put_file(
        &self,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> Result<(), StorageError> {
        if !path.exists() {
            return Err(StorageError::Read(format!(
                "missing staged file {}",
                path.display()
            )));
        }
        self.puts
            .lock()
            .unwrap()
            .push((key.to_string(), content_type.to_string()));
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://cdn.test/{}", key)
    }
}

/// Object store double that rejects every upload.
pub struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn put_file(
        &self,
        _key: &str,
        _path: &Path,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        Err(StorageError::Upload("injected store failure".to_string()))
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://cdn.test/{}", key)
    }
}

/// Stand-in for ffmpeg: copies the input to the `.processed` path.
pub struct CopyTranscoder;

#[async_trait]
impl Transcoder for CopyTranscoder {
    async fn fast_start(&self, input: &Path) -> Result<PathBuf, MediaError> {
        let output = processed_output_path(input);
        tokio::fs::copy(input, &output)
            .await
            .map_err(|source| MediaError::Spawn {
                tool: "ffmpeg",
                source,
            })?;
        Ok(output)
    }
}

/// Stand-in for a crashing ffmpeg: leaves a partial output file behind and
/// exits non-zero, like the real tool does when a container is truncated.
pub struct FailingTranscoder;

#[async_trait]
impl Transcoder for FailingTranscoder {
    async fn fast_start(&self, input: &Path) -> Result<PathBuf, MediaError> {
        let output = processed_output_path(input);
        tokio::fs::write(&output, b"partial")
            .await
            .map_err(|source| MediaError::Spawn {
                tool: "ffmpeg",
                source,
            })?;
        Err(MediaError::TranscodeFailed {
            status: 1,
            stderr: "moov atom not found".to_string(),
        })
    }
}

/// Classifier double with a fixed verdict.
pub struct FixedClassifier(pub AspectCategory);

#[async_trait]
impl AspectClassifier for FixedClassifier {
    async fn classify(&self, _path: &Path) -> Result<AspectCategory, MediaError> {
        Ok(self.0)
    }
}

/// Classifier double that always fails like a crashed ffprobe.
pub struct FailingClassifier;

#[async_trait]
impl AspectClassifier for FailingClassifier {
    async fn classify(&self, _path: &Path) -> Result<AspectCategory, MediaError> {
        Err(MediaError::ProbeFailed {
            status: 1,
            stderr: "invalid data found when processing input".to_string(),
        })
    }
}

pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
    pub staging: TempDir,
}

pub fn test_config() -> ApiConfig {
    ApiConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..ApiConfig::default()
    }
}

pub async fn build_app(
    transcoder: Arc<dyn Transcoder>,
    classifier: Arc<dyn AspectClassifier>,
    store: Arc<dyn ObjectStore>,
    mut config: ApiConfig,
) -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    let staging = tempfile::tempdir().unwrap();
    config.staging_dir = staging.path().to_path_buf();

    let state = AppState {
        db: pool.clone(),
        store,
        transcoder,
        classifier,
        config,
    };

    TestApp {
        app: create_app(state),
        pool,
        staging,
    }
}

pub async fn seed_user(pool: &SqlitePool) -> (String, String) {
    let id = Uuid::new_v4().to_string();
    let user = User {
        id: id.clone(),
        username: format!("user-{}", &id[..8]),
        password_hash: "unused".to_string(),
        created_at: Some(Utc::now()),
    };
    users::create(pool, &user).await.unwrap();

    let token = create_jwt(&id, TEST_JWT_SECRET).unwrap();
    (id, token)
}

pub async fn seed_video(pool: &SqlitePool, user_id: &str) -> Video {
    let now = Utc::now();
    let video = Video {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        title: "test clip".to_string(),
        description: None,
        video_url: None,
        thumbnail_url: None,
        created_at: Some(now),
        updated_at: Some(now),
    };
    videos::create(pool, &video).await.unwrap();
    video
}

pub fn multipart_body(field_name: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            BOUNDARY, field_name, filename, content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, token: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri).header(
        "Content-Type",
        format!("multipart/form-data; boundary={}", BOUNDARY),
    );
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

pub fn json_request(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn response_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn staging_file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}
