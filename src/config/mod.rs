use std::env;
use std::path::PathBuf;

/// Runtime configuration for the video backend, loaded from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Port the HTTP server listens on (default: 3000)
    pub port: u16,

    /// SQLite connection string (default: "sqlite://videos.db")
    pub database_url: String,

    /// Directory for transient upload staging files (default: "./staging")
    pub staging_dir: PathBuf,

    /// Maximum video upload size in bytes (default: 1 GiB)
    pub max_video_size: usize,

    /// Maximum thumbnail upload size in bytes (default: 10 MiB)
    pub max_thumbnail_size: usize,

    /// JWT signing secret
    pub jwt_secret: String,

    /// S3 bucket holding processed videos
    pub s3_bucket: String,

    /// S3 region (default: "us-east-1")
    pub s3_region: String,

    /// Custom S3 endpoint, e.g. a local MinIO instance
    pub s3_endpoint: Option<String>,

    /// CDN distribution base URL; when set, stored video URLs point here
    pub cdn_base_url: Option<String>,

    /// Path to the ffmpeg binary (default: "ffmpeg")
    pub ffmpeg_path: String,

    /// Path to the ffprobe binary (default: "ffprobe")
    pub ffprobe_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: "sqlite://videos.db".to_string(),
            staging_dir: PathBuf::from("./staging"),
            max_video_size: 1024 * 1024 * 1024, // 1 GiB
            max_thumbnail_size: 10 * 1024 * 1024, // 10 MiB
            jwt_secret: "secret".to_string(),
            s3_bucket: "videos".to_string(),
            s3_region: "us-east-1".to_string(),
            s3_endpoint: None,
            cdn_base_url: None,
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            database_url: env::var("DATABASE_URL").unwrap_or(default.database_url),

            staging_dir: env::var("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.staging_dir),

            max_video_size: env::var("MAX_VIDEO_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_video_size),

            max_thumbnail_size: env::var("MAX_THUMBNAIL_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_thumbnail_size),

            // Fallback for dev convenience only
            jwt_secret: env::var("JWT_SECRET").unwrap_or(default.jwt_secret),

            s3_bucket: env::var("S3_BUCKET").unwrap_or(default.s3_bucket),

            s3_region: env::var("S3_REGION").unwrap_or(default.s3_region),

            s3_endpoint: env::var("S3_ENDPOINT").ok(),

            cdn_base_url: env::var("CDN_BASE_URL").ok(),

            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or(default.ffmpeg_path),

            ffprobe_path: env::var("FFPROBE_PATH").unwrap_or(default.ffprobe_path),
        }
    }
}
