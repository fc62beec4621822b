use dotenvy::dotenv;
use rust_video_backend::config::ApiConfig;
use rust_video_backend::infrastructure::{database, storage};
use rust_video_backend::services::media::probe::FfprobeClassifier;
use rust_video_backend::services::media::transcode::FfmpegTranscoder;
use rust_video_backend::services::staging;
use rust_video_backend::{AppState, create_app};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_video_backend=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting Rust Video Backend...");

    let config = ApiConfig::from_env();
    info!(
        "🎞️  Upload limits: video {}MB, thumbnail {}MB",
        config.max_video_size / 1024 / 1024,
        config.max_thumbnail_size / 1024 / 1024
    );

    staging::ensure_staging_dir(&config.staging_dir)?;

    let db = database::setup_database(&config.database_url).await?;
    let store = storage::setup_storage(&config).await;

    let state = AppState {
        db,
        store,
        transcoder: Arc::new(FfmpegTranscoder::new(config.ffmpeg_path.clone())),
        classifier: Arc::new(FfprobeClassifier::new(config.ffprobe_path.clone())),
        config: config.clone(),
    };

    let app = create_app(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("✅ Server ready at http://{}", addr);
    info!("📖 Swagger UI: http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("⌨️  Ctrl+C received, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("💤 SIGTERM received, starting graceful shutdown...");
        },
    }
}
