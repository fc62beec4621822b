use super::MediaError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Suffix appended to the input path to name the remuxed output. Fixed so
/// the caller can locate (and clean up) the output without extra
/// bookkeeping, even when the remux dies half way.
pub const PROCESSED_SUFFIX: &str = ".processed";

pub fn processed_output_path(input: &Path) -> PathBuf {
    let mut path = input.as_os_str().to_os_string();
    path.push(PROCESSED_SUFFIX);
    PathBuf::from(path)
}

/// Rewrites a container for progressive playback without re-encoding.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Produces `<input>.processed`, a functionally equivalent file whose
    /// layout permits playback before the full download completes. The
    /// caller owns the lifecycle of both input and output.
    async fn fast_start(&self, input: &Path) -> Result<PathBuf, MediaError>;
}

pub struct FfmpegTranscoder {
    ffmpeg_path: String,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn fast_start(&self, input: &Path) -> Result<PathBuf, MediaError> {
        let output_path = processed_output_path(input);

        debug!("fast-start remux: {}", input.display());

        // -y: never block on an overwrite prompt. Streams are copied, not
        // re-encoded; all source metadata is kept.
        let output = Command::new(&self.ffmpeg_path)
            .arg("-y")
            .arg("-i")
            .arg(input)
            .args([
                "-movflags",
                "faststart",
                "-map_metadata",
                "0",
                "-codec",
                "copy",
                "-f",
                "mp4",
            ])
            .arg(&output_path)
            .output()
            .await
            .map_err(|source| MediaError::Spawn {
                tool: "ffmpeg",
                source,
            })?;

        if !output.status.success() {
            return Err(MediaError::TranscodeFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(output_path)
    }
}
