use super::MediaError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Coarse classification of a video's display aspect ratio. Also the key
/// prefix under which the processed file lands in the object store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectCategory {
    Landscape,
    Portrait,
    Other,
}

impl AspectCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectCategory::Landscape => "landscape",
            AspectCategory::Portrait => "portrait",
            AspectCategory::Other => "other",
        }
    }

    /// Total mapping from a declared display aspect ratio. Any value other
    /// than the two recognized ratios, including a missing one, is `Other`;
    /// no ratio ever fails classification.
    pub fn from_ratio(ratio: Option<&str>) -> Self {
        match ratio {
            Some("16:9") => AspectCategory::Landscape,
            Some("9:16") => AspectCategory::Portrait,
            _ => AspectCategory::Other,
        }
    }
}

#[async_trait]
pub trait AspectClassifier: Send + Sync {
    async fn classify(&self, path: &Path) -> Result<AspectCategory, MediaError>;
}

pub struct FfprobeClassifier {
    ffprobe_path: String,
}

impl FfprobeClassifier {
    pub fn new(ffprobe_path: impl Into<String>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }
}

#[derive(Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Deserialize)]
struct ProbeStream {
    display_aspect_ratio: Option<String>,
}

fn parse_probe_output(stdout: &[u8]) -> Result<AspectCategory, MediaError> {
    let output: ProbeOutput = serde_json::from_slice(stdout)?;
    let stream = output.streams.first().ok_or(MediaError::NoVideoStream)?;
    Ok(AspectCategory::from_ratio(
        stream.display_aspect_ratio.as_deref(),
    ))
}

#[async_trait]
impl AspectClassifier for FfprobeClassifier {
    async fn classify(&self, path: &Path) -> Result<AspectCategory, MediaError> {
        debug!("probing aspect ratio: {}", path.display());

        let output = Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=display_aspect_ratio",
                "-of",
                "json",
            ])
            .arg(path)
            .output()
            .await
            .map_err(|source| MediaError::Spawn {
                tool: "ffprobe",
                source,
            })?;

        if !output.status.success() {
            return Err(MediaError::ProbeFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        parse_probe_output(&output.stdout)
    }
}
