pub mod probe;
pub mod transcode;

use thiserror::Error;

/// Failures from the external media tools. Tool stderr is carried along
/// for operator diagnosis.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("ffmpeg exited with status {status}: {stderr}")]
    TranscodeFailed { status: i32, stderr: String },

    #[error("ffprobe exited with status {status}: {stderr}")]
    ProbeFailed { status: i32, stderr: String },

    #[error("no video stream found")]
    NoVideoStream,

    #[error("unparseable ffprobe output: {0}")]
    ProbeOutput(#[from] serde_json::Error),
}
