use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A transient on-disk file backing one in-flight upload. The file is
/// removed when the guard drops, on every exit path of the owning request.
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    /// Writes `data` to `path` and takes cleanup ownership of it.
    pub async fn write(path: PathBuf, data: &[u8]) -> io::Result<Self> {
        tokio::fs::write(&path, data).await?;
        Ok(Self { path })
    }

    /// Takes cleanup ownership of a path another component will create.
    /// The file may never come to exist; removal tolerates that.
    pub fn adopt(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        remove_staged(&self.path);
    }
}

/// Best-effort removal of a staged file. Idempotent: a path that was
/// already removed or never created is not an error. Other failures are
/// logged, never surfaced.
pub fn remove_staged(path: &Path) {
    if let Err(err) = std::fs::remove_file(path) {
        if err.kind() != io::ErrorKind::NotFound {
            warn!("failed to remove staged file {}: {}", path.display(), err);
        }
    }
}

pub fn ensure_staging_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)
}

/// URL-safe filename token from 32 bytes of OS randomness. Staging names
/// and object keys derive from this, never from record ids: concurrent
/// requests cannot collide and keys do not leak ids.
pub fn random_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
