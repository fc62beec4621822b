use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not read staged file for upload: {0}")]
    Read(String),

    #[error("object store rejected the upload: {0}")]
    Upload(String),
}

/// Durable key-addressed object storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores the file at `path` under `key`, overwriting any existing
    /// object at that key.
    async fn put_file(
        &self,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Externally resolvable address for an object stored under `key`.
    fn public_url(&self, key: &str) -> String;
}

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    region: String,
    cdn_base_url: Option<String>,
}

impl S3ObjectStore {
    pub fn new(
        client: Client,
        bucket: String,
        region: String,
        cdn_base_url: Option<String>,
    ) -> Self {
        Self {
            client,
            bucket,
            region,
            cdn_base_url,
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_file(
        &self,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::Read(e.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::Upload(DisplayErrorContext(e).to_string()))?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        resolve_public_url(
            self.cdn_base_url.as_deref(),
            &self.bucket,
            &self.region,
            key,
        )
    }
}

fn resolve_public_url(cdn_base_url: Option<&str>, bucket: &str, region: &str, key: &str) -> String {
    match cdn_base_url {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
        None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key),
    }
}
