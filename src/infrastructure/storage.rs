use crate::config::ApiConfig;
use crate::services::storage::S3ObjectStore;
use aws_sdk_s3::config::Region;
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &ApiConfig) -> Arc<S3ObjectStore> {
    info!("☁️  S3 Storage: bucket {}", config.s3_bucket);

    let mut loader = aws_config::from_env().region(Region::new(config.s3_region.clone()));
    if let Some(endpoint) = &config.s3_endpoint {
        loader = loader.endpoint_url(endpoint.as_str());
    }
    let aws_config = loader.load().await;

    let mut builder = aws_sdk_s3::config::Builder::from(&aws_config);
    // MinIO-style endpoints need path-style addressing
    if config.s3_endpoint.is_some() {
        builder = builder.force_path_style(true);
    }

    let client = aws_sdk_s3::Client::from_conf(builder.build());

    Arc::new(S3ObjectStore::new(
        client,
        config.s3_bucket.clone(),
        config.s3_region.clone(),
        config.cdn_base_url.clone(),
    ))
}
