//! Amazon S3 (or S3-compatible) image store
//!
//! Credentials are resolved by the AWS SDK's default chain:
//! - Environment variables (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`)
//! - Web identity token (EKS IRSA)
//! - IAM instance profile (EC2)
//! - Shared credentials file

use super::ImageStore;
use crate::config::S3Config;
use crate::error::{ImageError, ImageResult};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, error};

pub struct S3ImageStore {
    client: Client,
    config: S3Config,
}

impl S3ImageStore {
    /// Create a store with an existing S3 client
    pub fn new(client: Client, config: S3Config) -> Self {
        Self { client, config }
    }

    /// Build the client from the default AWS config
    pub async fn connect(config: S3Config) -> Self {
        let shared = aws_config::from_env()
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self::new(Client::from_conf(builder.build()), config)
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn put(&self, key: &str, content_type: &str, body: Bytes) -> ImageResult<String> {
        let size = body.len();

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, bucket = %self.config.bucket, key, "S3 upload failed");
                ImageError::Storage(e.to_string())
            })?;

        debug!(bucket = %self.config.bucket, key, size, "Uploaded image to S3");
        Ok(self.config.object_url(key))
    }

    async fn health_check(&self) -> ImageResult<()> {
        self.client
            .head_bucket()
            .bucket(&self.config.bucket)
            .send()
            .await
            .map_err(|e| ImageError::Storage(format!("S3 health check failed: {e}")))?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "s3"
    }
}
