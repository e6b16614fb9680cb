//! Image storage backends

pub mod memory;
pub mod s3;

pub use memory::InMemoryImageStore;
pub use s3::S3ImageStore;

use crate::error::ImageResult;
use async_trait::async_trait;
use bytes::Bytes;

/// Where uploaded images end up
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store the object under `key` and return its public URL
    async fn put(&self, key: &str, content_type: &str, body: Bytes) -> ImageResult<String>;

    /// Check if the store is reachable
    async fn health_check(&self) -> ImageResult<()>;

    /// Get store name
    fn name(&self) -> &'static str;
}
