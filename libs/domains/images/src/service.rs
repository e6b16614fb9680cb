use bytes::Bytes;
use observability::ShopMetrics;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::ImageConfig;
use crate::error::{ImageError, ImageResult};
use crate::provider::ImageStore;

/// `data` of a successful upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploaded {
    #[schema(example = "https://shop-images.s3.us-east-1.amazonaws.com/0b7e4c1e.png")]
    pub image_url: String,
}

/// File extension for the accepted content types
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpeg"),
        "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        _ => None,
    }
}

/// Validates uploads and stores them under random keys
#[derive(Clone)]
pub struct ImageService {
    store: Arc<dyn ImageStore>,
    config: ImageConfig,
}

impl ImageService {
    pub fn new(store: Arc<dyn ImageStore>, config: ImageConfig) -> Self {
        Self { store, config }
    }

    pub fn max_bytes(&self) -> usize {
        self.config.max_bytes
    }

    pub async fn upload(&self, content_type: Option<&str>, body: Bytes) -> ImageResult<ImageUploaded> {
        // Parameters such as `; charset=` are ignored
        let content_type = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .unwrap_or_default();

        let extension = extension_for(&content_type)
            .ok_or_else(|| ImageError::UnsupportedType(content_type.clone()))?;

        if body.is_empty() {
            return Err(ImageError::Empty);
        }
        if body.len() > self.config.max_bytes {
            return Err(ImageError::TooLarge {
                size: body.len(),
                max: self.config.max_bytes,
            });
        }

        let key = format!("{}.{}", Uuid::new_v4(), extension);
        let size = body.len();
        let image_url = self.store.put(&key, &content_type, body).await?;

        ShopMetrics::image_uploaded(self.store.name(), size);
        tracing::info!(key = %key, size, store = self.store.name(), "Stored image");

        Ok(ImageUploaded { image_url })
    }

    pub async fn health_check(&self) -> ImageResult<()> {
        self.store.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::InMemoryImageStore;

    fn service(store: InMemoryImageStore, max_bytes: usize) -> ImageService {
        ImageService::new(Arc::new(store), ImageConfig { max_bytes })
    }

    #[tokio::test]
    async fn test_upload_stores_under_random_key() {
        let store = InMemoryImageStore::new("https://cdn.example.com");
        let service = service(store.clone(), 1024);

        let first = service
            .upload(Some("image/png"), Bytes::from_static(b"png-bytes"))
            .await
            .unwrap();
        let second = service
            .upload(Some("IMAGE/JPEG; charset=binary"), Bytes::from_static(b"jpeg-bytes"))
            .await
            .unwrap();

        assert!(first.image_url.starts_with("https://cdn.example.com/"));
        assert!(first.image_url.ends_with(".png"));
        assert!(second.image_url.ends_with(".jpeg"));
        assert_ne!(first.image_url, second.image_url);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_upload_rejects_other_types() {
        let store = InMemoryImageStore::default();
        let service = service(store.clone(), 1024);

        for content_type in [Some("image/gif"), Some("text/plain"), None] {
            let err = service
                .upload(content_type, Bytes::from_static(b"data"))
                .await
                .unwrap_err();
            assert!(matches!(err, ImageError::UnsupportedType(_)), "{content_type:?}");
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_upload_enforces_size_limit() {
        let service = service(InMemoryImageStore::default(), 4);

        let err = service
            .upload(Some("image/png"), Bytes::from_static(b"12345"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImageError::TooLarge { size: 5, max: 4 }));

        let err = service.upload(Some("image/png"), Bytes::new()).await.unwrap_err();
        assert!(matches!(err, ImageError::Empty));
    }
}
