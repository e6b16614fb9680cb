//! In-memory image store for development and tests

use super::ImageStore;
use crate::error::ImageResult;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A stored object: content type and body
pub type StoredImage = (String, Bytes);

/// Keeps uploads in a map and serves URLs under `base_url`
#[derive(Clone)]
pub struct InMemoryImageStore {
    base_url: String,
    objects: Arc<RwLock<HashMap<String, StoredImage>>>,
}

impl InMemoryImageStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: Arc::default(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<StoredImage> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryImageStore {
    fn default() -> Self {
        Self::new("http://localhost:8080/images")
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn put(&self, key: &str, content_type: &str, body: Bytes) -> ImageResult<String> {
        self.objects
            .write()
            .await
            .insert(key.to_string(), (content_type.to_string(), body));

        Ok(format!("{}/{}", self.base_url, key))
    }

    async fn health_check(&self) -> ImageResult<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
