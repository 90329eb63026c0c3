// src/storage/s3_store.rs
// DOCUMENTATION: Managed object store blob adapter
// PURPOSE: Stores images in an S3-compatible bucket behind a public base URL

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::{
    aws::AmazonS3Builder, path::Path, Attribute, Attributes, ObjectStore, PutOptions,
};
use url::Url;

use super::{BlobEntry, BlobStore, DeleteOutcome};
use crate::errors::GalleryError;

/// Blob store backed by a managed S3-compatible bucket
/// DOCUMENTATION: Keys live under an optional prefix inside the bucket;
/// public URLs are `{public_base}/{key}` and must resolve through whatever
/// CDN or bucket website fronts the objects
pub struct S3BlobStore {
    store: Arc<dyn ObjectStore>,
    prefix: Path,
    public_base: String,
}

impl S3BlobStore {
    /// Build from a store URL (`s3://bucket/optional/prefix`) using AWS
    /// credentials taken from the environment
    pub fn new(store_url: &str, public_base: &str) -> Result<Self, GalleryError> {
        let url = Url::parse(store_url)
            .map_err(|e| GalleryError::ConfigError(format!("Invalid store URL: {}", e)))?;

        let store = AmazonS3Builder::from_env()
            .with_url(store_url)
            .build()
            .map_err(|e| GalleryError::ConfigError(format!("Object store setup failed: {}", e)))?;

        Ok(Self::with_store(
            Arc::new(store),
            url.path().trim_matches('/'),
            public_base,
        ))
    }

    /// Wrap an already constructed store (used by tests with `InMemory`)
    pub fn with_store(store: Arc<dyn ObjectStore>, prefix: &str, public_base: &str) -> Self {
        S3BlobStore {
            store,
            prefix: Path::from(prefix),
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    /// Full object location for a store-relative key
    fn location(&self, key: &str) -> Path {
        if self.prefix.as_ref().is_empty() {
            Path::from(key)
        } else {
            Path::from(format!("{}/{}", self.prefix, key))
        }
    }

    /// Store-relative key for a listed object location
    fn key_for_location(&self, location: &Path) -> String {
        let raw = location.as_ref();
        if self.prefix.as_ref().is_empty() {
            raw.to_string()
        } else {
            raw.strip_prefix(&format!("{}/", self.prefix))
                .unwrap_or(raw)
                .to_string()
        }
    }

    fn url_for_key(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }

    /// Map a public URL back to its key; None for URLs outside this store
    fn key_for_url(&self, url: &str) -> Option<String> {
        url.strip_prefix(&format!("{}/", self.public_base))
            .filter(|key| !key.is_empty())
            .map(|key| key.to_string())
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, GalleryError> {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        let location = self.location(key);
        self.store
            .put_opts(&location, data.into(), opts)
            .await
            .map_err(GalleryError::storage)?;

        log::debug!("Stored object at {}", location);
        Ok(self.url_for_key(key))
    }

    async fn get(&self, key: &str) -> Result<Bytes, GalleryError> {
        let result = match self.store.get(&self.location(key)).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                return Err(GalleryError::NotFound(format!("No object for key: {}", key)))
            }
            Err(e) => return Err(GalleryError::storage(e)),
        };

        result.bytes().await.map_err(GalleryError::storage)
    }

    async fn delete(&self, url: &str) -> Result<DeleteOutcome, GalleryError> {
        // URLs outside our public base were never stored here
        let key = match self.key_for_url(url) {
            Some(key) => key,
            None => return Ok(DeleteOutcome::NotFound),
        };

        match self.store.delete(&self.location(&key)).await {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(object_store::Error::NotFound { .. }) => Ok(DeleteOutcome::NotFound),
            Err(e) => Err(GalleryError::storage(e)),
        }
    }

    async fn list(&self) -> Result<Vec<BlobEntry>, GalleryError> {
        let prefix = if self.prefix.as_ref().is_empty() {
            None
        } else {
            Some(&self.prefix)
        };

        let objects: Vec<object_store::ObjectMeta> = self
            .store
            .list(prefix)
            .try_collect()
            .await
            .map_err(GalleryError::storage)?;

        Ok(objects
            .into_iter()
            .map(|meta| {
                let key = self.key_for_location(&meta.location);
                let url = self.url_for_key(&key);
                BlobEntry { key, url }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn memory_store() -> S3BlobStore {
        S3BlobStore::with_store(
            Arc::new(InMemory::new()),
            "gallery",
            "https://cdn.example.com/gallery",
        )
    }

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let store = memory_store();

        let url = store
            .put("stories/1_a.jpg", Bytes::from_static(b"jpeg"), "image/jpeg")
            .await
            .unwrap();

        assert_eq!(url, "https://cdn.example.com/gallery/stories/1_a.jpg");
        assert_eq!(
            store.get("stories/1_a.jpg").await.unwrap(),
            Bytes::from_static(b"jpeg")
        );
    }

    #[tokio::test]
    async fn test_get_missing_key_is_not_found() {
        let store = memory_store();

        let err = store.get("stories/none.jpg").await.unwrap_err();
        assert!(matches!(err, GalleryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = memory_store();

        let url = store
            .put("hero/1_h.jpg", Bytes::from_static(b"x"), "image/jpeg")
            .await
            .unwrap();

        assert_eq!(store.delete(&url).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(store.delete(&url).await.unwrap(), DeleteOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_delete_foreign_url_is_not_found() {
        let store = memory_store();

        let outcome = store
            .delete("https://other-cdn.example.com/x.jpg")
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_list_strips_the_bucket_prefix() {
        let store = memory_store();

        store
            .put("config/gallery-config.json", Bytes::from_static(b"{}"), "application/json")
            .await
            .unwrap();

        let entries = store.list().await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "config/gallery-config.json");
        assert_eq!(
            entries[0].url,
            "https://cdn.example.com/gallery/config/gallery-config.json"
        );
    }
}
