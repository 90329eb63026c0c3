// src/services/config_store.rs
// DOCUMENTATION: Gallery configuration store
// PURPOSE: Whole-document read/write of the singleton gallery JSON

use bytes::Bytes;
use chrono::Utc;

use crate::errors::GalleryError;
use crate::models::GalleryConfig;
use crate::storage::{BlobStore, SharedBlobStore};

/// Fixed key of the singleton configuration object
pub const CONFIG_KEY: &str = "config/gallery-config.json";

/// Reads and writes the singleton `GalleryConfig` document
/// DOCUMENTATION: The document is located through `list` rather than direct
/// addressing so backends without stable key->URL mapping still work.
/// Saves replace the whole document - last writer wins
#[derive(Clone)]
pub struct GalleryConfigStore {
    store: SharedBlobStore,
}

impl GalleryConfigStore {
    pub fn new(store: SharedBlobStore) -> Self {
        GalleryConfigStore { store }
    }

    /// Load the persisted document, falling back to the embedded seed
    /// The seed is never persisted by this call
    pub async fn load(&self) -> Result<GalleryConfig, GalleryError> {
        let entries = self.store.list().await?;
        let entry = match entries.into_iter().find(|entry| entry.key == CONFIG_KEY) {
            Some(entry) => entry,
            None => {
                log::info!("No persisted gallery configuration, serving seed document");
                return Ok(GalleryConfig::seed());
            }
        };

        let bytes = match self.store.get(&entry.key).await {
            Ok(bytes) => bytes,
            // Raced with a concurrent save's delete-then-put; treat as absent
            Err(GalleryError::NotFound(_)) => return Ok(GalleryConfig::seed()),
            Err(e) => return Err(e),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            GalleryError::ConfigError(format!("Persisted gallery document is invalid: {}", e))
        })
    }

    /// Replace the persisted document entirely, stamping `lastUpdated`
    /// Returns the document as written
    pub async fn save(&self, config: &GalleryConfig) -> Result<GalleryConfig, GalleryError> {
        let mut document = config.clone();
        document.last_updated = Utc::now();

        let body = serde_json::to_vec_pretty(&document).map_err(|e| {
            GalleryError::ConfigError(format!("Gallery document failed to serialize: {}", e))
        })?;

        // Delete any prior version first so stores that suffix keys never
        // accumulate stale copies of the singleton
        let entries = self.store.list().await?;
        if let Some(existing) = entries.into_iter().find(|entry| entry.key == CONFIG_KEY) {
            self.store.delete(&existing.url).await?;
        }

        self.store
            .put(CONFIG_KEY, Bytes::from(body), "application/json")
            .await?;

        log::info!(
            "Saved gallery configuration ({} stories)",
            document.photo_stories.len()
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::S3BlobStore;
    use object_store::memory::InMemory;
    use std::sync::Arc;

    fn memory_config_store() -> GalleryConfigStore {
        let store: SharedBlobStore = Arc::new(S3BlobStore::with_store(
            Arc::new(InMemory::new()),
            "",
            "https://cdn.example.com",
        ));
        GalleryConfigStore::new(store)
    }

    #[tokio::test]
    async fn test_load_on_empty_store_returns_seed() {
        let config_store = memory_config_store();

        let config = config_store.load().await.unwrap();

        assert_eq!(config.hero_image, crate::models::DEFAULT_HERO_IMAGE);
        assert_eq!(config.photo_stories.len(), 4);
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let config_store = memory_config_store();

        let mut config = GalleryConfig::seed();
        config.hero_image = "https://cdn.example.com/hero/1_h.jpg".to_string();

        let saved = config_store.save(&config).await.unwrap();
        let loaded = config_store.load().await.unwrap();

        assert_eq!(loaded, saved);
        assert_eq!(loaded.hero_image, config.hero_image);
        assert_eq!(loaded.photo_stories, config.photo_stories);
        // the store stamps lastUpdated itself
        assert!(saved.last_updated >= config.last_updated);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let config_store = memory_config_store();

        let mut config_a = GalleryConfig::seed();
        config_a.hero_image = "/a.jpg".to_string();
        let mut config_b = GalleryConfig::seed();
        config_b.hero_image = "/b.jpg".to_string();
        config_b.photo_stories.clear();

        config_store.save(&config_a).await.unwrap();
        let saved_b = config_store.save(&config_b).await.unwrap();
        let loaded = config_store.load().await.unwrap();

        assert_eq!(loaded, saved_b);
        assert_eq!(loaded.hero_image, "/b.jpg");
        assert!(loaded.photo_stories.is_empty());
    }

    #[tokio::test]
    async fn test_save_keeps_a_single_config_object() {
        let config_store = memory_config_store();

        config_store.save(&GalleryConfig::seed()).await.unwrap();
        config_store.save(&GalleryConfig::seed()).await.unwrap();

        let entries = config_store.store.list().await.unwrap();
        let configs = entries.iter().filter(|e| e.key == CONFIG_KEY).count();
        assert_eq!(configs, 1);
    }
}
