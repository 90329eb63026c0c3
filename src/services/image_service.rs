// src/services/image_service.rs
// DOCUMENTATION: Image upload and cleanup helpers
// PURPOSE: Key generation, best-effort deletion, hero folder listing

use std::path::Path;

use bytes::Bytes;
use chrono::Utc;
use tokio::fs;

use crate::errors::GalleryError;
use crate::models::HeroImagesResponse;
use crate::storage::{BlobStore, DeleteOutcome, SharedBlobStore};

/// Image file extensions the hero listing recognizes
const HERO_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

pub struct ImageService;

impl ImageService {
    /// Sanitize an original filename for use inside a storage key
    /// Everything outside [A-Za-z0-9.-] becomes an underscore
    pub fn sanitize_file_name(name: &str) -> String {
        name.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// Namespaced key with a uniqueness token: {folder}/{millis}_{name}
    pub fn unique_key(folder: &str, original_name: &str) -> String {
        format!(
            "{}/{}_{}",
            folder.trim_matches('/'),
            Utc::now().timestamp_millis(),
            Self::sanitize_file_name(original_name)
        )
    }

    /// Store an image payload and return its public URL
    pub async fn upload(
        store: &dyn BlobStore,
        data: Bytes,
        file_name: &str,
        content_type: &str,
        folder: &str,
    ) -> Result<String, GalleryError> {
        let key = Self::unique_key(folder, file_name);
        let url = store.put(&key, data, content_type).await?;

        log::info!("Uploaded image {} -> {}", file_name, url);
        Ok(url)
    }

    /// Whether a URL refers to bundled default/placeholder artwork that must
    /// never be deleted from the store
    pub fn is_protected_url(url: &str) -> bool {
        url.contains("default") || url.contains("placeholder")
    }

    /// Best-effort background deletion
    /// DOCUMENTATION: Cleanup of possibly-already-removed files never blocks
    /// the surrounding operation; failures land in the log only.
    /// The handle is returned for callers that want to await completion
    pub fn spawn_cleanup(store: SharedBlobStore, url: String) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            match store.delete(&url).await {
                Ok(DeleteOutcome::Deleted) => log::debug!("Cleaned up image {}", url),
                Ok(DeleteOutcome::NotFound) => log::debug!("Image {} was already gone", url),
                Err(e) => log::warn!("Background cleanup of {} failed: {}", url, e),
            }
        })
    }

    /// List hero images under `{images_root}/hero`, newest first
    /// An absent or empty folder yields `latestImage: null`, not an error
    pub async fn hero_images(
        images_root: &Path,
        public_base: &str,
    ) -> Result<HeroImagesResponse, GalleryError> {
        let hero_dir = images_root.join("hero");

        let mut reader = match fs::read_dir(&hero_dir).await {
            Ok(reader) => reader,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(HeroImagesResponse {
                    latest_image: None,
                    all_images: Vec::new(),
                });
            }
            Err(e) => return Err(GalleryError::storage(e)),
        };

        let public_base = public_base.trim_end_matches('/');
        let mut images = Vec::new();

        while let Some(entry) = reader.next_entry().await.map_err(GalleryError::storage)? {
            let name = entry.file_name().to_string_lossy().to_string();
            let is_image = name
                .rsplit_once('.')
                .map(|(_, ext)| HERO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if !is_image {
                continue;
            }

            let metadata = entry.metadata().await.map_err(GalleryError::storage)?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata
                .modified()
                .unwrap_or(std::time::SystemTime::UNIX_EPOCH);

            images.push((modified, format!("{}/hero/{}", public_base, name)));
        }

        // Most recently modified first
        images.sort_by(|a, b| b.0.cmp(&a.0));

        let all_images: Vec<String> = images.into_iter().map(|(_, url)| url).collect();
        Ok(HeroImagesResponse {
            latest_image: all_images.first().cloned(),
            all_images,
        })
    }
}
