// src/config/storage.rs
// DOCUMENTATION: Blob store initialization
// PURPOSE: Build the configured storage backend at application startup

use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::errors::GalleryError;
use crate::storage::{FilesystemBlobStore, S3BlobStore, SharedBlobStore};

/// Initialize the configured blob store
/// DOCUMENTATION: Called once during application startup in main.rs
/// Everything above this point only sees the BlobStore trait
pub fn init_blob_store(config: &Config) -> Result<SharedBlobStore, GalleryError> {
    match config.storage_backend {
        StorageBackend::Filesystem => {
            log::info!(
                "Using filesystem blob store: {} mounted at {}",
                config.images_dir,
                config.public_images_path
            );
            Ok(Arc::new(FilesystemBlobStore::new(
                &config.images_dir,
                &config.public_images_path,
            )))
        }
        StorageBackend::Object => {
            log::info!("Using managed object store: {}", config.object_store_url);
            let store = S3BlobStore::new(&config.object_store_url, &config.object_public_url)?;
            Ok(Arc::new(store))
        }
    }
}
