// src/storage/fs_store.rs
// DOCUMENTATION: Local filesystem blob store
// PURPOSE: Stores images under a public directory tree served statically

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use super::{BlobEntry, BlobStore, DeleteOutcome};
use crate::errors::GalleryError;

/// Blob store backed by a directory tree (e.g. `public/images`)
/// DOCUMENTATION: Keys map 1:1 to relative paths under the root; URLs are
/// the same paths under the public mount point (e.g. `/images/...`)
pub struct FilesystemBlobStore {
    root: PathBuf,
    public_base: String,
}

impl FilesystemBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base: &str) -> Self {
        FilesystemBlobStore {
            root: root.into(),
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute path for a key; keys never escape the root
    fn resolve(&self, key: &str) -> Result<PathBuf, GalleryError> {
        let relative = Path::new(key);
        if relative.components().any(|c| {
            matches!(
                c,
                std::path::Component::ParentDir | std::path::Component::RootDir
            )
        }) {
            return Err(GalleryError::InvalidInput(format!(
                "Invalid storage key: {}",
                key
            )));
        }
        Ok(self.root.join(relative))
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
impl BlobStore for FilesystemBlobStore {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        _content_type: &str,
    ) -> Result<String, GalleryError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(GalleryError::storage)?;
        }
        fs::write(&path, &data).await.map_err(GalleryError::storage)?;

        log::debug!("Stored {} bytes at {}", data.len(), path.display());
        Ok(self.url_for_key(key))
    }

    async fn get(&self, key: &str) -> Result<Bytes, GalleryError> {
        let path = self.resolve(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(GalleryError::NotFound(format!("No object for key: {}", key)))
            }
            Err(e) => Err(GalleryError::storage(e)),
        }
    }

    async fn delete(&self, url: &str) -> Result<DeleteOutcome, GalleryError> {
        // URLs outside our public mount were never stored here
        let key = match self.key_for_url(url) {
            Some(key) => key,
            None => return Ok(DeleteOutcome::NotFound),
        };

        let path = self.resolve(&key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DeleteOutcome::NotFound),
            Err(e) => Err(GalleryError::storage(e)),
        }
    }

    async fn list(&self) -> Result<Vec<BlobEntry>, GalleryError> {
        let root = self.root.clone();
        let public_base = self.public_base.clone();

        // walkdir is synchronous; run the scan off the reactor
        let entries = tokio::task::spawn_blocking(move || {
            let mut entries = Vec::new();
            for entry in walkdir::WalkDir::new(&root)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
            {
                let key = match entry.path().strip_prefix(&root) {
                    Ok(relative) => relative.to_string_lossy().replace('\\', "/"),
                    Err(_) => continue,
                };
                let url = format!("{}/{}", public_base, key);
                entries.push(BlobEntry { key, url });
            }
            entries
        })
        .await
        .map_err(GalleryError::storage)?;

        Ok(entries)
    }
}
