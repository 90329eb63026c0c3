// src/storage/mod.rs
// DOCUMENTATION: Blob storage module organization
// PURPOSE: Uniform adapter over the two interchangeable image stores

pub mod fs_store;
pub mod s3_store;

pub use fs_store::FilesystemBlobStore;
pub use s3_store::S3BlobStore;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::GalleryError;

/// Shared handle injected into handlers and services
pub type SharedBlobStore = Arc<dyn BlobStore>;

/// One stored object as reported by `list`
#[derive(Debug, Clone)]
pub struct BlobEntry {
    /// Store-relative key, e.g. "stories/1712000000000_beach.jpg"
    pub key: String,

    /// Publicly dereferenceable URL for the same object
    pub url: String,
}

/// Result of a delete call
/// DOCUMENTATION: Absence is data, not an error - callers may retry deletes
/// against stale URLs and placeholders that were never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Uniform interface over the filesystem and managed object store backends
/// DOCUMENTATION: Callers above this layer must not be able to tell the two
/// implementations apart except by latency. Returned URLs are immediately
/// readable by subsequent GETs
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a byte payload under `key` and return its public URL
    async fn put(&self, key: &str, data: Bytes, content_type: &str)
        -> Result<String, GalleryError>;

    /// Read an object's bytes by key
    async fn get(&self, key: &str) -> Result<Bytes, GalleryError>;

    /// Remove the object a public URL points at (idempotent)
    async fn delete(&self, url: &str) -> Result<DeleteOutcome, GalleryError>;

    /// Enumerate stored objects with their keys and URLs
    async fn list(&self) -> Result<Vec<BlobEntry>, GalleryError>;
}
