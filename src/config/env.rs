// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;

/// Which blob store backs the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Local directory tree served statically by this process
    Filesystem,

    /// Managed S3-compatible object store behind a public base URL
    Object,
}

impl StorageBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "filesystem" | "fs" | "local" => Some(StorageBackend::Filesystem),
            "object" | "s3" | "blob" => Some(StorageBackend::Object),
            _ => None,
        }
    }
}

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8080)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Selected blob store backend
    pub storage_backend: StorageBackend,

    /// Filesystem backend: image tree root on disk
    pub images_dir: String,

    /// Filesystem backend: public mount point of the image tree
    pub public_images_path: String,

    /// Object backend: store URL, e.g. s3://bucket/gallery
    pub object_store_url: String,

    /// Object backend: public base URL the stored objects resolve under
    pub object_public_url: String,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv().ok();

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .and_then(|value| {
                let parsed = StorageBackend::parse(&value);
                if parsed.is_none() {
                    log::warn!("Unknown STORAGE_BACKEND '{}', using filesystem", value);
                }
                parsed
            })
            .unwrap_or(StorageBackend::Filesystem);

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            storage_backend,

            images_dir: env::var("IMAGES_DIR").unwrap_or_else(|_| "public/images".to_string()),

            public_images_path: env::var("PUBLIC_IMAGES_PATH")
                .unwrap_or_else(|_| "/images".to_string()),

            object_store_url: env::var("OBJECT_STORE_URL").unwrap_or_else(|_| String::new()),

            object_public_url: env::var("OBJECT_PUBLIC_URL").unwrap_or_else(|_| String::new()),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.storage_backend == StorageBackend::Object {
            if self.object_store_url.is_empty() {
                return Err("OBJECT_STORE_URL is required for the object backend".to_string());
            }
            if self.object_public_url.is_empty() {
                return Err("OBJECT_PUBLIC_URL is required for the object backend".to_string());
            }
        }

        if self.public_images_path.is_empty() || !self.public_images_path.starts_with('/') {
            return Err("PUBLIC_IMAGES_PATH must be an absolute URL path".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!(
            StorageBackend::parse("filesystem"),
            Some(StorageBackend::Filesystem)
        );
        assert_eq!(StorageBackend::parse("S3"), Some(StorageBackend::Object));
        assert_eq!(StorageBackend::parse("dynamo"), None);
    }
}
