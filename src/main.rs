// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, blob storage, and start HTTP server

mod config;
mod errors;
mod handlers;
mod models;
mod services;
mod storage;

use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use config::{Config, StorageBackend};
use dotenv::dotenv;
use services::GalleryConfigStore;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        // Use configured log level or default
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    log::info!("Starting voyage-gallery service...");
    log::info!("Environment: {}", config.environment);
    log::info!("Storage backend: {:?}", config.storage_backend);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize the blob store backend
    if config.storage_backend == StorageBackend::Filesystem {
        if let Err(e) = std::fs::create_dir_all(&config.images_dir) {
            log::error!("Failed to create image root {}: {}", config.images_dir, e);
            std::process::exit(1);
        }
    }
    let store = match config::init_blob_store(&config) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to initialize blob storage: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Configuration store shares the same backend
    let config_store = GalleryConfigStore::new(store.clone());

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_clone = config.clone();

    HttpServer::new(move || {
        let app = App::new()
            // Application state (blob store, config store, and config)
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(config_store.clone()))
            .app_data(web::Data::new(config_clone.clone()))
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::gallery_config)
            .configure(handlers::images_config);

        // The hero listing and the static image tree only exist when the
        // images live on the local filesystem
        if config_clone.storage_backend == StorageBackend::Filesystem {
            app.configure(handlers::hero_config).service(Files::new(
                &config_clone.public_images_path,
                &config_clone.images_dir,
            ))
        } else {
            app
        }
    })
    .bind(&server_addr)?
    .run()
    .await
}
