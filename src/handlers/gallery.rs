// src/handlers/gallery.rs
// DOCUMENTATION: HTTP handlers for the gallery configuration document
// PURPOSE: Parse requests, call the configuration store, return responses

use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{web, HttpResponse, Responder};

use crate::errors::GalleryError;
use crate::models::{GalleryConfig, SaveConfigResponse};
use crate::services::{GalleryConfigStore, GalleryReadModel};

/// GET /gallery-config
/// The persisted document, or the embedded seed when none exists yet
pub async fn get_gallery_config(
    config_store: web::Data<GalleryConfigStore>,
) -> Result<impl Responder, GalleryError> {
    let config = config_store.load().await?;
    Ok(HttpResponse::Ok().json(config))
}

/// POST /gallery-config
/// Whole-document replace; the server stamps lastUpdated
pub async fn save_gallery_config(
    config_store: web::Data<GalleryConfigStore>,
    req: web::Json<GalleryConfig>,
) -> Result<impl Responder, GalleryError> {
    config_store.save(&req).await?;
    Ok(HttpResponse::Ok().json(SaveConfigResponse {
        success: true,
        message: "Gallery configuration saved".to_string(),
    }))
}

/// GET /gallery-view
/// Read-model projection for the public page
/// The document can change between visits, so every view load fetches fresh
pub async fn get_gallery_view(
    config_store: web::Data<GalleryConfigStore>,
) -> Result<impl Responder, GalleryError> {
    let config = config_store.load().await?;
    let view = GalleryReadModel::project(&config);

    Ok(HttpResponse::Ok()
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .json(view))
}

/// Configuration for gallery routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/gallery-config", web::get().to(get_gallery_config))
        .route("/gallery-config", web::post().to(save_gallery_config))
        .route("/gallery-view", web::get().to(get_gallery_view));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{S3BlobStore, SharedBlobStore};
    use actix_web::{test, App};
    use object_store::memory::InMemory;
    use std::sync::Arc;

    fn test_config_store() -> GalleryConfigStore {
        let store: SharedBlobStore = Arc::new(S3BlobStore::with_store(
            Arc::new(InMemory::new()),
            "",
            "https://cdn.example.com",
        ));
        GalleryConfigStore::new(store)
    }

    #[actix_web::test]
    async fn test_get_falls_back_to_seed_document() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config_store()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/gallery-config").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["heroImage"], "/images/hero/hero-default.jpg");
        assert_eq!(body["photoStories"].as_array().unwrap().len(), 4);
    }

    #[actix_web::test]
    async fn test_save_then_get_round_trips() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config_store()))
                .configure(config),
        )
        .await;

        let document = serde_json::json!({
            "heroImage": "/hero.jpg",
            "photoStories": [{
                "id": 1,
                "title": "One",
                "description": "d",
                "imageUrl": ["/a.jpg", "/b.jpg"],
                "location": "l",
                "displayType": "carousel"
            }]
        });

        let req = test::TestRequest::post()
            .uri("/gallery-config")
            .set_json(&document)
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);

        let req = test::TestRequest::get().uri("/gallery-config").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["heroImage"], "/hero.jpg");
        assert_eq!(body["photoStories"][0]["imageUrl"][1], "/b.jpg");
        assert!(body["lastUpdated"].is_string()); // stamped by the server
    }

    #[actix_web::test]
    async fn test_view_normalizes_and_bypasses_caches() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config_store()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/gallery-view").to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(
            response.headers().get("cache-control").unwrap(),
            "no-store"
        );

        let body: serde_json::Value = test::read_body_json(response).await;
        let stories = body["stories"].as_array().unwrap();
        assert_eq!(stories.len(), 4);
        // every story carries a plain images array, never the raw union
        for story in stories {
            assert!(story["images"].is_array());
        }
    }
}
