// src/handlers/images.rs
// DOCUMENTATION: HTTP handlers for image upload and deletion
// PURPOSE: Multipart upload, idempotent delete, hero folder listing

use std::path::Path;

use actix_multipart::{Multipart, MultipartError};
use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use validator::Validate;

use crate::config::Config;
use crate::errors::GalleryError;
use crate::models::{DeleteImageRequest, DeleteImageResponse, UploadResponse};
use crate::services::{ImageService, PendingImage};
use crate::storage::{BlobStore, DeleteOutcome, SharedBlobStore};

/// Default upload folder when the form does not name one
const DEFAULT_UPLOAD_FOLDER: &str = "stories";

fn bad_multipart(e: MultipartError) -> GalleryError {
    GalleryError::InvalidInput(format!("Malformed multipart payload: {}", e))
}

/// POST /upload
/// Multipart form: `file` (required, image/*) and `folder` (optional)
pub async fn upload_image(
    store: web::Data<SharedBlobStore>,
    mut payload: Multipart,
) -> Result<impl Responder, GalleryError> {
    let mut file: Option<PendingImage> = None;
    let mut folder = DEFAULT_UPLOAD_FOLDER.to_string();

    while let Some(mut field) = payload.try_next().await.map_err(bad_multipart)? {
        let field_name = field
            .content_disposition()
            .get_name()
            .unwrap_or("")
            .to_string();

        match field_name.as_str() {
            "file" => {
                let file_name = field
                    .content_disposition()
                    .get_filename()
                    .map(|name| name.to_string())
                    .unwrap_or_else(|| "upload".to_string());
                let content_type = field
                    .content_type()
                    .map(|mime| mime.to_string())
                    .unwrap_or_default();

                let mut data = web::BytesMut::new();
                while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
                    data.extend_from_slice(&chunk);
                }

                file = Some(PendingImage::new(&file_name, &content_type, data.freeze()));
            }
            "folder" => {
                let mut data = web::BytesMut::new();
                while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
                    data.extend_from_slice(&chunk);
                }
                let value = String::from_utf8_lossy(&data).trim().to_string();
                if !value.is_empty() {
                    folder = value;
                }
            }
            _ => {
                // drain unknown fields
                while field.try_next().await.map_err(bad_multipart)?.is_some() {}
            }
        }
    }

    let image = file.ok_or_else(|| GalleryError::InvalidInput("No file provided".to_string()))?;

    // Only image payloads are accepted; nothing is stored otherwise
    let is_image = image
        .content_type
        .parse::<mime::Mime>()
        .map(|parsed| parsed.type_() == mime::IMAGE)
        .unwrap_or(false);
    if !is_image {
        return Err(GalleryError::InvalidInput(
            "The file must be an image".to_string(),
        ));
    }

    let url = ImageService::upload(
        store.get_ref().as_ref(),
        image.data.clone(),
        &image.file_name,
        &image.content_type,
        &folder,
    )
    .await?;

    Ok(HttpResponse::Ok().json(UploadResponse {
        success: true,
        url,
        message: "Image uploaded".to_string(),
    }))
}

/// DELETE /delete-image
/// Idempotent: succeeds whether or not the object still exists
pub async fn delete_image(
    store: web::Data<SharedBlobStore>,
    req: web::Json<DeleteImageRequest>,
) -> Result<impl Responder, GalleryError> {
    if let Err(e) = req.validate() {
        return Err(GalleryError::ValidationError(e.to_string()));
    }

    let message = match store.delete(&req.image_url).await? {
        DeleteOutcome::Deleted => "Image deleted",
        DeleteOutcome::NotFound => "Image already removed or never stored",
    };

    Ok(HttpResponse::Ok().json(DeleteImageResponse {
        success: true,
        message: message.to_string(),
    }))
}

/// GET /images/hero (filesystem backend only)
/// Hero folder listing, most recently modified first
pub async fn hero_images(config: web::Data<Config>) -> Result<impl Responder, GalleryError> {
    let response =
        ImageService::hero_images(Path::new(&config.images_dir), &config.public_images_path)
            .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Configuration for image routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload", web::post().to(upload_image))
        .route("/delete-image", web::delete().to(delete_image));
}

/// Routes that only exist on the filesystem backend
pub fn hero_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/images/hero", web::get().to(hero_images));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::S3BlobStore;
    use actix_web::{test, App};
    use object_store::memory::InMemory;
    use std::sync::Arc;

    fn memory_store() -> SharedBlobStore {
        Arc::new(S3BlobStore::with_store(
            Arc::new(InMemory::new()),
            "",
            "https://cdn.example.com",
        ))
    }

    fn multipart_body(file_field: Option<(&str, &str, &[u8])>, folder: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some((name, content_type, data)) = file_field {
            body.extend_from_slice(
                format!(
                    "--BOUNDARY\r\nContent-Disposition: form-data; name=\"file\"; \
                     filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    name, content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        if let Some(folder) = folder {
            body.extend_from_slice(
                format!(
                    "--BOUNDARY\r\nContent-Disposition: form-data; name=\"folder\"\r\n\r\n{}\r\n",
                    folder
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(b"--BOUNDARY--\r\n");
        body
    }

    #[actix_web::test]
    async fn test_upload_stores_image_and_returns_url() {
        let store = memory_store();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .configure(config),
        )
        .await;

        let body = multipart_body(Some(("beach day.jpg", "image/jpeg", b"jpeg")), None);
        let req = test::TestRequest::post()
            .uri("/upload")
            .insert_header((
                "content-type",
                "multipart/form-data; boundary=BOUNDARY",
            ))
            .set_payload(body)
            .to_request();

        let response: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response["success"], true);
        let url = response["url"].as_str().unwrap();
        assert!(url.starts_with("https://cdn.example.com/stories/"));
        assert!(url.ends_with("_beach_day.jpg"));
    }

    #[actix_web::test]
    async fn test_upload_honors_the_folder_field() {
        let store = memory_store();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .configure(config),
        )
        .await;

        let body = multipart_body(Some(("h.png", "image/png", b"png")), Some("hero"));
        let req = test::TestRequest::post()
            .uri("/upload")
            .insert_header((
                "content-type",
                "multipart/form-data; boundary=BOUNDARY",
            ))
            .set_payload(body)
            .to_request();

        let response: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(response["url"]
            .as_str()
            .unwrap()
            .starts_with("https://cdn.example.com/hero/"));
    }

    #[actix_web::test]
    async fn test_upload_rejects_non_image_and_stores_nothing() {
        let store = memory_store();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .configure(config),
        )
        .await;

        let body = multipart_body(Some(("notes.txt", "text/plain", b"hello")), None);
        let req = test::TestRequest::post()
            .uri("/upload")
            .insert_header((
                "content-type",
                "multipart/form-data; boundary=BOUNDARY",
            ))
            .set_payload(body)
            .to_request();

        let response = test::call_service(&app, req).await;

        assert_eq!(response.status(), 400);
        assert!(store.list().await.unwrap().is_empty()); // nothing created
    }

    #[actix_web::test]
    async fn test_upload_without_file_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(memory_store()))
                .configure(config),
        )
        .await;

        let body = multipart_body(None, Some("stories"));
        let req = test::TestRequest::post()
            .uri("/upload")
            .insert_header((
                "content-type",
                "multipart/form-data; boundary=BOUNDARY",
            ))
            .set_payload(body)
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), 400);
    }

    #[actix_web::test]
    async fn test_delete_image_is_idempotent_over_http() {
        let store = memory_store();
        let url = store
            .put("stories/1_a.jpg", bytes::Bytes::from_static(b"x"), "image/jpeg")
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .configure(config),
        )
        .await;

        for _ in 0..2 {
            let req = test::TestRequest::delete()
                .uri("/delete-image")
                .set_json(serde_json::json!({ "imageUrl": url }))
                .to_request();
            let response: serde_json::Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(response["success"], true); // second call never errors
        }
    }

    #[actix_web::test]
    async fn test_delete_image_requires_a_url() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(memory_store()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri("/delete-image")
            .set_json(serde_json::json!({ "imageUrl": "" }))
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), 400);
    }
}
