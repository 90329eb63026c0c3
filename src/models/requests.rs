// src/models/requests.rs
// DOCUMENTATION: Request/response DTOs for the HTTP surface
// PURPOSE: Wire shapes for upload, deletion and save endpoints

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for DELETE /delete-image
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImageRequest {
    /// URL of the stored object to remove
    #[validate(length(min = 1, message = "imageUrl is required"))]
    pub image_url: String,
}

/// Partial metadata update applied to a staged story
/// DOCUMENTATION: All fields optional - only provided fields change
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateStoryRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,
}

/// Response for POST /gallery-config
#[derive(Debug, Serialize)]
pub struct SaveConfigResponse {
    pub success: bool,
    pub message: String,
}

/// Response for POST /upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub message: String,
}

/// Response for DELETE /delete-image
#[derive(Debug, Serialize)]
pub struct DeleteImageResponse {
    pub success: bool,
    pub message: String,
}

/// Response for GET /images/hero (filesystem backend only)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroImagesResponse {
    /// Most recently modified hero image, None when the folder is absent/empty
    pub latest_image: Option<String>,

    /// All hero images, newest first
    pub all_images: Vec<String>,
}
