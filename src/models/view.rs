// src/models/view.rs
// DOCUMENTATION: Read-side projection DTOs
// PURPOSE: Normalized view of the gallery document for public rendering

use serde::Serialize;

use super::DisplayType;

/// Public projection of the whole gallery
/// DOCUMENTATION: `images` is always an ordered (possibly empty) list so
/// renderers never branch on the legacy string/array union
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryView {
    pub hero_image: String,
    pub stories: Vec<StoryView>,
}

/// One story as the public page consumes it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryView {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub display_type: DisplayType,
    pub images: Vec<String>,
}
