// src/services/read_model.rs
// DOCUMENTATION: Public gallery read model
// PURPOSE: Projects the stored document into the shape the public page renders

use crate::models::{GalleryConfig, GalleryView, StoryView};

pub struct GalleryReadModel;

impl GalleryReadModel {
    /// Project the document for public rendering
    /// DOCUMENTATION: Maps the legacy imageUrl union into a plain ordered
    /// list per story so downstream rendering never branches on the union.
    /// A story without images projects to an empty list, not an error
    pub fn project(config: &GalleryConfig) -> GalleryView {
        GalleryView {
            hero_image: config.hero_image.clone(),
            stories: config
                .photo_stories
                .iter()
                .map(|story| StoryView {
                    id: story.id,
                    title: story.title.clone(),
                    description: story.description.clone(),
                    location: story.location.clone(),
                    display_type: story.display_type,
                    images: story.image_url.urls(),
                })
                .collect(),
        }
    }
}
