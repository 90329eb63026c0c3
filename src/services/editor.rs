// src/services/editor.rs
// DOCUMENTATION: Story mutation engine
// PURPOSE: Staging area for pending uploads and the commit cycle that merges
// them into the gallery document

use std::collections::HashMap;

use bytes::Bytes;
use futures::future::{join_all, try_join_all};
use validator::Validate;

use crate::errors::GalleryError;
use crate::models::{
    DisplayType, GalleryConfig, ImageSet, PhotoStory, UpdateStoryRequest, DEFAULT_HERO_IMAGE,
};
use crate::services::config_store::GalleryConfigStore;
use crate::services::image_service::ImageService;
use crate::storage::SharedBlobStore;

/// A file selected for upload but not yet stored
#[derive(Debug, Clone)]
pub struct PendingImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl PendingImage {
    pub fn new(file_name: &str, content_type: &str, data: Bytes) -> Self {
        PendingImage {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            data,
        }
    }

    fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Result of removing an already persisted image
#[derive(Debug)]
pub struct RemovalOutcome {
    /// URL to clean up in the background; None for protected artwork
    pub cleanup_url: Option<String>,

    /// New derived display mode when the removal flipped it
    pub mode_changed: Option<DisplayType>,
}

/// One story whose uploads failed during commit
#[derive(Debug)]
pub struct StoryFailure {
    pub story_id: u32,
    pub title: String,
    pub message: String,
}

/// What a commit did
/// DOCUMENTATION: Commit is best-effort, not transactional - surviving
/// stories' changes are persisted even when other stories failed
#[derive(Debug)]
pub struct CommitReport {
    pub uploaded_images: usize,
    pub hero_replaced: bool,
    pub hero_failure: Option<String>,
    pub story_failures: Vec<StoryFailure>,
}

impl CommitReport {
    pub fn has_failures(&self) -> bool {
        self.hero_failure.is_some() || !self.story_failures.is_empty()
    }
}

/// Staging area over a gallery document
/// DOCUMENTATION: Pure in-memory mutations keyed by story id; nothing
/// touches the blob store until `commit`. Display types are re-derived from
/// (persisted + pending) counts after every operation
pub struct GalleryEditor {
    config: GalleryConfig,
    pending: HashMap<u32, Vec<PendingImage>>,
    pending_hero: Option<PendingImage>,
}

impl GalleryEditor {
    pub fn new(config: GalleryConfig) -> Self {
        GalleryEditor {
            config,
            pending: HashMap::new(),
            pending_hero: None,
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn pending_count(&self, story_id: u32) -> usize {
        self.pending.get(&story_id).map_or(0, Vec::len)
    }

    pub fn has_pending_hero(&self) -> bool {
        self.pending_hero.is_some()
    }

    /// Append a placeholder story and return its id
    pub fn add_story(&mut self) -> u32 {
        self.config.add_story()
    }

    /// Remove a story, discarding its not-yet-uploaded files
    pub fn delete_story(&mut self, story_id: u32) -> Result<PhotoStory, GalleryError> {
        self.pending.remove(&story_id);
        self.config
            .remove_story(story_id)
            .ok_or_else(|| GalleryError::NotFound(format!("No story with id {}", story_id)))
    }

    /// Apply a partial metadata update to a story
    pub fn update_story(
        &mut self,
        story_id: u32,
        update: UpdateStoryRequest,
    ) -> Result<(), GalleryError> {
        update
            .validate()
            .map_err(|e| GalleryError::ValidationError(e.to_string()))?;

        let story = self
            .config
            .story_mut(story_id)
            .ok_or_else(|| GalleryError::NotFound(format!("No story with id {}", story_id)))?;

        if let Some(title) = update.title {
            story.title = title;
        }
        if let Some(description) = update.description {
            story.description = description;
        }
        if let Some(location) = update.location {
            story.location = location;
        }
        Ok(())
    }

    /// Stage files for upload against a story; non-image files are ignored
    /// Returns the new display mode when staging flipped it
    pub fn stage_images(
        &mut self,
        story_id: u32,
        images: Vec<PendingImage>,
    ) -> Result<Option<DisplayType>, GalleryError> {
        if self.config.story(story_id).is_none() {
            return Err(GalleryError::NotFound(format!(
                "No story with id {}",
                story_id
            )));
        }

        self.pending
            .entry(story_id)
            .or_default()
            .extend(images.into_iter().filter(PendingImage::is_image));

        Ok(self.refresh_display_type(story_id))
    }

    /// Stage a replacement hero image (a later one replaces an earlier one)
    pub fn stage_hero_image(&mut self, image: PendingImage) {
        if image.is_image() {
            self.pending_hero = Some(image);
        }
    }

    pub fn discard_pending_hero(&mut self) {
        self.pending_hero = None;
    }

    /// Drop one staged file from a story
    pub fn remove_pending_image(
        &mut self,
        story_id: u32,
        index: usize,
    ) -> Result<Option<DisplayType>, GalleryError> {
        let staged = self
            .pending
            .get_mut(&story_id)
            .filter(|staged| index < staged.len())
            .ok_or_else(|| {
                GalleryError::InvalidInput(format!(
                    "No pending image {} for story {}",
                    index, story_id
                ))
            })?;
        staged.remove(index);

        Ok(self.refresh_display_type(story_id))
    }

    /// Remove an already persisted image from a story
    /// Array form drops index i and collapses; string form clears to empty
    pub fn remove_existing_image(
        &mut self,
        story_id: u32,
        index: usize,
    ) -> Result<RemovalOutcome, GalleryError> {
        let story = self
            .config
            .story_mut(story_id)
            .ok_or_else(|| GalleryError::NotFound(format!("No story with id {}", story_id)))?;

        let removed = match &story.image_url {
            ImageSet::Empty => {
                return Err(GalleryError::InvalidInput(format!(
                    "Story {} has no image to remove",
                    story_id
                )))
            }
            ImageSet::Single(_) => story.image_url.remove(0),
            ImageSet::Multiple(_) => story.image_url.remove(index),
        }
        .ok_or_else(|| {
            GalleryError::InvalidInput(format!("No image {} on story {}", index, story_id))
        })?;

        let mode_changed = self.refresh_display_type(story_id);
        let cleanup_url = if ImageService::is_protected_url(&removed) {
            None
        } else {
            Some(removed)
        };

        Ok(RemovalOutcome {
            cleanup_url,
            mode_changed,
        })
    }

    /// Reset the hero to the default image, reporting the old URL for cleanup
    pub fn remove_existing_hero(&mut self) -> Option<String> {
        let old = std::mem::replace(&mut self.config.hero_image, DEFAULT_HERO_IMAGE.to_string());
        if ImageService::is_protected_url(&old) {
            None
        } else {
            Some(old)
        }
    }

    /// Re-derive a story's display mode from persisted + pending counts
    fn refresh_display_type(&mut self, story_id: u32) -> Option<DisplayType> {
        let pending = self.pending_count(story_id);
        let story = self.config.story_mut(story_id)?;

        let mode = DisplayType::for_count(story.image_url.count() + pending);
        if story.display_type != mode {
            story.display_type = mode;
            return Some(mode);
        }
        None
    }

    /// Upload everything staged, merge the resulting URLs and persist
    ///
    /// Uploads for distinct files run concurrently; each story's results are
    /// reassembled in submission order. A story whose upload fails keeps its
    /// files staged and is reported in the returned report - the document
    /// save happens regardless so surviving stories' changes are not lost
    pub async fn commit(
        &mut self,
        store: &SharedBlobStore,
        config_store: &GalleryConfigStore,
    ) -> Result<CommitReport, GalleryError> {
        let mut report = CommitReport {
            uploaded_images: 0,
            hero_replaced: false,
            hero_failure: None,
            story_failures: Vec::new(),
        };

        // Hero first - it is its own unit of failure
        if let Some(hero) = self.pending_hero.take() {
            match ImageService::upload(
                store.as_ref(),
                hero.data.clone(),
                &hero.file_name,
                &hero.content_type,
                "hero",
            )
            .await
            {
                Ok(url) => {
                    self.config.hero_image = url;
                    report.hero_replaced = true;
                    report.uploaded_images += 1;
                }
                Err(e) => {
                    log::error!("Hero image upload failed: {}", e);
                    report.hero_failure = Some(e.to_string());
                    self.pending_hero = Some(hero); // left staged for retry
                }
            }
        }

        // Fan out story uploads; each job uploads one story's files
        // concurrently and yields them back in submission order
        let staged = std::mem::take(&mut self.pending);
        let mut jobs = Vec::new();
        for (story_id, images) in staged {
            if images.is_empty() || self.config.story(story_id).is_none() {
                continue; // no-op story, or pending left over from a deleted one
            }

            jobs.push(async move {
                let folder = format!("story-{}", story_id);
                let uploads: Vec<_> = images
                    .iter()
                    .map(|image| {
                        ImageService::upload(
                            store.as_ref(),
                            image.data.clone(),
                            &image.file_name,
                            &image.content_type,
                            &folder,
                        )
                    })
                    .collect();

                match try_join_all(uploads).await {
                    Ok(urls) => Ok((story_id, urls)),
                    Err(e) => Err((story_id, images, e)),
                }
            });
        }

        for outcome in join_all(jobs).await {
            match outcome {
                Ok((story_id, urls)) => {
                    report.uploaded_images += urls.len();
                    if let Some(story) = self.config.story_mut(story_id) {
                        story.image_url.extend(urls);
                        story.recompute_display_type();
                    }
                }
                Err((story_id, images, e)) => {
                    let title = self
                        .config
                        .story(story_id)
                        .map(|story| story.title.clone())
                        .unwrap_or_default();
                    log::error!("Upload failed for story {} ({}): {}", story_id, title, e);
                    report.story_failures.push(StoryFailure {
                        story_id,
                        title,
                        message: e.to_string(),
                    });
                    self.pending.insert(story_id, images); // left staged for retry
                }
            }
        }

        // Persist whatever merged cleanly, even after per-story failures
        self.config = config_store.save(&self.config).await?;

        Ok(report)
    }
}
