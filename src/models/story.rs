// src/models/story.rs
// DOCUMENTATION: Photo story data structures
// PURPOSE: Defines the story record and its image-set union with legacy JSON shape

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a story is rendered on the public gallery
/// DOCUMENTATION: Derived field, never authoritative - recomputed from the
/// effective image count after every mutation (carousel iff count > 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    Single,
    Carousel,
}

impl DisplayType {
    /// Derive the display mode from an effective image count
    pub fn for_count(count: usize) -> Self {
        if count > 1 {
            DisplayType::Carousel
        } else {
            DisplayType::Single
        }
    }
}

/// The images attached to a story
/// DOCUMENTATION: Internal tagged representation of the legacy `imageUrl`
/// union. On the wire this is "" (no image), a bare URL string (one image)
/// or an array of two or more URLs. Construction goes through `from_urls`
/// so the array form never holds fewer than two entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSet {
    Empty,
    Single(String),
    Multiple(Vec<String>),
}

impl ImageSet {
    /// Build a normalized image set from an ordered URL list
    pub fn from_urls(mut urls: Vec<String>) -> Self {
        match urls.len() {
            0 => ImageSet::Empty,
            1 => ImageSet::Single(urls.remove(0)),
            _ => ImageSet::Multiple(urls),
        }
    }

    /// Number of images currently attached
    pub fn count(&self) -> usize {
        match self {
            ImageSet::Empty => 0,
            ImageSet::Single(_) => 1,
            ImageSet::Multiple(urls) => urls.len(),
        }
    }

    /// Ordered URL list, regardless of the underlying form
    pub fn urls(&self) -> Vec<String> {
        match self {
            ImageSet::Empty => Vec::new(),
            ImageSet::Single(url) => vec![url.clone()],
            ImageSet::Multiple(urls) => urls.clone(),
        }
    }

    /// Append URLs, re-normalizing the form
    pub fn extend(&mut self, new_urls: Vec<String>) {
        if new_urls.is_empty() {
            return;
        }
        let mut urls = self.urls();
        urls.extend(new_urls);
        *self = ImageSet::from_urls(urls);
    }

    /// Remove the image at `index`, collapsing the form as needed
    /// Returns the removed URL, or None when the index is out of range
    pub fn remove(&mut self, index: usize) -> Option<String> {
        let mut urls = self.urls();
        if index >= urls.len() {
            return None;
        }
        let removed = urls.remove(index);
        *self = ImageSet::from_urls(urls);
        Some(removed)
    }

    /// Display mode derived from this set alone (no pending uploads)
    pub fn display_type(&self) -> DisplayType {
        DisplayType::for_count(self.count())
    }
}

impl Serialize for ImageSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ImageSet::Empty => serializer.serialize_str(""),
            ImageSet::Single(url) => serializer.serialize_str(url),
            ImageSet::Multiple(urls) => urls.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ImageSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// Legacy wire shape: bare string or array of strings
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawImageUrl {
            One(String),
            Many(Vec<String>),
        }

        // Persisted arrays of length 0 or 1 are normalized on read
        Ok(match RawImageUrl::deserialize(deserializer)? {
            RawImageUrl::One(url) if url.is_empty() => ImageSet::Empty,
            RawImageUrl::One(url) => ImageSet::Single(url),
            RawImageUrl::Many(urls) => ImageSet::from_urls(urls),
        })
    }
}

/// A single photo story shown on the public gallery
/// DOCUMENTATION: Maps 1:1 to an entry of the persisted document's
/// `photoStories` array. `id` is unique within the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoStory {
    /// Unique identifier within the gallery document
    pub id: u32,

    /// Story headline
    pub title: String,

    /// Free-text body shown under the images
    pub description: String,

    /// One image, several images, or none - legacy union shape on the wire
    pub image_url: ImageSet,

    /// Free-text place name
    pub location: String,

    /// Derived rendering mode, kept in sync with `image_url`
    pub display_type: DisplayType,
}

impl PhotoStory {
    /// Placeholder content for a freshly added story
    pub fn placeholder(id: u32) -> Self {
        PhotoStory {
            id,
            title: "New destination".to_string(),
            description: "Describe your experience...".to_string(),
            image_url: ImageSet::Single("/images/placeholder.jpg".to_string()),
            location: "City, Country".to_string(),
            display_type: DisplayType::Single,
        }
    }

    /// Re-derive `display_type` from the persisted image count
    pub fn recompute_display_type(&mut self) {
        self.display_type = self.image_url.display_type();
    }
}
