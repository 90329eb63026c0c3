// src/models/gallery.rs
// DOCUMENTATION: Singleton gallery configuration document
// PURPOSE: The whole-document state persisted by the configuration store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DisplayType, ImageSet, PhotoStory};

/// Default hero shown before an owner uploads their own
pub const DEFAULT_HERO_IMAGE: &str = "/images/hero/hero-default.jpg";

/// The singleton gallery document
/// DOCUMENTATION: Created implicitly from the embedded seed on first read,
/// wholly replaced (never patched) on every save - last writer wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryConfig {
    /// Image shown at the top of the public gallery
    pub hero_image: String,

    /// Ordered stories - order is display order
    pub photo_stories: Vec<PhotoStory>,

    /// Set by the store on every write, informational only
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl GalleryConfig {
    /// The embedded seed document returned when nothing is persisted yet
    pub fn seed() -> Self {
        GalleryConfig {
            hero_image: DEFAULT_HERO_IMAGE.to_string(),
            photo_stories: vec![
                PhotoStory {
                    id: 1,
                    title: "First steps in Italy".to_string(),
                    description: "The cobbled streets of Rome tell stories that span \
                                  millennia. Every corner reveals a new chapter where \
                                  ancient architecture and modern life intertwine."
                        .to_string(),
                    image_url: ImageSet::Single("/images/stories/rome-default.jpg".to_string()),
                    location: "Rome, Italy".to_string(),
                    display_type: DisplayType::Single,
                },
                PhotoStory {
                    id: 2,
                    title: "Sunset over Santorini".to_string(),
                    description: "Whitewashed houses against the deep blue of the Aegean. \
                                  The setting sun paints the sky in orange and pink, a \
                                  natural canvas that takes your breath away."
                        .to_string(),
                    image_url: ImageSet::Multiple(vec![
                        "/images/stories/santorini-1-default.jpg".to_string(),
                        "/images/stories/santorini-2-default.jpg".to_string(),
                        "/images/stories/santorini-3-default.jpg".to_string(),
                    ]),
                    location: "Santorini, Greece".to_string(),
                    display_type: DisplayType::Carousel,
                },
                PhotoStory {
                    id: 3,
                    title: "Forests of Japan".to_string(),
                    description: "Lost in the bamboo groves of Arashiyama we found a rare \
                                  stillness. Rustling leaves and filtered light create an \
                                  almost mystical atmosphere."
                        .to_string(),
                    image_url: ImageSet::Single("/images/stories/japan-default.jpg".to_string()),
                    location: "Arashiyama, Japan".to_string(),
                    display_type: DisplayType::Single,
                },
                PhotoStory {
                    id: 4,
                    title: "Colors of Marrakech".to_string(),
                    description: "An explosion of colors, scents and sounds. The souks of \
                                  Marrakech are a complete sensory experience, every alley \
                                  revealing new handcrafted treasures."
                        .to_string(),
                    image_url: ImageSet::Multiple(vec![
                        "/images/stories/marrakech-1-default.jpg".to_string(),
                        "/images/stories/marrakech-2-default.jpg".to_string(),
                        "/images/stories/marrakech-3-default.jpg".to_string(),
                        "/images/stories/marrakech-4-default.jpg".to_string(),
                    ]),
                    location: "Marrakech, Morocco".to_string(),
                    display_type: DisplayType::Carousel,
                },
            ],
            last_updated: Utc::now(),
        }
    }

    /// Next unique story id: max(existing) + 1, starting at 1 on an empty list
    pub fn next_story_id(&self) -> u32 {
        self.photo_stories
            .iter()
            .map(|story| story.id)
            .max()
            .map(|max| max + 1)
            .unwrap_or(1)
    }

    /// Append a placeholder story and return its id
    pub fn add_story(&mut self) -> u32 {
        let id = self.next_story_id();
        self.photo_stories.push(PhotoStory::placeholder(id));
        id
    }

    /// Remove a story by id, returning it when present
    pub fn remove_story(&mut self, id: u32) -> Option<PhotoStory> {
        let index = self.photo_stories.iter().position(|story| story.id == id)?;
        Some(self.photo_stories.remove(index))
    }

    pub fn story(&self, id: u32) -> Option<&PhotoStory> {
        self.photo_stories.iter().find(|story| story.id == id)
    }

    pub fn story_mut(&mut self, id: u32) -> Option<&mut PhotoStory> {
        self.photo_stories.iter_mut().find(|story| story.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_story_id_on_empty_list() {
        let config = GalleryConfig {
            hero_image: "/default.jpg".to_string(),
            photo_stories: vec![],
            last_updated: Utc::now(),
        };

        assert_eq!(config.next_story_id(), 1); // explicit starting id
    }

    #[test]
    fn test_next_story_id_is_max_plus_one() {
        let mut config = GalleryConfig::seed();
        config.remove_story(2);

        // ids 1, 3, 4 remain
        assert_eq!(config.next_story_id(), 5);
    }

    #[test]
    fn test_add_story_assigns_unique_ids() {
        let mut config = GalleryConfig {
            hero_image: "/default.jpg".to_string(),
            photo_stories: vec![],
            last_updated: Utc::now(),
        };

        let first = config.add_story();
        let second = config.add_story();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(config.photo_stories.len(), 2);

        let mut ids: Vec<u32> = config.photo_stories.iter().map(|s| s.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_seed_display_types_agree_with_counts() {
        let config = GalleryConfig::seed();

        for story in &config.photo_stories {
            assert_eq!(
                story.display_type,
                DisplayType::for_count(story.image_url.count()),
                "seed story {} violates the cardinality rule",
                story.id
            );
        }
    }

    #[test]
    fn test_document_round_trips_through_json() {
        let config = GalleryConfig::seed();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: GalleryConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.hero_image, config.hero_image);
        assert_eq!(parsed.photo_stories.len(), config.photo_stories.len());
        assert_eq!(parsed.photo_stories[1].image_url.count(), 3);
    }

    #[test]
    fn test_document_accepts_missing_last_updated() {
        // Clients may omit lastUpdated; the store overrides it on save anyway
        let parsed: GalleryConfig = serde_json::from_str(
            r#"{"heroImage":"/default.jpg","photoStories":[]}"#,
        )
        .unwrap();

        assert_eq!(parsed.hero_image, "/default.jpg");
        assert!(parsed.photo_stories.is_empty());
    }
}
