// src/bin/seed.rs
use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;
use std::process;

// --- ANSI colors for the terminal ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

#[derive(Deserialize, Debug)]
struct SaveResponse {
    success: bool,
    #[serde(default)]
    message: String,
}

struct GallerySeeder {
    client: Client,
    base_url: String,
}

impl GallerySeeder {
    fn new(base_url: String) -> Self {
        GallerySeeder {
            client: Client::new(),
            base_url,
        }
    }

    /// The seed gallery document installed on a fresh deployment
    fn seed_document() -> Value {
        json!({
            "heroImage": "/images/hero/hero-default.jpg",
            "photoStories": [
                {
                    "id": 1,
                    "title": "First steps in Italy",
                    "description": "The cobbled streets of Rome tell stories that span millennia. Every corner reveals a new chapter where ancient architecture and modern life intertwine.",
                    "imageUrl": "/images/stories/rome-default.jpg",
                    "location": "Rome, Italy",
                    "displayType": "single"
                },
                {
                    "id": 2,
                    "title": "Sunset over Santorini",
                    "description": "Whitewashed houses against the deep blue of the Aegean. The setting sun paints the sky in orange and pink, a natural canvas that takes your breath away.",
                    "imageUrl": [
                        "/images/stories/santorini-1-default.jpg",
                        "/images/stories/santorini-2-default.jpg",
                        "/images/stories/santorini-3-default.jpg"
                    ],
                    "location": "Santorini, Greece",
                    "displayType": "carousel"
                },
                {
                    "id": 3,
                    "title": "Forests of Japan",
                    "description": "Lost in the bamboo groves of Arashiyama we found a rare stillness. Rustling leaves and filtered light create an almost mystical atmosphere.",
                    "imageUrl": "/images/stories/japan-default.jpg",
                    "location": "Arashiyama, Japan",
                    "displayType": "single"
                },
                {
                    "id": 4,
                    "title": "Colors of Marrakech",
                    "description": "An explosion of colors, scents and sounds. The souks of Marrakech are a complete sensory experience, every alley revealing new handcrafted treasures.",
                    "imageUrl": [
                        "/images/stories/marrakech-1-default.jpg",
                        "/images/stories/marrakech-2-default.jpg",
                        "/images/stories/marrakech-3-default.jpg",
                        "/images/stories/marrakech-4-default.jpg"
                    ],
                    "location": "Marrakech, Morocco",
                    "displayType": "carousel"
                }
            ]
        })
    }

    async fn check_health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("service unreachable at {}", self.base_url))?;

        if !response.status().is_success() {
            bail!("health check returned {}", response.status());
        }
        Ok(())
    }

    async fn install_seed(&self) -> Result<()> {
        let url = format!("{}/gallery-config", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&Self::seed_document())
            .send()
            .await
            .context("save request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("save returned {}", status);
        }

        let body: SaveResponse = response
            .json()
            .await
            .context("unexpected save response")?;
        if !body.success {
            bail!("save rejected: {}", body.message);
        }
        Ok(())
    }

    /// Read the document back and make sure the seed landed
    async fn verify(&self) -> Result<usize> {
        let url = format!("{}/gallery-config", self.base_url);
        let document: Value = self
            .client
            .get(&url)
            .send()
            .await
            .context("load request failed")?
            .json()
            .await
            .context("unexpected load response")?;

        let stories = document["photoStories"]
            .as_array()
            .context("document has no photoStories array")?;
        if document["lastUpdated"].as_str().is_none() {
            bail!("document is missing lastUpdated");
        }
        Ok(stories.len())
    }

    async fn run(&self) {
        println!(
            "{}{}📸 voyage-gallery seeder{} -> {}",
            BOLD, CYAN, RESET, self.base_url
        );

        if let Err(e) = self.check_health().await {
            println!("{}❌ {:#}{}", RED, e, RESET);
            process::exit(1);
        }
        println!("{}✓ Service is up{}", GREEN, RESET);

        if let Err(e) = self.install_seed().await {
            println!("{}❌ Seeding failed: {:#}{}", RED, e, RESET);
            process::exit(1);
        }
        println!("{}✓ Seed document saved{}", GREEN, RESET);

        match self.verify().await {
            Ok(count) => println!(
                "{}✨ Done:{} gallery now holds {}{}{} stories",
                GREEN, RESET, BOLD, count, RESET
            ),
            Err(e) => {
                println!("{}⚠️  Saved but verification failed: {:#}{}", YELLOW, e, RESET);
                process::exit(1);
            }
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let base_url =
        env::var("GALLERY_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());

    GallerySeeder::new(base_url).run().await;
}
