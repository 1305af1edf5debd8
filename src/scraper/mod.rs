//! Per-platform media locators: the scraping fallback behind the
//! external downloader.

pub mod facebook;
pub mod instagram;
pub mod meta;
pub mod models;
pub mod pinterest;
pub mod reddit;
pub mod tiktok;
pub mod traits;
pub mod twitter;
pub mod youtube;

pub use models::{MediaCandidate, MediaKind};
pub use traits::MediaLocator;

use crate::platform::Platform;
use crate::utils::error::MediagrabError;
use anyhow::Result;
use reqwest::Client;
use tracing::debug;

/// Locator for a platform tag. Every platform has one; Pinterest's
/// intentionally never yields candidates and YouTube's always fails.
pub fn locator_for(platform: Platform) -> Box<dyn MediaLocator> {
    match platform {
        Platform::Reddit => Box::new(reddit::RedditLocator),
        Platform::Instagram => Box::new(instagram::InstagramLocator),
        Platform::Facebook => Box::new(facebook::FacebookLocator),
        Platform::Twitter => Box::new(twitter::TwitterLocator),
        Platform::TikTok => Box::new(tiktok::TikTokLocator),
        Platform::YouTube => Box::new(youtube::YouTubeLocator),
        Platform::Pinterest => Box::new(pinterest::PinterestLocator),
    }
}

/// Fetch a page body for scanning. A non-success status is an error
/// here; scanning a page with no markers is not.
pub(crate) async fn fetch_markup(client: &Client, url: &str) -> Result<String> {
    debug!("Fetching page markup from {}", url);
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(MediagrabError::HttpStatus(response.status().as_u16()).into());
    }
    Ok(response.text().await?)
}
