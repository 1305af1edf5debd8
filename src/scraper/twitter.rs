use crate::platform::Platform;
use crate::scraper::models::MediaCandidate;
use crate::scraper::traits::MediaLocator;
use crate::scraper::{fetch_markup, meta};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Twitter/X status pages expose `og:video` for native video and
/// `og:image` for attached photos. Avatar URLs also surface as
/// `og:image` and must not be mistaken for post media.
pub struct TwitterLocator;

fn is_post_image(url: &str) -> bool {
    !url.contains("profile_images")
}

#[async_trait]
impl MediaLocator for TwitterLocator {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    async fn locate(
        &self,
        client: &Client,
        url: &str,
        markup: Option<&str>,
    ) -> Result<Vec<MediaCandidate>> {
        let page = match markup {
            Some(m) => m.to_string(),
            None => fetch_markup(client, url).await?,
        };
        Ok(meta::og_candidates(&page, false, &is_post_image))
    }
}
