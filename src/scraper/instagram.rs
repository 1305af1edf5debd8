use crate::platform::Platform;
use crate::scraper::models::MediaCandidate;
use crate::scraper::traits::MediaLocator;
use crate::scraper::{fetch_markup, meta};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Instagram posts carry `og:video` for reels/videos and `og:image`
/// for photo posts. No authentication; private posts simply yield no
/// markers.
pub struct InstagramLocator;

#[async_trait]
impl MediaLocator for InstagramLocator {
    fn platform(&self) -> Platform {
        Platform::Instagram
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
        Ok(meta::og_candidates(&page, false, &|_| true))
    }
}
