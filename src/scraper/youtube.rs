use crate::platform::Platform;
use crate::scraper::models::MediaCandidate;
use crate::scraper::traits::MediaLocator;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

/// YouTube streams are not reachable through og markers, and there is
/// no native extraction here. When the external tool has already
/// failed this locator fails too, so the caller reports the aggregate
/// failure instead of a misleading "no media found".
pub struct YouTubeLocator;

#[async_trait]
impl MediaLocator for YouTubeLocator {
    fn platform(&self) -> Platform {
        Platform::YouTube
    }

    async fn locate(
        &self,
        _client: &Client,
        url: &str,
        _markup: Option<&str>,
    ) -> Result<Vec<MediaCandidate>> {
        warn!("No native YouTube extraction available for {}", url);
        Err(anyhow!("youtube extraction requires the external tool"))
    }
}
