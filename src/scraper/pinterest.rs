use crate::platform::Platform;
use crate::scraper::models::MediaCandidate;
use crate::scraper::traits::MediaLocator;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Pinterest has no scraping strategy; only the external tool path
/// can satisfy a Pinterest request.
pub struct PinterestLocator;

#[async_trait]
impl MediaLocator for PinterestLocator {
    fn platform(&self) -> Platform {
        Platform::Pinterest
    }

    async fn locate(
        &self,
        _client: &Client,
        _url: &str,
        _markup: Option<&str>,
    ) -> Result<Vec<MediaCandidate>> {
        debug!("No fallback locator for pinterest");
        Ok(Vec::new())
    }
}
