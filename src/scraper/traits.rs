use crate::platform::Platform;
use crate::scraper::models::MediaCandidate;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Fallback extraction strategy for one platform.
///
/// This trait isolates the orchestrator from the scraping details,
/// which are tied to markup conventions the platforms control and can
/// change at any time. Swapping or disabling a locator must never
/// touch orchestration logic.
#[async_trait]
pub trait MediaLocator: Send + Sync {
    /// The platform this locator handles
    fn platform(&self) -> Platform;

    /// Produce candidate media URLs for a post, videos ordered before
    /// images. `markup` is the already-fetched page when the caller
    /// has one; locators that need the page fetch it themselves
    /// otherwise. An empty result means "no media found" and is a
    /// normal negative outcome, not an error.
    async fn locate(
        &self,
        client: &Client,
        url: &str,
        markup: Option<&str>,
    ) -> Result<Vec<MediaCandidate>>;
}
