use crate::platform::Platform;
use crate::scraper::models::MediaCandidate;
use crate::scraper::traits::MediaLocator;
use crate::scraper::{fetch_markup, meta};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Facebook public posts and fb.watch pages expose the same og
/// markers as Instagram.
pub struct FacebookLocator;

#[async_trait]
impl MediaLocator for FacebookLocator {
    fn platform(&self) -> Platform {
        Platform::Facebook
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
