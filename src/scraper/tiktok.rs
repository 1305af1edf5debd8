use crate::platform::Platform;
use crate::scraper::models::MediaCandidate;
use crate::scraper::traits::MediaLocator;
use crate::utils::error::MediagrabError;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Public resolver that returns a watermark-free play URL for a
/// TikTok video. TikTok pages themselves render media through
/// scripts, so og scanning is useless here.
const RESOLVER_ENDPOINT: &str = "https://www.tikwm.com/api/";

#[derive(Debug, Deserialize)]
struct ResolverResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<ResolverData>,
}

#[derive(Debug, Deserialize)]
struct ResolverData {
    #[serde(default)]
    play: Option<String>,
}

pub struct TikTokLocator;

#[async_trait]
impl MediaLocator for TikTokLocator {
    fn platform(&self) -> Platform {
        Platform::TikTok
    }

    async fn locate(
        &self,
        client: &Client,
        url: &str,
        _markup: Option<&str>,
    ) -> Result<Vec<MediaCandidate>> {
        debug!("Resolving TikTok video via {}", RESOLVER_ENDPOINT);

        let response = client
            .get(RESOLVER_ENDPOINT)
            .query(&[("url", url)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(MediagrabError::HttpStatus(response.status().as_u16()).into());
        }

        let body: ResolverResponse = serde_json::from_str(&response.text().await?)?;
        if body.success {
            if let Some(play) = body.data.and_then(|d| d.play) {
                if !play.is_empty() {
                    return Ok(vec![MediaCandidate::video(play)]);
                }
            }
        }

        debug!("TikTok resolver returned no playable URL");
        Ok(Vec::new())
    }
}
