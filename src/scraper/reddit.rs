use crate::platform::Platform;
use crate::scraper::models::MediaCandidate;
use crate::scraper::traits::MediaLocator;
use crate::scraper::{fetch_markup, meta};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Reddit posts expose `og:video` / `og:video:secure_url` for hosted
/// video. `og:image` is only trusted when it points at actual post
/// content; everything else is a subreddit icon or similar.
pub struct RedditLocator;

fn is_post_content(url: &str) -> bool {
    url.contains("i.redd.it") || url.contains("external-preview")
}

#[async_trait]
impl MediaLocator for RedditLocator {
    fn platform(&self) -> Platform {
        Platform::Reddit
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
        Ok(meta::og_candidates(&page, true, &is_post_content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::models::MediaKind;

    #[tokio::test]
    async fn test_secure_video_url_found() {
        let page = r#"<meta property="og:video:secure_url" content="https://v.redd.it/x/DASH_720.mp4">"#;
        let found = RedditLocator
            .locate(&Client::new(), "https://www.reddit.com/r/a/comments/b/", Some(page))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, MediaKind::Video);
    }

    #[test]
    fn test_icon_images_rejected() {
        assert!(!is_post_content("https://styles.redditmedia.com/icon.png"));
        assert!(is_post_content("https://i.redd.it/abcd.jpg"));
        assert!(is_post_content("https://external-preview.redd.it/abcd.jpg"));
    }

    #[tokio::test]
    async fn test_image_without_content_marker_is_no_media() {
        let page = r#"<meta property="og:image" content="https://styles.redditmedia.com/icon.png">"#;
        let found = RedditLocator
            .locate(&Client::new(), "https://www.reddit.com/r/a/comments/b/", Some(page))
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
