//! OpenGraph meta-tag scanning over fetched page markup
//!
//! All of the textual patterns the locators depend on live here.
//! They match the social-preview markup conventions as served today;
//! a platform markup change breaks extraction silently.

use crate::scraper::models::MediaCandidate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref OG_VIDEO: Regex =
        Regex::new(r#"<meta property="og:video" content="([^"]+)""#).unwrap();
    static ref OG_VIDEO_SECURE: Regex =
        Regex::new(r#"<meta property="og:video:secure_url" content="([^"]+)""#).unwrap();
    static ref OG_IMAGE: Regex =
        Regex::new(r#"<meta property="og:image" content="([^"]+)""#).unwrap();
    static ref OG_TITLE: Regex =
        Regex::new(r#"<meta property="og:title" content="([^"]+)""#).unwrap();
    static ref OG_DESCRIPTION: Regex =
        Regex::new(r#"<meta property="og:description" content="([^"]+)""#).unwrap();
}

pub fn video_urls(markup: &str) -> Vec<String> {
    scan_all(&OG_VIDEO, markup)
}

pub fn secure_video_urls(markup: &str) -> Vec<String> {
    scan_all(&OG_VIDEO_SECURE, markup)
}

pub fn image_urls(markup: &str) -> Vec<String> {
    scan_all(&OG_IMAGE, markup)
}

pub fn og_title(markup: &str) -> Option<String> {
    scan_first(&OG_TITLE, markup)
}

pub fn og_description(markup: &str) -> Option<String> {
    scan_first(&OG_DESCRIPTION, markup)
}

/// Assemble candidates from og markers: videos first, then images
/// that pass `image_ok`. Used by every og-scraping locator.
pub fn og_candidates(
    markup: &str,
    with_secure_video: bool,
    image_ok: &dyn Fn(&str) -> bool,
) -> Vec<MediaCandidate> {
    let mut candidates = Vec::new();

    let mut videos = video_urls(markup);
    if with_secure_video {
        videos.extend(secure_video_urls(markup));
    }
    candidates.extend(videos.into_iter().map(MediaCandidate::video));

    candidates.extend(
        image_urls(markup)
            .into_iter()
            .filter(|u| image_ok(u))
            .map(MediaCandidate::image),
    );

    candidates
}

fn scan_all(re: &Regex, markup: &str) -> Vec<String> {
    re.captures_iter(markup).map(|c| c[1].to_string()).collect()
}

fn scan_first(re: &Regex, markup: &str) -> Option<String> {
    re.captures(markup).map(|c| c[1].to_string())
}
