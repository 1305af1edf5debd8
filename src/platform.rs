//! Platform classification from URL content
//!
//! Detection is purely textual: the host (and for Reddit the path) is
//! tested against fixed keyword sets. The sets are disjoint; keep them
//! that way when adding platforms.

use crate::utils::error::MediagrabError;
use std::fmt;
use url::Url;

/// Supported source platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Reddit,
    Instagram,
    Facebook,
    Twitter,
    TikTok,
    YouTube,
    Pinterest,
}

impl Platform {
    /// Lowercase tag used for subdirectory names and filename prefixes
    pub fn tag(&self) -> &'static str {
        match self {
            Platform::Reddit => "reddit",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::TikTok => "tiktok",
            Platform::YouTube => "youtube",
            Platform::Pinterest => "pinterest",
        }
    }

    /// Classify a URL by its host and path. No network access.
    pub fn detect(url: &Url) -> Result<Platform, MediagrabError> {
        let host = url.host_str().unwrap_or_default().to_lowercase();
        let path = url.path().to_lowercase();

        if host.contains("reddit.com") || path.contains("/r/") {
            Ok(Platform::Reddit)
        } else if host_matches(&host, &["instagram", "instagr.am"]) {
            Ok(Platform::Instagram)
        } else if host_matches(&host, &["facebook", "fb.com", "fb.watch"]) {
            Ok(Platform::Facebook)
        } else if host_matches(&host, &["twitter", "x.com", "t.co"]) {
            Ok(Platform::Twitter)
        } else if host_matches(&host, &["tiktok", "vm.tiktok"]) {
            Ok(Platform::TikTok)
        } else if host_matches(&host, &["youtube", "youtu.be"]) {
            Ok(Platform::YouTube)
        } else if host.contains("pinterest") {
            Ok(Platform::Pinterest)
        } else {
            Err(MediagrabError::UnsupportedPlatform(host))
        }
    }

    /// Platforms whose naming and fallback extraction read page markup
    pub fn needs_page_markup(&self) -> bool {
        matches!(
            self,
            Platform::Instagram | Platform::Facebook | Platform::Twitter | Platform::Reddit
        )
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

fn host_matches(host: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| host.contains(k))
}

/// Rewrite short-form URLs to their canonical long form before any
/// extraction attempt. Currently only YouTube Shorts need this: the
/// external tool and the title probe behave better on /watch URLs.
pub fn normalize_url(url: &Url, platform: Platform) -> Url {
    if platform == Platform::YouTube {
        if let Some(rest) = url.path().strip_prefix("/shorts/") {
            let video_id = rest.split('/').next().unwrap_or(rest);
            if !video_id.is_empty() {
                if let Ok(canonical) =
                    Url::parse(&format!("https://www.youtube.com/watch?v={video_id}"))
                {
                    return canonical;
                }
            }
        }
    }
    url.clone()
}
