//! Output base-name derivation
//!
//! Every branch tolerates missing or malformed input and degrades to
//! the next rule; derivation never fails, it only gets less specific.

use crate::platform::Platform;
use crate::scraper::meta;
use url::Url;

const MAX_NAME_LEN: usize = 100;
const ILLEGAL_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Replace filesystem-hostile characters and cap the length.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if ILLEGAL_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_NAME_LEN)
        .collect()
}

/// Derive a base name for the output file, in priority order:
/// platform metadata, then the URL's last path segment prefixed with
/// the platform tag, then a generic id-based fallback.
///
/// `tool_title` is the external tool's title probe result, only
/// meaningful for YouTube. `markup` is the pre-fetched page when the
/// orchestrator has one.
pub fn derive_output_name(
    url: &Url,
    platform: Platform,
    markup: Option<&str>,
    tool_title: Option<&str>,
) -> String {
    let name = metadata_name(url, platform, markup, tool_title)
        .or_else(|| last_path_segment(url).map(|seg| format!("{}_{}", platform.tag(), seg)))
        .unwrap_or_else(|| fallback_name(url, platform));
    sanitize(&name)
}

fn metadata_name(
    url: &Url,
    platform: Platform,
    markup: Option<&str>,
    tool_title: Option<&str>,
) -> Option<String> {
    match platform {
        Platform::YouTube => tool_title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
        Platform::Instagram => markup.and_then(meta::og_title).map(|title| {
            // "Caption on Instagram: ..." — keep the caption part
            let caption = title.split(" on Instagram").next().unwrap_or(&title).trim();
            format!("instagram_{caption}")
        }),
        Platform::Twitter => markup.and_then(meta::og_description).map(|description| {
            let words: Vec<&str> = description.split_whitespace().take(5).collect();
            format!("twitter_{}", words.join("_"))
        }),
        Platform::Reddit => markup
            .and_then(meta::og_title)
            .map(|title| {
                let words: Vec<&str> = title.split_whitespace().take(5).collect();
                format!("reddit_{}", words.join("_"))
            })
            .or_else(|| reddit_path_name(url)),
        _ => None,
    }
}

/// `/r/<subreddit>/comments/<id>/...` carries enough to name the post
fn reddit_path_name(url: &Url) -> Option<String> {
    let parts: Vec<&str> = url.path().split('/').filter(|s| !s.is_empty()).collect();
    if parts.len() >= 3 && parts[0] == "r" {
        let subreddit = parts[1];
        let post_id = parts.get(3).copied().unwrap_or("post");
        Some(format!("reddit_{subreddit}_{post_id}"))
    } else {
        None
    }
}

fn fallback_name(url: &Url, platform: Platform) -> String {
    if platform == Platform::YouTube {
        let video_id = url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.to_string())
            .filter(|v| !v.is_empty())
            .or_else(|| {
                url.host_str()
                    .filter(|h| h.contains("youtu.be"))
                    .map(|_| url.path().trim_matches('/').to_string())
                    .filter(|p| !p.is_empty())
            })
            .or_else(|| last_path_segment(url))
            .unwrap_or_else(|| "media".to_string());
        format!("youtube_{video_id}")
    } else {
        let segment = last_path_segment(url).unwrap_or_else(|| "media".to_string());
        format!("{}_{}", platform.tag(), segment)
    }
}

fn last_path_segment(url: &Url) -> Option<String> {
    url.path()
        .split('/')
        .filter(|s| !s.is_empty())
        .next_back()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("test url")
    }

    // ============================================================
    // SANITIZATION
    // ============================================================

    #[test]
    fn test_sanitize_replaces_illegal_chars() {
        let cleaned = sanitize(r#"a\b/c*d?e:f"g<h>i|j"#);
        assert_eq!(cleaned, "a_b_c_d_e_f_g_h_i_j");
        for c in ILLEGAL_CHARS {
            assert!(!cleaned.contains(*c));
        }
    }

    #[test]
    fn test_sanitize_caps_length() {
        let long = "x".repeat(500);
        assert_eq!(sanitize(&long).chars().count(), 100);
    }

    #[test]
    fn test_sanitize_length_is_char_boundary_safe() {
        let long = "é".repeat(150);
        assert_eq!(sanitize(&long).chars().count(), 100);
    }

    // ============================================================
    // METADATA-DRIVEN NAMES
    // ============================================================

    #[test]
    fn test_youtube_uses_tool_title() {
        let name = derive_output_name(
            &url("https://www.youtube.com/watch?v=abc"),
            Platform::YouTube,
            None,
            Some("My Video: The Sequel"),
        );
        assert_eq!(name, "My Video_ The Sequel");
    }

    #[test]
    fn test_instagram_title_strips_suffix() {
        let markup = r#"<meta property="og:title" content="Sunset reel on Instagram: photos">"#;
        let name = derive_output_name(
            &url("https://www.instagram.com/p/Cabc/"),
            Platform::Instagram,
            Some(markup),
            None,
        );
        assert_eq!(name, "instagram_Sunset reel");
    }

    #[test]
    fn test_twitter_takes_five_description_words() {
        let markup =
            r#"<meta property="og:description" content="one two three four five six seven">"#;
        let name = derive_output_name(
            &url("https://x.com/u/status/1"),
            Platform::Twitter,
            Some(markup),
            None,
        );
        assert_eq!(name, "twitter_one_two_three_four_five");
    }

    #[test]
    fn test_reddit_path_name_without_markup() {
        let name = derive_output_name(
            &url("https://www.reddit.com/r/rust/comments/1abcd/cool_post/"),
            Platform::Reddit,
            None,
            None,
        );
        assert_eq!(name, "reddit_rust_1abcd");
    }

    // ============================================================
    // FALLBACK NAMES
    // ============================================================

    #[test]
    fn test_path_segment_fallback() {
        let name = derive_output_name(
            &url("https://www.tiktok.com/@user/video/7345"),
            Platform::TikTok,
            None,
            None,
        );
        assert_eq!(name, "tiktok_7345");
    }

    #[test]
    fn test_youtube_video_id_from_query() {
        let name = fallback_name(&url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), Platform::YouTube);
        assert_eq!(name, "youtube_dQw4w9WgXcQ");
    }

    #[test]
    fn test_youtube_short_host_id_from_path() {
        let name = fallback_name(&url("https://youtu.be/dQw4w9WgXcQ"), Platform::YouTube);
        assert_eq!(name, "youtube_dQw4w9WgXcQ");
    }

    #[test]
    fn test_bare_host_degrades_to_media() {
        let name = fallback_name(&url("https://www.pinterest.com/"), Platform::Pinterest);
        assert_eq!(name, "pinterest_media");
    }

    #[test]
    fn test_derived_names_are_bounded_and_clean() {
        let markup = format!(
            r#"<meta property="og:title" content="{}">"#,
            r#"a/very\bad:title "#.repeat(20)
        );
        let name = derive_output_name(
            &url("https://www.reddit.com/r/rust/comments/1abcd/post/"),
            Platform::Reddit,
            Some(&markup),
            None,
        );
        assert!(name.chars().count() <= 100);
        for c in ILLEGAL_CHARS {
            assert!(!name.contains(*c), "illegal char {c} in {name}");
        }
    }
}
