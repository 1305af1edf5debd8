//! Request orchestration
//!
//! One request runs start-to-finish through sequential stages:
//! classify, normalize, pre-fetch markup where naming needs it, derive
//! the output name, then try the external tool and fall back to the
//! platform locator when it fails.

use crate::downloader::{DownloadProgress, FileFetcher};
use crate::naming;
use crate::platform::{normalize_url, Platform};
use crate::quality::Quality;
use crate::scraper::{self, fetch_markup, MediaKind};
use crate::tool::{ExternalDownloader, YtDlpTool};
use crate::utils::config::AppSettings;
use crate::utils::error::MediagrabError;
use anyhow::Result;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

/// One download request. Quality travels with the request rather than
/// living on the downloader, so a shared instance is safe to reuse.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub quality: Quality,
    /// Explicit output base name; derived from metadata when absent
    pub output_name: Option<String>,
}

/// What a request produced. "No media found" is a normal negative
/// outcome, distinct from errors.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    Saved { path: PathBuf, kind: MediaKind },
    NoMedia { platform: Platform },
}

/// Multi-platform media downloader for social media content
pub struct MediaDownloader {
    settings: AppSettings,
    client: Client,
    fetcher: FileFetcher,
    tool: Arc<dyn ExternalDownloader>,
}

impl MediaDownloader {
    pub fn new(settings: AppSettings) -> Result<Self> {
        let tool = Arc::new(YtDlpTool::new());
        Self::with_tool(settings, tool)
    }

    /// Construct with a specific external tool. This is the seam the
    /// tests use to exercise the fallback chain.
    pub fn with_tool(settings: AppSettings, tool: Arc<dyn ExternalDownloader>) -> Result<Self> {
        // Page/API requests get a hard deadline; the media client only
        // bounds connect so long transfers are not killed mid-stream.
        let page_client = Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;
        let media_client = Client::builder()
            .user_agent(&settings.user_agent)
            .connect_timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            settings,
            client: page_client,
            fetcher: FileFetcher::new(media_client),
            tool,
        })
    }

    /// Run one request through the extraction chain.
    pub async fn download(&self, request: &DownloadRequest) -> Result<DownloadOutcome> {
        let url = Url::parse(&request.url)
            .map_err(|_| MediagrabError::InvalidUrl(request.url.clone()))?;
        let platform = Platform::detect(&url)?;
        info!("Detected platform: {}", platform);

        let url = normalize_url(&url, platform);
        if url.as_str() != request.url {
            info!("Rewrote URL to canonical form: {}", url);
        }

        // Markup is only needed when we have to derive a name from it
        // (and it doubles as input for the scraping fallback). A fetch
        // failure degrades to URL-based naming.
        let markup = if request.output_name.is_none() && platform.needs_page_markup() {
            match fetch_markup(&self.client, url.as_str()).await {
                Ok(page) => Some(page),
                Err(e) => {
                    warn!("Could not fetch preliminary page data: {e:#}");
                    None
                }
            }
        } else {
            None
        };

        self.run(&url, platform, request, markup.as_deref()).await
    }

    async fn run(
        &self,
        url: &Url,
        platform: Platform,
        request: &DownloadRequest,
        markup: Option<&str>,
    ) -> Result<DownloadOutcome> {
        let base_name = match &request.output_name {
            Some(name) => naming::sanitize(name),
            None => {
                let tool_title = if platform == Platform::YouTube {
                    match self.tool.probe_title(url.as_str()).await {
                        Ok(title) => {
                            debug!("Extracted title: {}", title);
                            Some(title)
                        }
                        Err(e) => {
                            warn!("Title probe failed: {e:#}");
                            None
                        }
                    }
                } else {
                    None
                };
                naming::derive_output_name(url, platform, markup, tool_title.as_deref())
            }
        };

        let platform_dir = self.settings.output_dir.join(platform.tag());
        tokio::fs::create_dir_all(&platform_dir).await?;
        let stem = platform_dir.join(&base_name);

        match self
            .tool
            .download(url.as_str(), &stem, platform, request.quality)
            .await
        {
            Ok(()) => {
                let path = resolve_output(&platform_dir, &base_name)?;
                let kind = kind_from_path(&path);
                info!("Downloaded {} {} to {}", platform, kind, path.display());
                Ok(DownloadOutcome::Saved { path, kind })
            }
            Err(e) => {
                warn!(
                    "{} failed ({e:#}); falling back to platform-specific extraction",
                    self.tool.id()
                );
                self.fallback(url, platform, &stem, markup).await
            }
        }
    }

    async fn fallback(
        &self,
        url: &Url,
        platform: Platform,
        stem: &Path,
        markup: Option<&str>,
    ) -> Result<DownloadOutcome> {
        let locator = scraper::locator_for(platform);
        let candidates = locator.locate(&self.client, url.as_str(), markup).await?;

        let Some(candidate) = candidates.first() else {
            info!("No media found in {} post", platform);
            return Ok(DownloadOutcome::NoMedia { platform });
        };

        let dest = PathBuf::from(format!("{}.{}", stem.display(), candidate.kind.ext()));

        let (progress_tx, mut progress_rx) = mpsc::channel::<DownloadProgress>(100);
        let reporter = tokio::spawn(async move {
            while let Some(progress) = progress_rx.recv().await {
                debug!(
                    "Transfer {:.1}% at {:.2} MB/s",
                    progress.percentage() * 100.0,
                    progress.speed / 1024.0 / 1024.0
                );
            }
        });

        let bytes = self
            .fetcher
            .fetch(&candidate.url, &dest, Some(progress_tx))
            .await?;
        let _ = reporter.await;

        info!(
            "Downloaded {} {} to {} ({} bytes)",
            platform,
            candidate.kind,
            dest.display(),
            bytes
        );
        Ok(DownloadOutcome::Saved {
            path: dest,
            kind: candidate.kind,
        })
    }
}

/// The tool picks the extension, so find the file it actually wrote
/// by its stem prefix.
fn resolve_output(dir: &Path, stem: &str) -> Result<PathBuf> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with(stem) && entry.path().is_file() {
            return Ok(entry.path());
        }
    }
    Err(MediagrabError::MissingFile(stem.to_string()).into())
}

fn kind_from_path(path: &Path) -> MediaKind {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") | Some("png") | Some("webp") | Some("gif") => MediaKind::Image,
        _ => MediaKind::Video,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::TempDir;

    /// Tool stub that always exits non-zero, as if both the formatted
    /// and the unconstrained invocation failed.
    struct FailingTool;

    #[async_trait]
    impl ExternalDownloader for FailingTool {
        fn id(&self) -> &'static str {
            "failing-tool"
        }

        async fn probe_title(&self, _url: &str) -> Result<String> {
            Err(MediagrabError::ToolFailed { code: 1 }.into())
        }

        async fn download(
            &self,
            _url: &str,
            _output_stem: &Path,
            _platform: Platform,
            _quality: Quality,
        ) -> Result<()> {
            Err(MediagrabError::ToolFailed { code: 1 }.into())
        }
    }

    /// Tool stub that "downloads" by writing a small mp4 next to the
    /// requested stem.
    struct SavingTool;

    #[async_trait]
    impl ExternalDownloader for SavingTool {
        fn id(&self) -> &'static str {
            "saving-tool"
        }

        async fn probe_title(&self, _url: &str) -> Result<String> {
            Ok("A Probed Title".to_string())
        }

        async fn download(
            &self,
            _url: &str,
            output_stem: &Path,
            _platform: Platform,
            _quality: Quality,
        ) -> Result<()> {
            let path = PathBuf::from(format!("{}.mp4", output_stem.display()));
            tokio::fs::write(&path, b"media").await?;
            Ok(())
        }
    }

    fn downloader_with(temp: &TempDir, tool: Arc<dyn ExternalDownloader>) -> MediaDownloader {
        let settings = AppSettings {
            output_dir: temp.path().to_path_buf(),
            ..AppSettings::default()
        };
        MediaDownloader::with_tool(settings, tool).expect("downloader")
    }

    #[tokio::test]
    async fn test_unsupported_platform_is_rejected_before_any_work() {
        let temp = TempDir::new().unwrap();
        let downloader = downloader_with(&temp, Arc::new(FailingTool));

        let request = DownloadRequest {
            url: "https://example.com/video".to_string(),
            quality: Quality::Best,
            output_name: None,
        };
        let err = downloader.download(&request).await.unwrap_err();
        let err = err.downcast::<MediagrabError>().expect("typed error");
        assert!(matches!(err, MediagrabError::UnsupportedPlatform(_)));
    }

    #[tokio::test]
    async fn test_tool_failure_falls_back_to_no_media() {
        let temp = TempDir::new().unwrap();
        let downloader = downloader_with(&temp, Arc::new(FailingTool));

        let url = Url::parse("https://www.instagram.com/p/Cabc/").unwrap();
        let request = DownloadRequest {
            url: url.to_string(),
            quality: Quality::Best,
            output_name: Some("post".to_string()),
        };
        // Markup with no og markers: the fallback locator finds
        // nothing and that is an outcome, not an error.
        let outcome = downloader
            .run(&url, Platform::Instagram, &request, Some("<html></html>"))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DownloadOutcome::NoMedia {
                platform: Platform::Instagram
            }
        );
    }

    #[tokio::test]
    async fn test_filtered_image_is_no_media_not_error() {
        let temp = TempDir::new().unwrap();
        let downloader = downloader_with(&temp, Arc::new(FailingTool));

        let url = Url::parse("https://x.com/u/status/1").unwrap();
        let request = DownloadRequest {
            url: url.to_string(),
            quality: Quality::Best,
            output_name: Some("tweet".to_string()),
        };
        let markup =
            r#"<meta property="og:image" content="https://pbs.twimg.com/profile_images/1/a.jpg">"#;
        let outcome = downloader
            .run(&url, Platform::Twitter, &request, Some(markup))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DownloadOutcome::NoMedia {
                platform: Platform::Twitter
            }
        );
    }

    #[tokio::test]
    async fn test_tool_success_resolves_written_file() {
        let temp = TempDir::new().unwrap();
        let downloader = downloader_with(&temp, Arc::new(SavingTool));

        let request = DownloadRequest {
            url: "https://www.pinterest.com/pin/1234/".to_string(),
            quality: Quality::Best,
            output_name: Some("board pin".to_string()),
        };
        let outcome = downloader.download(&request).await.unwrap();
        match outcome {
            DownloadOutcome::Saved { path, kind } => {
                assert!(path.ends_with("pinterest/board pin.mp4"));
                assert_eq!(kind, MediaKind::Video);
                assert!(path.exists());
            }
            other => panic!("expected Saved, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_explicit_output_name_is_sanitized() {
        let temp = TempDir::new().unwrap();
        let downloader = downloader_with(&temp, Arc::new(SavingTool));

        let request = DownloadRequest {
            url: "https://www.pinterest.com/pin/1234/".to_string(),
            quality: Quality::Best,
            output_name: Some(r#"bad:name?"#.to_string()),
        };
        let outcome = downloader.download(&request).await.unwrap();
        match outcome {
            DownloadOutcome::Saved { path, .. } => {
                assert!(path.ends_with("pinterest/bad_name_.mp4"));
            }
            other => panic!("expected Saved, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_output_finds_stem_prefix() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("clip title.webm"), b"x").unwrap();
        std::fs::write(temp.path().join("other.mp4"), b"x").unwrap();

        let path = resolve_output(temp.path(), "clip title").unwrap();
        assert!(path.ends_with("clip title.webm"));
    }

    #[test]
    fn test_resolve_output_errors_when_nothing_matches() {
        let temp = TempDir::new().unwrap();
        let err = resolve_output(temp.path(), "missing").unwrap_err();
        let err = err.downcast::<MediagrabError>().expect("typed error");
        assert!(matches!(err, MediagrabError::MissingFile(_)));
    }

    #[test]
    fn test_kind_from_path() {
        assert_eq!(kind_from_path(Path::new("a/b.jpg")), MediaKind::Image);
        assert_eq!(kind_from_path(Path::new("a/b.mp4")), MediaKind::Video);
        assert_eq!(kind_from_path(Path::new("a/b")), MediaKind::Video);
    }
}
