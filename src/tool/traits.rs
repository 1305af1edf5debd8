use crate::platform::Platform;
use crate::quality::Quality;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// External command-line downloader, the primary extraction strategy.
///
/// Isolates the orchestrator from the concrete tool invocation so the
/// tool can be swapped (or stubbed in tests) without touching the
/// request flow.
#[async_trait]
pub trait ExternalDownloader: Send + Sync {
    /// Unique identifier for log lines (e.g. "yt-dlp")
    fn id(&self) -> &'static str;

    /// Ask the tool for the media title without downloading
    async fn probe_title(&self, url: &str) -> Result<String>;

    /// Download `url` to a file starting with `output_stem`; the tool
    /// chooses the final extension. `quality` bounds the resolution
    /// on platforms where the tool honors a format expression.
    async fn download(
        &self,
        url: &str,
        output_stem: &Path,
        platform: Platform,
        quality: Quality,
    ) -> Result<()>;
}
