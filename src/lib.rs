//! mediagrab library

pub mod app;
pub mod downloader;
pub mod naming;
pub mod platform;
pub mod quality;
pub mod scraper;
pub mod tool;
pub mod utils;

// Re-export main types for easier use
pub use app::{DownloadOutcome, DownloadRequest, MediaDownloader};
pub use downloader::{DownloadProgress, DownloadStatus, FileFetcher};
pub use platform::Platform;
pub use quality::Quality;
pub use scraper::{MediaCandidate, MediaKind, MediaLocator};
pub use tool::{ExternalDownloader, YtDlpTool};
pub use utils::{AppSettings, MediagrabError};
