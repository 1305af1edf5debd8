//! Error handling for mediagrab

use thiserror::Error;

/// Main error type for mediagrab
#[derive(Debug, Error)]
pub enum MediagrabError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    ToolNotFound,

    #[error("yt-dlp exited with code {code}")]
    ToolFailed { code: i32 },

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown quality selection: {0}")]
    InvalidQuality(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned HTTP {0}")]
    HttpStatus(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Downloaded file not found for: {0}")]
    MissingFile(String),
}
