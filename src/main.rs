//! mediagrab - Multi-Platform Media Downloader
//!
//! Fetches video/image media from social platform URLs, preferring
//! yt-dlp and falling back to per-platform page scraping when the
//! tool cannot handle a post.

use anyhow::Result;
use clap::Parser;
use mediagrab::tool;
use mediagrab::{AppSettings, DownloadOutcome, DownloadRequest, MediaDownloader, Quality};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediagrab", version, about = "Download media from social platform URLs")]
struct Args {
    /// Post or video URL
    url: String,

    /// Quality key: 1-6 map to 144p-1080p ceilings, 7 is best available
    #[arg(short, long, default_value = "7")]
    quality: String,

    /// Explicit output base name (derived from post metadata when omitted)
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Output root directory
    #[arg(short = 'd', long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    // Reject a bad quality key before any network or subprocess work
    let quality = Quality::from_key(&args.quality)?;

    if tool::find_ytdlp().is_none() {
        eprintln!("WARNING: yt-dlp not found in PATH or common locations");
        eprintln!("Platform scraping fallbacks will still be tried, but most");
        eprintln!("downloads need the tool. Install it with:");
        eprintln!("  pip install yt-dlp");
        eprintln!("  or: brew install yt-dlp");
    }

    let mut settings = AppSettings::default();
    if let Some(dir) = args.output_dir {
        settings.output_dir = dir;
    }

    let downloader = MediaDownloader::new(settings)?;
    let request = DownloadRequest {
        url: args.url,
        quality,
        output_name: args.name,
    };

    match downloader.download(&request).await? {
        DownloadOutcome::Saved { path, kind } => {
            println!("Downloaded {} to {}", kind, path.display());
        }
        DownloadOutcome::NoMedia { platform } => {
            println!("No media found in {} post", platform);
        }
    }

    Ok(())
}
