//! Streaming file fetcher for direct media URLs

use crate::downloader::progress::DownloadProgress;
use crate::utils::error::MediagrabError;
use anyhow::Result;
use futures::StreamExt;
use reqwest::Client;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Streams a URL's bytes to local storage, publishing progress as a
/// side effect.
pub struct FileFetcher {
    client: Client,
}

impl FileFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Download `url` into `dest`, returning the byte count. The
    /// partial file is removed before the error is returned when the
    /// transfer fails.
    pub async fn fetch(
        &self,
        url: &str,
        dest: &Path,
        progress_tx: Option<mpsc::Sender<DownloadProgress>>,
    ) -> Result<u64> {
        match self.stream_to_file(url, dest, progress_tx).await {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(dest).await {
                    if cleanup.kind() != std::io::ErrorKind::NotFound {
                        warn!("Failed to remove partial file {}: {}", dest.display(), cleanup);
                    }
                }
                Err(e)
            }
        }
    }

    async fn stream_to_file(
        &self,
        url: &str,
        dest: &Path,
        progress_tx: Option<mpsc::Sender<DownloadProgress>>,
    ) -> Result<u64> {
        debug!("Fetching {} -> {}", url, dest.display());

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(MediagrabError::HttpStatus(response.status().as_u16()).into());
        }

        let total_size = response.content_length().unwrap_or(0);
        let mut progress = DownloadProgress::new(total_size);

        if let Some(tx) = &progress_tx {
            if let Err(e) = tx.send(progress.clone()).await {
                warn!("Failed to send initial progress: {}", e);
            }
        }

        let mut file = File::create(dest).await?;
        let mut downloaded = 0u64;

        let start_time = Instant::now();
        let mut last_update_time = start_time;

        let mut stream = response.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            // Publish roughly once per second
            let now = Instant::now();
            if now.duration_since(last_update_time) >= Duration::from_secs(1) {
                let elapsed = now.duration_since(start_time).as_secs_f64();
                let speed = if elapsed > 0.0 {
                    downloaded as f64 / elapsed
                } else {
                    0.0
                };
                progress.update(downloaded, speed);

                if let Some(tx) = &progress_tx {
                    if tx.send(progress.clone()).await.is_err() {
                        // Receiver gone; keep downloading without progress
                        break;
                    }
                }
                last_update_time = now;
            }
        }

        file.flush().await?;

        let elapsed = start_time.elapsed().as_secs_f64();
        let speed = if elapsed > 0.0 {
            downloaded as f64 / elapsed
        } else {
            0.0
        };
        progress.update(downloaded, speed);
        progress.complete();
        if let Some(tx) = &progress_tx {
            if let Err(e) = tx.send(progress).await {
                warn!("Failed to send final progress: {}", e);
            }
        }

        Ok(downloaded)
    }
}
