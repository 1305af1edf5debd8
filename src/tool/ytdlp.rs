//! yt-dlp adapter
//!
//! Builds the platform-sensitive argument set, runs the tool, and
//! retries once without the format expression when the first attempt
//! fails. Tool output is captured for diagnostics only; the exit code
//! is the only thing parsed.

use crate::platform::Platform;
use crate::quality::Quality;
use crate::tool::traits::ExternalDownloader;
use crate::utils::error::MediagrabError;
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command as AsyncCommand;
use tracing::{debug, info, warn};

pub struct YtDlpTool {
    bin: Option<PathBuf>,
}

impl YtDlpTool {
    /// Locate the binary up front. A missing binary is not fatal
    /// here: each invocation reports `ToolNotFound`, which routes the
    /// request into the scraping fallback.
    pub fn new() -> Self {
        let bin = find_ytdlp();
        match &bin {
            Some(path) => info!("Found yt-dlp at: {}", path.display()),
            None => warn!("yt-dlp not found; only the scraping fallback will be available"),
        }
        Self { bin }
    }

    pub fn is_available(&self) -> bool {
        self.bin.is_some()
    }

    fn bin(&self) -> Result<&Path> {
        self.bin
            .as_deref()
            .ok_or_else(|| MediagrabError::ToolNotFound.into())
    }

    async fn run(&self, args: &[String]) -> Result<Output> {
        let output = AsyncCommand::new(self.bin()?).args(args).output().await?;
        log_tool_output(&output);
        Ok(output)
    }
}

impl Default for YtDlpTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExternalDownloader for YtDlpTool {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    /// Uses: yt-dlp --get-title --no-playlist
    async fn probe_title(&self, url: &str) -> Result<String> {
        debug!("Probing title for {}", url);

        let output = AsyncCommand::new(self.bin()?)
            .arg("--get-title")
            .arg("--no-playlist")
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("Title probe failed: {}", stderr.trim());
            return Err(MediagrabError::ToolFailed {
                code: output.status.code().unwrap_or(-1),
            }
            .into());
        }

        let title = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if title.is_empty() {
            return Err(MediagrabError::ToolFailed { code: 0 }.into());
        }
        Ok(title)
    }

    async fn download(
        &self,
        url: &str,
        output_stem: &Path,
        platform: Platform,
        quality: Quality,
    ) -> Result<()> {
        let template = format!("{}.%(ext)s", output_stem.display());
        let args = build_args(url, &template, platform, Some(quality));

        debug!("Running yt-dlp {}", args.join(" "));
        let output = self.run(&args).await?;
        if output.status.success() {
            return Ok(());
        }

        let retry_args = strip_format_args(&args);
        if retry_args.len() == args.len() {
            // Nothing to strip (Reddit's argument set carries no
            // format expression), so an identical retry is pointless.
            return Err(MediagrabError::ToolFailed {
                code: output.status.code().unwrap_or(-1),
            }
            .into());
        }

        warn!(
            "Selected format not available; retrying without format selection \
             ({} preference is dropped for this request)",
            quality.resolution()
        );
        debug!("Running fallback yt-dlp {}", retry_args.join(" "));
        let retry = self.run(&retry_args).await?;
        if retry.status.success() {
            Ok(())
        } else {
            Err(MediagrabError::ToolFailed {
                code: retry.status.code().unwrap_or(-1),
            }
            .into())
        }
    }
}

/// Argument set for one invocation. Reddit gets metadata-embedding
/// flags instead of a format expression; passing `None` for quality
/// yields the retry form with no format constraint.
pub fn build_args(
    url: &str,
    output_template: &str,
    platform: Platform,
    quality: Option<Quality>,
) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();

    if platform == Platform::Reddit {
        args.extend(
            [
                "--verbose",
                "--merge-output-format",
                "mp4",
                "--embed-metadata",
                "--add-metadata",
            ]
            .map(String::from),
        );
    } else {
        if let Some(q) = quality {
            args.push("--format".to_string());
            args.push(q.format_expr().to_string());
        }
        args.push("--merge-output-format".to_string());
        args.push("mp4".to_string());
    }

    args.push("-o".to_string());
    args.push(output_template.to_string());
    args.push(url.to_string());
    args
}

/// Remove the `--format <expr>` pair, leaving everything else intact.
pub fn strip_format_args(args: &[String]) -> Vec<String> {
    let mut stripped = Vec::with_capacity(args.len());
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--format" {
            skip_next = true;
            continue;
        }
        stripped.push(arg.clone());
    }
    stripped
}

fn log_tool_output(output: &Output) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        debug!("yt-dlp stdout:\n{}", stdout.trim_end());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        debug!("yt-dlp stderr:\n{}", stderr.trim_end());
    }
}

// ============================================================
// yt-dlp Detection
// ============================================================

/// Find the yt-dlp binary: PATH first, then common install locations
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Ok(path) = which::which("yt-dlp") {
        if path.exists() {
            return Some(path);
        }
    }

    let common_paths = [
        "/opt/homebrew/bin/yt-dlp",
        "/usr/local/bin/yt-dlp",
        "/usr/bin/yt-dlp",
        "~/.local/bin/yt-dlp",
    ];

    for path_str in common_paths {
        let expanded = if let Some(rest) = path_str.strip_prefix("~/") {
            match dirs::home_dir() {
                Some(home) => home.join(rest),
                None => continue,
            }
        } else {
            PathBuf::from(path_str)
        };

        if expanded.is_file() {
            return Some(expanded);
        }
    }

    None
}
