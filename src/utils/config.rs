//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User-Agent presented when fetching pages and media. Several
/// platforms serve reduced markup to clients without a browser UA.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Output root; one subdirectory per platform is created below it
    pub output_dir: PathBuf,

    /// User-Agent header for page and media requests
    pub user_agent: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Platform-standard downloads directory, never a relative path.
fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("./downloads"))
        .join("mediagrab")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert!(settings.output_dir.ends_with("mediagrab"));
        assert!(settings.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_settings_roundtrip() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).expect("serialize");
        let back: AppSettings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.output_dir, settings.output_dir);
        assert_eq!(back.user_agent, settings.user_agent);
    }
}
