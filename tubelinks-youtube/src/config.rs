//! Fetcher configuration.

use serde::{Deserialize, Serialize};

use tubelinks_core::constants::{DEFAULT_HTTP_TIMEOUT_SECONDS, YOUTUBE_BASE_URL};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// YouTube fetcher configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct YouTubeConfig {
    /// Site root, without trailing slash (e.g., "https://www.youtube.com")
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            base_url: YOUTUBE_BASE_URL.into(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl YouTubeConfig {
    /// Creates a config pointing at a different site root (mirrors, test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }
}
