//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

use tubelinks_core::constants::DEFAULT_LANG;

/// Query string of `GET /transcript`.
#[derive(Debug, Deserialize)]
pub struct TranscriptQuery {
    /// Upstream video id, used verbatim
    pub video_id: String,
    /// Language code, `"en"` when absent
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`
    pub status: String,
    /// Crate version
    pub version: String,
    /// Seconds since startup
    pub uptime_seconds: u64,
    /// Entries currently held in the cache, expired ones included
    pub cached_entries: usize,
}
