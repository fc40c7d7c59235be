//! App state: configuration and the transcript service.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use tracing::warn;

use tubelinks_cache::{CacheConfig, TranscriptCache};
use tubelinks_core::error::Result;
use tubelinks_core::traits::TranscriptFetcher;
use tubelinks_youtube::{YouTubeConfig, YouTubeFetcher};

use crate::service::TranscriptService;

/// Server configuration, read once at startup.
#[derive(Clone, Debug, Default)]
pub struct ApiConfig {
    /// Cache TTL and cleanup probability
    pub cache: CacheConfig,
    /// Upstream client settings
    pub youtube: YouTubeConfig,
}

impl ApiConfig {
    /// Loads `.env` if present, then reads `TUBELINKS_*` variables.
    ///
    /// Missing or unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        let youtube = YouTubeConfig {
            base_url: std::env::var("TUBELINKS_YOUTUBE_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.youtube.base_url),
            timeout_seconds: env_or("TUBELINKS_HTTP_TIMEOUT_SECONDS", defaults.youtube.timeout_seconds),
            ..defaults.youtube
        };

        Self {
            cache: CacheConfig {
                ttl_seconds: env_or("TUBELINKS_CACHE_TTL_SECONDS", defaults.cache.ttl_seconds),
                cleanup_probability: env_or(
                    "TUBELINKS_CLEANUP_PROBABILITY",
                    defaults.cache.cleanup_probability,
                ),
            },
            youtube,
        }
    }
}

fn env_or<T: FromStr + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Ignoring unparseable setting");
            default
        }),
        Err(_) => default,
    }
}

/// Shared state handed to every handler.
pub struct AppState {
    /// Effective configuration
    pub config: ApiConfig,
    /// Cached transcript lookups
    pub service: TranscriptService,
    /// When this state was built
    pub started_at: Instant,
}

impl AppState {
    /// Builds state that fetches from YouTube.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let fetcher = YouTubeFetcher::with_config(config.youtube.clone())?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Builds state around any fetcher.
    ///
    /// Fails if the cache settings do not pass [`CacheConfig::validate`].
    pub fn with_fetcher(config: ApiConfig, fetcher: Arc<dyn TranscriptFetcher>) -> Result<Self> {
        config.cache.validate()?;
        let cache = Arc::new(TranscriptCache::with_config(config.cache.clone()));
        Ok(Self {
            service: TranscriptService::new(cache, fetcher),
            config,
            started_at: Instant::now(),
        })
    }
}
